use orderfeed::aggregate::OrderAggregate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Order count & percent change badge projection of an [`OrderAggregate`].
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct SummaryView {
    /// `total` with comma digit grouping, eg/ "1,247".
    pub order_count: String,

    /// `total - previous_total`.
    pub change: i64,

    pub badge: ChangeBadge,
}

/// Percent change relative to the baseline total, rounded to one decimal place.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum ChangeBadge {
    /// Non-negative change, percent >= 0.
    Positive(Decimal),

    /// Negative change, holding the absolute percent.
    Negative(Decimal),

    /// Baseline total is zero, so no percent change can be derived.
    Unavailable,
}

impl ChangeBadge {
    pub fn class(&self) -> &'static str {
        match self {
            ChangeBadge::Positive(_) => "change-badge positive",
            ChangeBadge::Negative(_) => "change-badge negative",
            ChangeBadge::Unavailable => "change-badge neutral",
        }
    }

    pub fn text(&self) -> String {
        match self {
            ChangeBadge::Positive(percent) => format!("↑ {percent}%"),
            ChangeBadge::Negative(percent) => format!("↓ {percent}%"),
            ChangeBadge::Unavailable => "—".to_string(),
        }
    }
}

pub fn render_summary(aggregate: &OrderAggregate) -> SummaryView {
    let change = aggregate.change();

    let badge = match change_percent(change, aggregate.previous_total) {
        None => ChangeBadge::Unavailable,
        Some(percent) if change >= 0 => ChangeBadge::Positive(percent),
        Some(percent) => ChangeBadge::Negative(percent.abs()),
    };

    SummaryView {
        order_count: group_digits(aggregate.total),
        change,
        badge,
    }
}

/// `change / previous_total * 100` rounded half away from zero, always with one decimal place.
fn change_percent(change: i64, previous_total: u64) -> Option<Decimal> {
    if previous_total == 0 {
        return None;
    }

    let mut percent = (Decimal::from(change) / Decimal::from(previous_total)
        * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    percent.rescale(1);

    Some(percent)
}

/// Format an integer with comma thousands separators, eg/ 1247 -> "1,247".
pub fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}
