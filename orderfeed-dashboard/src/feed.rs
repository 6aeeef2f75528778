use crate::markup::{self, FeedListTemplate};
use derive_more::Display;
use orderfeed::order::OrderRecord;
use serde::{Deserialize, Serialize};

/// Cosmetic one-shot animation hint attached to a feed row.
#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Deserialize,
    Serialize,
    Display,
)]
pub enum RowState {
    #[default]
    #[display("")]
    Static,
    #[display("entering")]
    Entering,
    #[display("shifting")]
    Shifting,
}

#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct FeedRow {
    /// Flag & customer name, eg/ "🇯🇵 Yuki T.".
    pub name: String,

    /// Item count & relative time, eg/ "3 items · Just now".
    pub meta: String,

    /// Fixed point amount, eg/ "$127.50".
    pub amount: String,

    pub state: RowState,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct FeedView {
    pub rows: Vec<FeedRow>,
}

/// Project the recent orders (newest first) into feed rows.
///
/// When `newest` is set the first row is `Entering` and every other row is `Shifting`.
pub fn render_feed<'a, Records>(records: Records, newest: bool) -> FeedView
where
    Records: IntoIterator<Item = &'a OrderRecord>,
{
    let rows = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let state = match (newest, index) {
                (false, _) => RowState::Static,
                (true, 0) => RowState::Entering,
                (true, _) => RowState::Shifting,
            };

            let mut amount = record.amount.round_dp(2);
            amount.rescale(2);

            FeedRow {
                name: format!("{} {}", record.country_flag, record.customer_name),
                meta: format!(
                    "{} item{} · {}",
                    record.item_count,
                    if record.item_count > 1 { "s" } else { "" },
                    record.relative_time
                ),
                amount: format!("${amount}"),
                state,
            }
        })
        .collect();

    FeedView { rows }
}

impl FeedRow {
    /// CSS class list of the row, eg/ "feed-item entering".
    pub fn class(&self) -> String {
        match self.state {
            RowState::Static => "feed-item".to_string(),
            state => format!("feed-item {state}"),
        }
    }
}

impl FeedView {
    /// Markup of the `feedList` container contents.
    pub fn to_html(&self) -> String {
        markup::render(&FeedListTemplate { rows: &self.rows })
    }
}
