use crate::customer::Customer;
use derive_more::Constructor;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smol_str::{SmolStr, format_smolstr};
use std::fmt::{Display, Formatter};

/// Inclusive lower bound of a synthetic order amount, in cents ($30.00).
pub const AMOUNT_CENTS_MIN: i64 = 3_000;

/// Exclusive upper bound of a synthetic order amount, in cents ($230.00).
pub const AMOUNT_CENTS_MAX: i64 = 23_000;

/// Maximum number of items in a synthetic order.
pub const ITEM_COUNT_MAX: u8 = 5;

/// Positional "time since order" label.
///
/// A label is a function of the record's rank in the feed, not of its actual age.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativeTime {
    JustNow,
    MinutesAgo(u32),
}

impl RelativeTime {
    /// Labels assigned to feed positions `0..=4` after every insertion.
    pub const RANKS: [RelativeTime; 5] = [
        RelativeTime::JustNow,
        RelativeTime::MinutesAgo(1),
        RelativeTime::MinutesAgo(3),
        RelativeTime::MinutesAgo(6),
        RelativeTime::MinutesAgo(10),
    ];

    /// Label for the provided feed position, if that position is tracked.
    pub fn for_rank(rank: usize) -> Option<Self> {
        Self::RANKS.get(rank).copied()
    }
}

impl Display for RelativeTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RelativeTime::JustNow => write!(f, "Just now"),
            RelativeTime::MinutesAgo(minutes) => write!(f, "{minutes}m ago"),
        }
    }
}

/// Single order displayed in the recent orders feed.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize, Serialize, Constructor)]
pub struct OrderRecord {
    pub customer_name: SmolStr,
    pub country_flag: SmolStr,
    pub item_count: u8,
    pub amount: Decimal,
    pub relative_time: RelativeTime,
}

impl OrderRecord {
    /// Generate a synthetic [`OrderRecord`] for a uniformly sampled [`Customer`].
    ///
    /// * `customer_name`: customer name plus a uniform last initial, eg/ "Yuki T."
    /// * `amount`: uniform in [$30.00, $230.00), whole cents.
    /// * `item_count`: uniform in [1, 5].
    pub fn generate<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let customer = Customer::sample(rng);
        let initial = char::from(rng.random_range(b'A'..=b'Z'));
        let cents = rng.random_range(AMOUNT_CENTS_MIN..AMOUNT_CENTS_MAX);
        let item_count = rng.random_range(1..=ITEM_COUNT_MAX);

        Self {
            customer_name: format_smolstr!("{} {initial}.", customer.name),
            country_flag: SmolStr::new_static(customer.flag),
            item_count,
            amount: Decimal::new(cents, 2),
            relative_time: RelativeTime::JustNow,
        }
    }
}
