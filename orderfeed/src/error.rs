use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, Error)]
pub enum FeedError {
    #[error("invalid delay range: min {min_ms}ms must be less than max {max_ms}ms")]
    DelayRange { min_ms: u64, max_ms: u64 },

    #[error("feed capacity must be at least 1")]
    FeedCapacity,

    #[error("bucket threshold must be at least 1")]
    BucketThreshold,

    #[error("bucket retention must be at least 1")]
    BucketRetention,

    #[error("seed contains {len} recent orders but feed capacity is {capacity}")]
    SeedOverCapacity { len: usize, capacity: usize },

    #[error("bucket value overflows u64 (base {base}, jitter {jitter}, threshold {threshold})")]
    BucketOverflow {
        base: u64,
        jitter: u64,
        threshold: u64,
        pressure_weight: u64,
    },

    #[error("seed total {value} exceeds maximum {max}")]
    SeedTotal { value: u64, max: u64 },

    #[error("config deserialisation: {0}")]
    Deserialise(String),

    #[error("JoinError: {0}")]
    JoinError(String),
}

impl From<serde_json::Error> for FeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Deserialise(value.to_string())
    }
}

impl From<tokio::task::JoinError> for FeedError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::JoinError(format!("{value:?}"))
    }
}
