//! Configuration for the order feed simulator.
//!
//! Every field has a default matching the stock widget behaviour, so an empty JSON object
//! is a valid [`FeedConfig`].
use crate::{
    error::FeedError,
    order::{OrderRecord, RelativeTime},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Largest seed `total` or `previous_total` accepted by [`FeedConfig::validate`].
pub const SEED_TOTAL_MAX: u64 = i64::MAX as u64;

/// Top-level configuration for an order feed.
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Firing cadence & randomness of the simulator.
    pub simulator: SimulatorConfig,

    /// Capacity limits and bucket closing rules of the aggregate.
    pub aggregate: AggregateConfig,

    /// Initial state of the aggregate.
    pub seed: AggregateSeed,
}

impl FeedConfig {
    /// Deserialise a [`FeedConfig`] from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, FeedError> {
        serde_json::from_str::<Self>(json)?.validate()
    }

    /// Check the configuration can drive a simulator.
    pub fn validate(self) -> Result<Self, FeedError> {
        let SimulatorConfig {
            delay_min_ms,
            delay_max_ms,
            ..
        } = self.simulator;

        if delay_min_ms >= delay_max_ms {
            return Err(FeedError::DelayRange {
                min_ms: delay_min_ms,
                max_ms: delay_max_ms,
            });
        }

        if self.aggregate.feed_capacity == 0 {
            return Err(FeedError::FeedCapacity);
        }

        if self.aggregate.bucket.threshold == 0 {
            return Err(FeedError::BucketThreshold);
        }

        if self.aggregate.bucket_retention == 0 {
            return Err(FeedError::BucketRetention);
        }

        let bucket = self.aggregate.bucket;
        if bucket.value_max().is_none() {
            return Err(FeedError::BucketOverflow {
                base: bucket.base,
                jitter: bucket.jitter,
                threshold: bucket.threshold,
                pressure_weight: bucket.pressure_weight,
            });
        }

        // Totals must fit the signed change shown by the dashboard
        if let Some(value) = [self.seed.total, self.seed.previous_total]
            .into_iter()
            .find(|total| *total > SEED_TOTAL_MAX)
        {
            return Err(FeedError::SeedTotal {
                value,
                max: SEED_TOTAL_MAX,
            });
        }

        if self.seed.recent_orders.len() > self.aggregate.feed_capacity {
            return Err(FeedError::SeedOverCapacity {
                len: self.seed.recent_orders.len(),
                capacity: self.aggregate.feed_capacity,
            });
        }

        Ok(self)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Inclusive lower bound of the delay between two orders.
    pub delay_min_ms: u64,

    /// Exclusive upper bound of the delay between two orders.
    pub delay_max_ms: u64,

    /// Optional seed for reproducible runs; sourced from the OS when `None`.
    pub rng_seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            delay_min_ms: 300,
            delay_max_ms: 1_000,
            rng_seed: None,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct AggregateConfig {
    /// Maximum number of records kept in the recent orders feed.
    pub feed_capacity: usize,

    /// Maximum number of volume buckets retained, oldest dropped first.
    pub bucket_retention: usize,

    pub bucket: BucketConfig,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            feed_capacity: 6,
            bucket_retention: 200,
            bucket: BucketConfig::default(),
        }
    }
}

/// Volume bucket closing rule.
///
/// A bucket closes after `threshold` orders with value
/// `base + uniform[0, jitter) + pressure * pressure_weight`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct BucketConfig {
    pub threshold: u64,
    pub base: u64,
    pub jitter: u64,
    pub pressure_weight: u64,
}

impl BucketConfig {
    /// Largest value a bucket can close with, or `None` if it overflows `u64`.
    pub fn value_max(&self) -> Option<u64> {
        self.threshold
            .checked_mul(self.pressure_weight)?
            .checked_add(self.base)?
            .checked_add(self.jitter.saturating_sub(1))
    }
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            threshold: 3,
            base: 150,
            jitter: 80,
            pressure_weight: 5,
        }
    }
}

/// Initial state of an [`OrderAggregate`](crate::aggregate::OrderAggregate).
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AggregateSeed {
    pub total: u64,
    pub previous_total: u64,
    pub volume_buckets: Vec<u64>,

    /// Newest first.
    pub recent_orders: Vec<OrderRecord>,
}

impl AggregateSeed {
    /// Mock data the dashboard widget starts from.
    pub fn demo() -> Self {
        let order = |name: &str, flag: &str, items: u8, cents: i64, minutes: u32| {
            OrderRecord::new(
                SmolStr::new(name),
                SmolStr::new(flag),
                items,
                Decimal::new(cents, 2),
                match minutes {
                    0 => RelativeTime::JustNow,
                    minutes => RelativeTime::MinutesAgo(minutes),
                },
            )
        };

        Self {
            total: 1_247,
            previous_total: 1_089,
            volume_buckets: vec![142, 168, 195, 156, 203, 178, 205, 189, 220, 195, 210, 185],
            recent_orders: vec![
                order("Yuki T.", "🇯🇵", 3, 12_750, 0),
                order("Priya S.", "🇮🇳", 1, 8_400, 2),
                order("Marco R.", "🇮🇹", 5, 21_590, 5),
                order("Sarah M.", "🇺🇸", 2, 5_225, 8),
                order("Ahmed K.", "🇪🇬", 4, 16_300, 12),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_config_validate() {
        struct TestCase {
            name: &'static str,
            input: FeedConfig,
            expected: Result<(), FeedError>,
        }

        let valid = FeedConfig::default();

        let cases = vec![
            TestCase {
                name: "default is valid",
                input: valid.clone(),
                expected: Ok(()),
            },
            TestCase {
                name: "demo seed is valid",
                input: FeedConfig {
                    seed: AggregateSeed::demo(),
                    ..valid.clone()
                },
                expected: Ok(()),
            },
            TestCase {
                name: "empty delay range",
                input: FeedConfig {
                    simulator: SimulatorConfig {
                        delay_min_ms: 500,
                        delay_max_ms: 500,
                        rng_seed: None,
                    },
                    ..valid.clone()
                },
                expected: Err(FeedError::DelayRange {
                    min_ms: 500,
                    max_ms: 500,
                }),
            },
            TestCase {
                name: "zero feed capacity",
                input: FeedConfig {
                    aggregate: AggregateConfig {
                        feed_capacity: 0,
                        ..AggregateConfig::default()
                    },
                    ..valid.clone()
                },
                expected: Err(FeedError::FeedCapacity),
            },
            TestCase {
                name: "zero bucket threshold",
                input: FeedConfig {
                    aggregate: AggregateConfig {
                        bucket: BucketConfig {
                            threshold: 0,
                            ..BucketConfig::default()
                        },
                        ..AggregateConfig::default()
                    },
                    ..valid.clone()
                },
                expected: Err(FeedError::BucketThreshold),
            },
            TestCase {
                name: "zero bucket retention",
                input: FeedConfig {
                    aggregate: AggregateConfig {
                        bucket_retention: 0,
                        ..AggregateConfig::default()
                    },
                    ..valid.clone()
                },
                expected: Err(FeedError::BucketRetention),
            },
            TestCase {
                name: "seed larger than capacity",
                input: FeedConfig {
                    aggregate: AggregateConfig {
                        feed_capacity: 2,
                        ..AggregateConfig::default()
                    },
                    seed: AggregateSeed::demo(),
                    ..valid.clone()
                },
                expected: Err(FeedError::SeedOverCapacity {
                    len: 5,
                    capacity: 2,
                }),
            },
            TestCase {
                name: "largest representable bucket value",
                input: FeedConfig {
                    aggregate: AggregateConfig {
                        bucket: BucketConfig {
                            threshold: 1,
                            base: u64::MAX - 10,
                            jitter: 6,
                            pressure_weight: 5,
                        },
                        ..AggregateConfig::default()
                    },
                    ..valid.clone()
                },
                expected: Ok(()),
            },
            TestCase {
                name: "bucket pressure overflows",
                input: FeedConfig {
                    aggregate: AggregateConfig {
                        bucket: BucketConfig {
                            threshold: 3,
                            base: 150,
                            jitter: 80,
                            pressure_weight: u64::MAX / 2,
                        },
                        ..AggregateConfig::default()
                    },
                    ..valid.clone()
                },
                expected: Err(FeedError::BucketOverflow {
                    base: 150,
                    jitter: 80,
                    threshold: 3,
                    pressure_weight: u64::MAX / 2,
                }),
            },
            TestCase {
                name: "seed total beyond signed range",
                input: FeedConfig {
                    seed: AggregateSeed {
                        total: u64::MAX,
                        ..AggregateSeed::default()
                    },
                    ..valid.clone()
                },
                expected: Err(FeedError::SeedTotal {
                    value: u64::MAX,
                    max: SEED_TOTAL_MAX,
                }),
            },
            TestCase {
                name: "seed previous total beyond signed range",
                input: FeedConfig {
                    seed: AggregateSeed {
                        previous_total: SEED_TOTAL_MAX + 1,
                        ..AggregateSeed::default()
                    },
                    ..valid.clone()
                },
                expected: Err(FeedError::SeedTotal {
                    value: SEED_TOTAL_MAX + 1,
                    max: SEED_TOTAL_MAX,
                }),
            },
        ];

        for (index, test) in cases.into_iter().enumerate() {
            let actual = test.input.validate().map(|_| ());
            assert_eq!(actual, test.expected, "TC{index} ({}) failed", test.name);
        }
    }

    #[test]
    fn test_feed_config_from_json_str() {
        let config = FeedConfig::from_json_str(
            r#"{
                "simulator": { "delay_min_ms": 100, "rng_seed": 9 },
                "seed": {
                    "total": 10,
                    "recent_orders": [{
                        "customer_name": "Kofi A.",
                        "country_flag": "🇬🇭",
                        "item_count": 2,
                        "amount": "41.10",
                        "relative_time": { "minutes_ago": 3 }
                    }]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.simulator.delay_min_ms, 100);
        assert_eq!(config.simulator.delay_max_ms, 1_000);
        assert_eq!(config.simulator.rng_seed, Some(9));
        assert_eq!(config.aggregate, AggregateConfig::default());
        assert_eq!(config.seed.total, 10);
        assert_eq!(config.seed.previous_total, 0);
        assert_eq!(
            config.seed.recent_orders[0].relative_time,
            RelativeTime::MinutesAgo(3)
        );
        assert_eq!(config.seed.recent_orders[0].amount, Decimal::new(4_110, 2));
    }

    #[test]
    fn test_feed_config_from_json_str_rejects_overflowing_bucket_base() {
        let json = r#"{ "aggregate": { "bucket": { "base": 18446744073709551615 } } }"#;
        let error = FeedConfig::from_json_str(json).unwrap_err();

        assert_eq!(
            error,
            FeedError::BucketOverflow {
                base: u64::MAX,
                jitter: 80,
                threshold: 3,
                pressure_weight: 5,
            }
        );
    }

    #[test]
    fn test_feed_config_from_json_str_malformed() {
        let error = FeedConfig::from_json_str(r#"{ "simulator": 5 }"#).unwrap_err();
        assert!(matches!(error, FeedError::Deserialise(_)));
    }
}
