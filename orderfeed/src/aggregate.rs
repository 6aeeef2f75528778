use crate::{
    config::{AggregateConfig, AggregateSeed, BucketConfig},
    order::{OrderRecord, RelativeTime},
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

/// Order pressure accumulated since the last volume bucket closed.
#[derive(
    Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize,
)]
pub struct BucketAccumulator {
    /// Order count pressure contributing to the next bucket value.
    pub pressure: u64,

    /// Orders applied since the last bucket closed.
    pub orders: u64,
}

impl BucketAccumulator {
    fn record_order(&mut self) {
        self.pressure += 1;
        self.orders += 1;
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Outcome of applying a single order to the [`OrderAggregate`].
#[derive(
    Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize,
)]
pub struct OrderUpdate {
    /// Value of the volume bucket closed by this order, if any.
    pub bucket_closed: Option<u64>,
}

/// Single source of truth for the dashboard.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize, Serialize)]
pub struct OrderAggregate {
    pub total: u64,
    pub previous_total: u64,
    pub volume_buckets: Vec<u64>,
    pub recent_orders: VecDeque<OrderRecord>,
    pub bucket_accumulator: BucketAccumulator,
    config: AggregateConfig,
}

impl OrderAggregate {
    pub fn new(config: AggregateConfig, seed: AggregateSeed) -> Self {
        let AggregateSeed {
            total,
            previous_total,
            mut volume_buckets,
            recent_orders,
        } = seed;

        let excess = volume_buckets.len().saturating_sub(config.bucket_retention);
        volume_buckets.drain(..excess);

        let mut recent_orders = VecDeque::from(recent_orders);
        recent_orders.truncate(config.feed_capacity);

        Self {
            total,
            previous_total,
            volume_buckets,
            recent_orders,
            bucket_accumulator: BucketAccumulator::default(),
            config,
        }
    }

    pub fn config(&self) -> &AggregateConfig {
        &self.config
    }

    /// Apply a new order to the aggregate.
    ///
    /// The record is inserted at the front of the feed and the tracked positions are relabelled.
    /// Once enough orders have been applied since the last close, a new volume bucket is closed
    /// using `rng` for its jitter.
    pub fn apply_order<R>(&mut self, record: OrderRecord, rng: &mut R) -> OrderUpdate
    where
        R: Rng + ?Sized,
    {
        self.recent_orders.push_front(record);

        // Labels are positional, records beyond the tracked ranks keep their last label
        self.recent_orders
            .iter_mut()
            .enumerate()
            .skip(1)
            .map_while(|(rank, order)| RelativeTime::for_rank(rank).map(|label| (order, label)))
            .for_each(|(order, label)| order.relative_time = label);

        if self.recent_orders.len() > self.config.feed_capacity {
            self.recent_orders.pop_back();
        }

        self.total = self.total.saturating_add(1);
        self.bucket_accumulator.record_order();

        if self.bucket_accumulator.orders < self.config.bucket.threshold {
            return OrderUpdate::default();
        }

        let value = self.close_bucket(rng);
        OrderUpdate {
            bucket_closed: Some(value),
        }
    }

    fn close_bucket<R>(&mut self, rng: &mut R) -> u64
    where
        R: Rng + ?Sized,
    {
        let BucketConfig {
            base,
            jitter,
            pressure_weight,
            ..
        } = self.config.bucket;

        let jitter = if jitter == 0 {
            0
        } else {
            rng.random_range(0..jitter)
        };

        let value = self
            .bucket_accumulator
            .pressure
            .saturating_mul(pressure_weight)
            .saturating_add(base)
            .saturating_add(jitter);

        debug!(
            value,
            accumulator = ?self.bucket_accumulator,
            buckets = self.volume_buckets.len() + 1,
            "OrderAggregate closed volume bucket"
        );

        self.volume_buckets.push(value);
        if self.volume_buckets.len() > self.config.bucket_retention {
            let excess = self.volume_buckets.len() - self.config.bucket_retention;
            self.volume_buckets.drain(..excess);
        }

        self.bucket_accumulator.reset();
        value
    }

    /// Signed change of `total` relative to the `previous_total` baseline, saturating at the
    /// `i64` bounds.
    pub fn change(&self) -> i64 {
        let change = i128::from(self.total) - i128::from(self.previous_total);
        i64::try_from(change).unwrap_or(if change > 0 { i64::MAX } else { i64::MIN })
    }
}

impl Default for OrderAggregate {
    fn default() -> Self {
        Self::new(AggregateConfig::default(), AggregateSeed::default())
    }
}
