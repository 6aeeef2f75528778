#![forbid(unsafe_code)]
#![warn(
    unused,
    clippy::cognitive_complexity,
    unused_crate_dependencies,
    unused_extern_crates,
    clippy::unused_self,
    clippy::useless_let_if_seq,
    missing_debug_implementations,
    rust_2018_idioms,
    rust_2024_compatibility
)]

//! # OrderFeed
//! Synthetic "live orders" feed that drives a dashboard widget.
//!
//! It is made up of a few small pieces:
//! * **Aggregate**: [`OrderAggregate`](aggregate::OrderAggregate) is the single source of truth
//!   for the dashboard (order total, baseline, volume buckets and the capped recent order feed).
//! * **Simulator**: [`OrderFeedSimulator`](simulator::OrderFeedSimulator) generates synthetic
//!   orders on a jittered timer, applies them to the aggregate, and notifies a [`FeedObserver`].
//! * **Handle**: [`SimulatorHandle`](simulator::handle::SimulatorHandle) allows the running
//!   simulator task to be shut down cleanly, returning its final state.
//!
//! ## Getting Started
//! ```
//! use orderfeed::{config::FeedConfig, simulator::OrderFeedSimulator};
//!
//! let config = FeedConfig::default();
//! let mut simulator = OrderFeedSimulator::seeded(config, 7).unwrap();
//!
//! // Fire a single synthetic order without a timer
//! let update = simulator.tick(&mut ());
//!
//! assert_eq!(simulator.aggregate().total, 1);
//! assert!(update.bucket_closed.is_none());
//! ```

use crate::aggregate::{OrderAggregate, OrderUpdate};
use chrono::{DateTime, Utc};
use derive_more::{Constructor, Display, From};
use serde::{Deserialize, Serialize};

/// [`OrderAggregate`] state, [`BucketAccumulator`](aggregate::BucketAccumulator) and bucket
/// closing logic.
pub mod aggregate;

/// Static [`Customer`](customer::Customer) reference set used to sample synthetic orders.
pub mod customer;

/// [`OrderRecord`](order::OrderRecord) value type and positional
/// [`RelativeTime`](order::RelativeTime) labels.
pub mod order;

/// Jittered order simulator and the cancellable task handle that runs it.
pub mod simulator;

/// Serde configuration for the simulator, aggregate limits and initial seed state.
pub mod config;

/// All [`Error`](std::error::Error)s generated in OrderFeed.
pub mod error;

/// Default `tracing` subscriber initialisation.
pub mod logging;

/// Shutdown signal and traits.
pub mod shutdown;

/// Monotonically increasing sequence number of processed simulator firings.
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
    From,
)]
pub struct Sequence(pub u64);

impl Sequence {
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns the current value and increments the internal counter.
    pub fn fetch_add(&mut self) -> Sequence {
        let sequence = *self;
        self.0 += 1;
        sequence
    }
}

/// Context attached to every firing of the simulator.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, Constructor,
)]
pub struct FeedContext {
    pub sequence: Sequence,
    pub time: DateTime<Utc>,
}

/// Reactive consumer of simulator firings (eg/ a dashboard renderer).
///
/// Invoked after the [`OrderAggregate`] has been mutated, so implementors always observe the
/// post-update state. Implementors must not schedule work of their own.
pub trait FeedObserver {
    fn on_order(&mut self, context: FeedContext, aggregate: &OrderAggregate, update: &OrderUpdate);
}

impl FeedObserver for () {
    fn on_order(&mut self, _: FeedContext, _: &OrderAggregate, _: &OrderUpdate) {}
}

impl<Observer> FeedObserver for &mut Observer
where
    Observer: FeedObserver + ?Sized,
{
    fn on_order(&mut self, context: FeedContext, aggregate: &OrderAggregate, update: &OrderUpdate) {
        (**self).on_order(context, aggregate, update)
    }
}
