use crate::{
    FeedContext, FeedObserver, Sequence,
    aggregate::{OrderAggregate, OrderUpdate},
    config::{FeedConfig, SimulatorConfig},
    error::FeedError,
    order::OrderRecord,
    shutdown::Shutdown,
    simulator::handle::SimulatorHandle,
};
use chrono::Utc;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// Provides the [`SimulatorHandle`] used to run & shut down a spawned simulator task.
pub mod handle;

/// Generates synthetic orders on a jittered schedule and applies them to the
/// [`OrderAggregate`] it owns.
///
/// Every firing runs to completion (generate, apply, notify) before the next delay is drawn,
/// so the aggregate has exactly one writer.
#[derive(Debug)]
pub struct OrderFeedSimulator<R = StdRng> {
    config: SimulatorConfig,
    aggregate: OrderAggregate,
    sequence: Sequence,
    rng: R,
}

impl OrderFeedSimulator<StdRng> {
    /// Construct from a [`FeedConfig`], seeding the rng from `rng_seed` if provided, or the OS.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let rng = match config.simulator.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self::with_rng(config, rng)
    }

    /// Construct with a deterministic rng, ignoring any configured `rng_seed`.
    pub fn seeded(config: FeedConfig, seed: u64) -> Result<Self, FeedError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R> OrderFeedSimulator<R>
where
    R: Rng,
{
    pub fn with_rng(config: FeedConfig, rng: R) -> Result<Self, FeedError> {
        let FeedConfig {
            simulator,
            aggregate,
            seed,
        } = config.validate()?;

        Ok(Self {
            config: simulator,
            aggregate: OrderAggregate::new(aggregate, seed),
            sequence: Sequence::default(),
            rng,
        })
    }

    pub fn aggregate(&self) -> &OrderAggregate {
        &self.aggregate
    }

    pub fn into_aggregate(self) -> OrderAggregate {
        self.aggregate
    }

    /// Number of firings processed so far.
    pub fn sequence(&self) -> Sequence {
        self.sequence
    }

    /// Draw the delay until the next firing, uniform in `[delay_min, delay_max)`.
    pub fn next_delay(&mut self) -> Duration {
        let millis = self
            .rng
            .random_range(self.config.delay_min_ms..self.config.delay_max_ms);

        Duration::from_millis(millis)
    }

    pub fn generate_order(&mut self) -> OrderRecord {
        OrderRecord::generate(&mut self.rng)
    }

    /// Fire once: generate a synthetic order, apply it, then notify the [`FeedObserver`].
    pub fn tick<Observer>(&mut self, observer: &mut Observer) -> OrderUpdate
    where
        Observer: FeedObserver + ?Sized,
    {
        let order = self.generate_order();
        let context = FeedContext::new(self.sequence.fetch_add(), Utc::now());

        debug!(
            sequence = %context.sequence,
            customer = %order.customer_name,
            amount = %order.amount,
            items = order.item_count,
            "OrderFeedSimulator generated order"
        );

        let update = self.aggregate.apply_order(order, &mut self.rng);
        observer.on_order(context, &self.aggregate, &update);
        update
    }

    /// Wait a jittered delay then fire, unless a [`Shutdown`] arrives first.
    ///
    /// Returns `None` once the simulator should stop (shutdown received, or the sender dropped).
    pub async fn schedule_next<Observer>(
        &mut self,
        observer: &mut Observer,
        shutdown_rx: &mut oneshot::Receiver<Shutdown>,
    ) -> Option<OrderUpdate>
    where
        Observer: FeedObserver + ?Sized,
    {
        let delay = self.next_delay();

        tokio::select! {
            biased;
            signal = &mut *shutdown_rx => {
                match signal {
                    Ok(Shutdown) => info!(
                        sequence = %self.sequence,
                        "OrderFeedSimulator received Shutdown"
                    ),
                    Err(_) => warn!(
                        sequence = %self.sequence,
                        "OrderFeedSimulator handle dropped without Shutdown, stopping"
                    ),
                }
                None
            }
            _ = tokio::time::sleep(delay) => Some(self.tick(observer)),
        }
    }

    /// Spawn the simulator onto the current tokio runtime, returning a [`SimulatorHandle`].
    pub fn spawn<Observer>(self, observer: Observer) -> SimulatorHandle<R, Observer>
    where
        R: Send + 'static,
        Observer: FeedObserver + Send + 'static,
    {
        handle::spawn(self, observer)
    }
}
