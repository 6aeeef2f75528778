use crate::{
    FeedObserver,
    error::FeedError,
    shutdown::{AsyncShutdown, Shutdown},
    simulator::OrderFeedSimulator,
};
use rand::Rng;
use tokio::{sync::oneshot, task::JoinHandle};
use tracing::info;

/// Handle to a running [`OrderFeedSimulator`] task.
///
/// [`AsyncShutdown::shutdown`] stops the simulator before its next firing and returns it
/// alongside the observer. Dropping the handle also stops the simulator, but its final state is
/// then lost.
#[derive(Debug)]
pub struct SimulatorHandle<R, Observer> {
    shutdown_tx: oneshot::Sender<Shutdown>,
    task: JoinHandle<(OrderFeedSimulator<R>, Observer)>,
}

impl<R, Observer> SimulatorHandle<R, Observer> {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Abort the simulator task ungracefully, discarding its state.
    ///
    /// A subsequent [`AsyncShutdown::shutdown`] yields [`FeedError::JoinError`].
    pub fn abort(&self) {
        self.task.abort()
    }
}

impl<R, Observer> AsyncShutdown for SimulatorHandle<R, Observer> {
    type Result = Result<(OrderFeedSimulator<R>, Observer), FeedError>;

    async fn shutdown(self) -> Self::Result {
        // Task may already have stopped, in which case the JoinHandle still yields its state
        let _ = self.shutdown_tx.send(Shutdown);
        Ok(self.task.await?)
    }
}

pub(super) fn spawn<R, Observer>(
    simulator: OrderFeedSimulator<R>,
    observer: Observer,
) -> SimulatorHandle<R, Observer>
where
    R: Rng + Send + 'static,
    Observer: FeedObserver + Send + 'static,
{
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let task = tokio::spawn(run(simulator, observer, shutdown_rx));

    SimulatorHandle { shutdown_tx, task }
}

async fn run<R, Observer>(
    mut simulator: OrderFeedSimulator<R>,
    mut observer: Observer,
    mut shutdown_rx: oneshot::Receiver<Shutdown>,
) -> (OrderFeedSimulator<R>, Observer)
where
    R: Rng,
    Observer: FeedObserver,
{
    info!(
        delay_min_ms = simulator.config.delay_min_ms,
        delay_max_ms = simulator.config.delay_max_ms,
        total = simulator.aggregate.total,
        "OrderFeedSimulator running"
    );

    while simulator
        .schedule_next(&mut observer, &mut shutdown_rx)
        .await
        .is_some()
    {}

    info!(
        sequence = %simulator.sequence,
        total = simulator.aggregate.total,
        buckets = simulator.aggregate.volume_buckets.len(),
        "OrderFeedSimulator stopped"
    );

    (simulator, observer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        FeedContext,
        aggregate::{OrderAggregate, OrderUpdate},
        config::FeedConfig,
    };
    use std::time::Duration;

    #[derive(Debug, Default)]
    struct Counter {
        orders: u64,
        buckets: u64,
    }

    impl FeedObserver for Counter {
        fn on_order(&mut self, _: FeedContext, _: &OrderAggregate, update: &OrderUpdate) {
            self.orders += 1;
            self.buckets += u64::from(update.bucket_closed.is_some());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_simulator_fires_on_jittered_schedule() {
        let simulator = OrderFeedSimulator::seeded(FeedConfig::default(), 21).unwrap();
        let handle = simulator.spawn(Counter::default());

        tokio::time::sleep(Duration::from_secs(10)).await;

        let (simulator, counter) = handle.shutdown().await.unwrap();

        // Delays are in [300ms, 1000ms), so 10s yields between 10 and 34 firings
        assert!(
            (10..=34).contains(&counter.orders),
            "unexpected order count {}",
            counter.orders
        );
        assert_eq!(simulator.aggregate().total, counter.orders);
        assert_eq!(simulator.sequence().value(), counter.orders);
        assert_eq!(counter.buckets, counter.orders / 3);
        assert_eq!(simulator.aggregate().volume_buckets.len() as u64, counter.buckets);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_before_first_firing() {
        let simulator = OrderFeedSimulator::seeded(FeedConfig::default(), 21).unwrap();
        let handle = simulator.spawn(Counter::default());

        let (simulator, counter) = handle.shutdown().await.unwrap();

        assert_eq!(counter.orders, 0);
        assert_eq!(simulator.aggregate().total, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_aborted_simulator_loses_state() {
        let simulator = OrderFeedSimulator::seeded(FeedConfig::default(), 21).unwrap();
        let handle = simulator.spawn(Counter::default());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!handle.is_finished());

        handle.abort();

        assert!(matches!(handle.shutdown().await, Err(FeedError::JoinError(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_handle_stops_simulator() {
        let simulator = OrderFeedSimulator::seeded(FeedConfig::default(), 21).unwrap();
        let SimulatorHandle { shutdown_tx, task } = simulator.spawn(Counter::default());

        drop(shutdown_tx);

        let (simulator, counter) = task.await.unwrap();
        assert_eq!(counter.orders, 0);
        assert_eq!(simulator.aggregate().total, 0);
    }
}
