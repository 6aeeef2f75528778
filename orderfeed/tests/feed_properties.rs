use orderfeed::{
    FeedContext, FeedObserver,
    aggregate::{OrderAggregate, OrderUpdate},
    config::{AggregateConfig, AggregateSeed, BucketConfig, FeedConfig},
    order::{OrderRecord, RelativeTime},
    shutdown::AsyncShutdown,
    simulator::OrderFeedSimulator,
};
use rust_decimal_macros::dec;
use std::time::Duration;

#[derive(Debug, Default)]
struct InvariantChecker {
    previous_total: Option<u64>,
    previous_buckets: usize,
    orders_since_close: u64,
    firings: u64,
}

impl FeedObserver for InvariantChecker {
    fn on_order(&mut self, context: FeedContext, aggregate: &OrderAggregate, update: &OrderUpdate) {
        assert_eq!(context.sequence.value(), self.firings);
        self.firings += 1;

        // Feed never exceeds capacity & newest record is always "Just now"
        assert!(aggregate.recent_orders.len() <= 6);
        assert_eq!(
            aggregate.recent_orders.front().map(|order| order.relative_time),
            Some(RelativeTime::JustNow)
        );

        // Tracked ranks always carry their positional label
        for (rank, order) in aggregate.recent_orders.iter().enumerate().take(5) {
            assert_eq!(Some(order.relative_time), RelativeTime::for_rank(rank));
        }

        // Total grows by exactly one per order
        if let Some(previous) = self.previous_total {
            assert_eq!(aggregate.total, previous + 1);
        }
        self.previous_total = Some(aggregate.total);

        // A bucket closes iff three orders were applied since the last close
        self.orders_since_close += 1;
        match update.bucket_closed {
            Some(value) => {
                assert_eq!(self.orders_since_close, 3);
                assert!(value >= 150);
                assert_eq!(aggregate.volume_buckets.len(), self.previous_buckets + 1);
                self.orders_since_close = 0;
            }
            None => {
                assert!(self.orders_since_close < 3);
                assert_eq!(aggregate.volume_buckets.len(), self.previous_buckets);
            }
        }
        self.previous_buckets = aggregate.volume_buckets.len();
    }
}

#[test]
fn test_invariants_hold_for_long_synchronous_run() {
    for seed in 0..10 {
        let mut simulator = OrderFeedSimulator::seeded(FeedConfig::default(), seed).unwrap();
        let mut checker = InvariantChecker::default();

        for _ in 0..300 {
            simulator.tick(&mut checker);
        }

        assert_eq!(checker.firings, 300);
        assert_eq!(simulator.aggregate().total, 300);
        assert_eq!(simulator.aggregate().volume_buckets.len(), 100);
    }
}

#[test]
fn test_bucket_history_is_retention_capped() {
    let config = FeedConfig {
        aggregate: AggregateConfig {
            bucket_retention: 200,
            ..AggregateConfig::default()
        },
        ..FeedConfig::default()
    };
    let mut simulator = OrderFeedSimulator::seeded(config, 8).unwrap();

    for _ in 0..(3 * 250) {
        simulator.tick(&mut ());
    }

    assert_eq!(simulator.aggregate().volume_buckets.len(), 200);
}

#[test]
fn test_custom_bucket_rule() {
    let config = FeedConfig {
        aggregate: AggregateConfig {
            bucket: BucketConfig {
                threshold: 2,
                base: 10,
                jitter: 0,
                pressure_weight: 100,
            },
            ..AggregateConfig::default()
        },
        ..FeedConfig::default()
    };
    let mut simulator = OrderFeedSimulator::seeded(config, 8).unwrap();

    let updates = (0..4).map(|_| simulator.tick(&mut ())).collect::<Vec<_>>();

    assert_eq!(
        updates
            .iter()
            .map(|update| update.bucket_closed)
            .collect::<Vec<_>>(),
        vec![None, Some(210), None, Some(210)]
    );
}

#[test]
fn test_apply_order_with_external_records() {
    let mut aggregate = OrderAggregate::new(AggregateConfig::default(), AggregateSeed::default());
    let mut rng = rand::rng();

    let record = |name: &str| {
        OrderRecord::new(
            name.into(),
            "🇳🇴".into(),
            2,
            dec!(99.99),
            RelativeTime::JustNow,
        )
    };

    for index in 0..7 {
        aggregate.apply_order(record(&format!("Ingrid {index}.")), &mut rng);
    }

    assert_eq!(aggregate.total, 7);
    assert_eq!(aggregate.recent_orders.len(), 6);
    assert!(
        aggregate
            .recent_orders
            .iter()
            .all(|order| order.customer_name != "Ingrid 0.")
    );
    assert_eq!(aggregate.volume_buckets.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_simulator_task_honours_invariants() {
    let config = FeedConfig {
        seed: AggregateSeed::demo(),
        ..FeedConfig::default()
    };
    let simulator = OrderFeedSimulator::seeded(config, 77).unwrap();
    let handle = simulator.spawn(InvariantChecker {
        previous_buckets: 12,
        ..InvariantChecker::default()
    });

    tokio::time::sleep(Duration::from_secs(30)).await;

    let (simulator, checker) = handle.shutdown().await.unwrap();

    assert!(checker.firings >= 30);
    assert_eq!(simulator.aggregate().total, 1_247 + checker.firings);
    assert_eq!(simulator.aggregate().previous_total, 1_089);
}
