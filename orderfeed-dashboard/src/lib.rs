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

//! # OrderFeed-Dashboard
//! Reactive renderer for the OrderFeed "live orders" widget.
//!
//! Every projection is pure: an [`OrderAggregate`] goes in, a view comes out. The [`Dashboard`]
//! wires those projections to a [`DashboardSurface`] and re-renders whenever the simulator
//! notifies it of a new order. It never schedules anything itself.
//!
//! ## Getting Started
//! ```
//! use orderfeed::{config::FeedConfig, simulator::OrderFeedSimulator};
//! use orderfeed_dashboard::{Dashboard, sparkline::SparklineConfig, surface::HtmlSurface};
//!
//! let mut simulator = OrderFeedSimulator::seeded(FeedConfig::default(), 3).unwrap();
//! let mut dashboard = Dashboard::new(HtmlSurface::default(), SparklineConfig::default());
//!
//! dashboard.render_widget(simulator.aggregate());
//! simulator.tick(&mut dashboard);
//!
//! assert_eq!(dashboard.surface().order_count, "1");
//! ```

use crate::{
    feed::render_feed,
    sparkline::{SparklineConfig, render_sparkline},
    summary::render_summary,
    surface::DashboardSurface,
};
use orderfeed::{
    FeedContext, FeedObserver,
    aggregate::{OrderAggregate, OrderUpdate},
};
use tracing::debug;

/// Order count & percent change badge.
pub mod summary;

/// Volume bucket bar chart geometry and SVG markup.
pub mod sparkline;

/// Recent order rows and their HTML markup.
pub mod feed;

/// [`DashboardSurface`] output targets and the in-memory [`HtmlSurface`](surface::HtmlSurface).
pub mod surface;

/// Terminal tables of the dashboard views.
pub mod display;

/// Scene collaborator the widget is mounted into, and the fixed cadence
/// [`FrameLoop`](scene::FrameLoop).
pub mod scene;

/// `askama` templates of the widget HTML.
mod markup;

/// Renders [`OrderAggregate`] projections into a [`DashboardSurface`].
#[derive(Debug, Clone)]
pub struct Dashboard<Surface> {
    surface: Surface,
    sparkline: SparklineConfig,
}

impl<Surface> Dashboard<Surface>
where
    Surface: DashboardSurface,
{
    pub fn new(surface: Surface, sparkline: SparklineConfig) -> Self {
        Self { surface, sparkline }
    }

    /// Full render of every target without animation hints, used once at start up.
    pub fn render_widget(&mut self, aggregate: &OrderAggregate) {
        self.render_summary(aggregate);
        self.surface.set_sparkline(&render_sparkline(
            &aggregate.volume_buckets,
            &self.sparkline,
            false,
        ));
        self.surface
            .set_feed_list(&render_feed(&aggregate.recent_orders, false));
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn into_surface(self) -> Surface {
        self.surface
    }

    fn render_summary(&mut self, aggregate: &OrderAggregate) {
        let summary = render_summary(aggregate);
        self.surface.set_order_count(&summary.order_count);
        self.surface.set_change_badge(&summary.badge);
    }
}

impl<Surface> FeedObserver for Dashboard<Surface>
where
    Surface: DashboardSurface,
{
    fn on_order(&mut self, context: FeedContext, aggregate: &OrderAggregate, update: &OrderUpdate) {
        debug!(
            sequence = %context.sequence,
            total = aggregate.total,
            bucket_closed = ?update.bucket_closed,
            "Dashboard rendering order"
        );

        self.render_summary(aggregate);
        self.surface
            .set_feed_list(&render_feed(&aggregate.recent_orders, true));

        if update.bucket_closed.is_some() {
            self.surface.set_sparkline(&render_sparkline(
                &aggregate.volume_buckets,
                &self.sparkline,
                true,
            ));
        }
    }
}
