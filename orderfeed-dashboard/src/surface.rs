use crate::{
    feed::FeedView,
    markup::{self, ChangeBadgeTemplate, WidgetTemplate},
    sparkline::SparklineView,
    summary::ChangeBadge,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Logical output targets of the dashboard widget.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, Display,
)]
pub enum Target {
    #[display("orderCount")]
    OrderCount,
    #[display("changeBadge")]
    ChangeBadge,
    #[display("sparkline")]
    Sparkline,
    #[display("feedList")]
    FeedList,
}

/// UI binding the dashboard renders into, one setter per [`Target`].
pub trait DashboardSurface {
    fn set_order_count(&mut self, text: &str);
    fn set_change_badge(&mut self, badge: &ChangeBadge);
    fn set_sparkline(&mut self, sparkline: &SparklineView);
    fn set_feed_list(&mut self, feed: &FeedView);
}

/// Number of times each [`Target`] has been written.
#[derive(
    Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize,
)]
pub struct RenderCounts {
    pub order_count: u64,
    pub change_badge: u64,
    pub sparkline: u64,
    pub feed_list: u64,
}

impl RenderCounts {
    pub fn get(&self, target: Target) -> u64 {
        match target {
            Target::OrderCount => self.order_count,
            Target::ChangeBadge => self.change_badge,
            Target::Sparkline => self.sparkline,
            Target::FeedList => self.feed_list,
        }
    }
}

/// In-memory HTML binding holding the latest content of every [`Target`].
///
/// Text targets are stored as-is and escaped when composed into markup.
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct HtmlSurface {
    pub order_count: String,
    pub change_badge_class: String,
    pub change_badge_text: String,
    pub sparkline: String,
    pub feed_list: String,
    pub counts: RenderCounts,
}

impl DashboardSurface for HtmlSurface {
    fn set_order_count(&mut self, text: &str) {
        self.order_count = text.to_string();
        self.counts.order_count += 1;
    }

    fn set_change_badge(&mut self, badge: &ChangeBadge) {
        self.change_badge_class = badge.class().to_string();
        self.change_badge_text = badge.text();
        self.counts.change_badge += 1;
    }

    fn set_sparkline(&mut self, sparkline: &SparklineView) {
        self.sparkline = sparkline.to_svg_document();
        self.counts.sparkline += 1;
    }

    fn set_feed_list(&mut self, feed: &FeedView) {
        self.feed_list = feed.to_html();
        self.counts.feed_list += 1;
    }
}

impl HtmlSurface {
    /// Latest markup written to the provided [`Target`].
    pub fn markup(&self, target: Target) -> String {
        match target {
            Target::OrderCount => markup::escape(&self.order_count),
            Target::ChangeBadge => markup::render(&ChangeBadgeTemplate {
                class: &self.change_badge_class,
                id: target,
                text: &self.change_badge_text,
            }),
            Target::Sparkline => self.sparkline.clone(),
            Target::FeedList => self.feed_list.clone(),
        }
    }

    /// Full widget markup, suitable for mounting into a [`Scene`](crate::scene::Scene).
    pub fn to_html(&self) -> String {
        markup::render(&WidgetTemplate {
            badge: &self.markup(Target::ChangeBadge),
            order_count_id: Target::OrderCount,
            order_count: &self.order_count,
            sparkline: &self.sparkline,
            feed_list_id: Target::FeedList,
            feed_list: &self.feed_list,
        })
    }
}
