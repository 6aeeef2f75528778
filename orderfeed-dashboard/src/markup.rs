use crate::{feed::FeedRow, surface::Target};
use askama::Template;
use tracing::error;

#[derive(Debug, Template)]
#[template(source = "{{ text }}", ext = "html")]
pub(crate) struct TextTemplate<'a> {
    pub text: &'a str,
}

#[derive(Debug, Template)]
#[template(path = "feed_list.html")]
pub(crate) struct FeedListTemplate<'a> {
    pub rows: &'a [FeedRow],
}

#[derive(Debug, Template)]
#[template(path = "change_badge.html")]
pub(crate) struct ChangeBadgeTemplate<'a> {
    pub class: &'a str,
    pub id: Target,
    pub text: &'a str,
}

/// Widget shell; `badge`, `sparkline` & `feed_list` are already rendered markup.
#[derive(Debug, Template)]
#[template(path = "widget.html")]
pub(crate) struct WidgetTemplate<'a> {
    pub badge: &'a str,
    pub order_count_id: Target,
    pub order_count: &'a str,
    pub sparkline: &'a str,
    pub feed_list_id: Target,
    pub feed_list: &'a str,
}

/// Escape plain text for use as element content.
pub(crate) fn escape(text: &str) -> String {
    render(&TextTemplate { text })
}

/// Render a template, logging and falling back to empty markup on failure.
pub(crate) fn render<T>(template: &T) -> String
where
    T: Template,
{
    match template.render() {
        Ok(markup) => markup,
        Err(error) => {
            error!(%error, "Dashboard template render error");
            String::new()
        }
    }
}
