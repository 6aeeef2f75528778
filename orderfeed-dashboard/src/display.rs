use crate::{
    feed::{FeedView, render_feed},
    sparkline::{SparklineConfig, SparklineView, render_sparkline},
    summary::{ChangeBadge, SummaryView, render_summary},
};
use orderfeed::aggregate::OrderAggregate;
use prettytable::{Cell, Row, Table, format::consts::FORMAT_BOX_CHARS};

/// Block glyphs used to draw sparkline bars in the terminal, lowest to highest.
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Print the summary, sparkline & feed of an [`OrderAggregate`] to stdout.
pub fn print_dashboard(aggregate: &OrderAggregate, sparkline: &SparklineConfig) {
    println!();
    render_summary(aggregate).table().printstd();
    render_sparkline(&aggregate.volume_buckets, sparkline, false)
        .table()
        .printstd();
    render_feed(&aggregate.recent_orders, false).table().printstd();
}

fn title_table(title: &str, num_columns: usize) -> Table {
    let mut table = Table::new();
    table.set_format(*FORMAT_BOX_CHARS);

    let mut title_cell = Cell::new(title).style_spec("bcB");
    title_cell.set_hspan(num_columns);
    table.add_row(Row::new(vec![title_cell]));

    table
}

impl SummaryView {
    pub fn table(&self) -> Table {
        let mut table = title_table("Live Orders", 2);

        table.add_row(Row::new(vec![
            Cell::new("Orders").style_spec("b"),
            Cell::new(&self.order_count),
        ]));
        table.add_row(Row::new(vec![
            Cell::new("Change").style_spec("b"),
            Cell::new(&format!("{:+}", self.change)),
        ]));

        // Green when growing, red when shrinking
        let style = match self.badge {
            ChangeBadge::Positive(_) => "Fg",
            ChangeBadge::Negative(_) => "Fr",
            ChangeBadge::Unavailable => "",
        };
        table.add_row(Row::new(vec![
            Cell::new("Badge").style_spec("b"),
            Cell::new(&self.badge.text()).style_spec(style),
        ]));

        table
    }
}

impl SparklineView {
    /// Single row of block glyphs scaled by each bar's ratio, plus the raw bucket values.
    pub fn table(&self) -> Table {
        let mut table = title_table("Order Volume", 2);

        let glyphs = self
            .bars
            .iter()
            .map(|bar| {
                let level = (bar.ratio * (BLOCKS.len() - 1) as f64).round() as usize;
                BLOCKS[level.min(BLOCKS.len() - 1)]
            })
            .collect::<String>();

        let values = self
            .bars
            .iter()
            .map(|bar| bar.value.to_string())
            .collect::<Vec<_>>()
            .join(" ");

        table.add_row(Row::new(vec![
            Cell::new("Buckets").style_spec("b"),
            Cell::new(&glyphs),
        ]));
        table.add_row(Row::new(vec![
            Cell::new("Values").style_spec("b"),
            Cell::new(&values),
        ]));

        table
    }
}

impl FeedView {
    pub fn table(&self) -> Table {
        let mut table = title_table("Recent Orders", 3);

        table.add_row(Row::new(vec![
            Cell::new("Customer").style_spec("bcB"),
            Cell::new("Details").style_spec("bcB"),
            Cell::new("Amount").style_spec("bcB"),
        ]));

        for row in &self.rows {
            table.add_row(Row::new(vec![
                Cell::new(&row.name),
                Cell::new(&row.meta),
                Cell::new(&row.amount).style_spec("r"),
            ]));
        }

        table
    }
}
