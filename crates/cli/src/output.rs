//! Terminal rendering of dashboard pages.

use colored::Colorize;
use tabled::{builder::Builder, settings::Style};

use portfolio_dashboard_core::models::chart::{BarChart, LineChart};
use portfolio_dashboard_core::models::news::Article;
use portfolio_dashboard_core::models::view::{RenderedView, TableWidget, Widget};
use portfolio_dashboard_core::PortfolioDashboard;

use crate::cli::OutputFormat;

/// Width of the longest bar, in characters.
const BAR_WIDTH: usize = 40;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Prints a rendered page in the requested format.
pub fn print_view(page: &RenderedView, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", PortfolioDashboard::view_to_json(page)?),
        OutputFormat::Table => {
            print_header(&page.title);
            for widget in &page.widgets {
                print_widget(widget);
            }
        }
    }
    Ok(())
}

fn print_widget(widget: &Widget) {
    match widget {
        Widget::Subheader(text) => println!("\n{}", text.bold()),
        Widget::Table(table) => println!("{}", render_table(table)),
        Widget::BarChart(chart) => print_bar_chart(chart),
        Widget::LineChart(chart) => print_line_chart(chart),
        Widget::Metric { label, value } => println!("{}: {}", label, value.bold()),
        Widget::Info(msg) => print_info(msg),
        Widget::Success(msg) => print_success(msg),
        Widget::Warning(msg) => print_warning(msg),
        Widget::Article(article) => print_article(article),
        Widget::Divider => print_divider(),
    }
}

fn render_table(table: &TableWidget) -> String {
    if table.rows.is_empty() {
        return "No rows.".to_string();
    }
    let mut builder = Builder::default();
    builder.push_record(table.columns.iter().cloned());
    for row in &table.rows {
        builder.push_record(row.iter().cloned());
    }
    builder.build().with(Style::rounded()).to_string()
}

fn print_bar_chart(chart: &BarChart) {
    if let Some(title) = &chart.title {
        println!("{}", title.italic());
    }
    println!("{}", chart.value_label.dimmed());
    if chart.bars.is_empty() {
        println!("  (no data)");
        return;
    }

    let label_width = chart.bars.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);
    let max = chart.bars.iter().map(|b| b.value.abs()).fold(0.0_f64, f64::max);
    let diverging = chart.zero_baseline && chart.bars.iter().any(|b| b.value < 0.0);

    for bar in &chart.bars {
        let len = bar_len(bar.value, max, BAR_WIDTH);
        let fill = "█".repeat(len);
        let value = format!("{:.2}", bar.value);
        if diverging {
            // Negative bars grow left of the zero line, positive ones right
            let (left, right) = if bar.value < 0.0 {
                (format!("{}{}", " ".repeat(BAR_WIDTH.saturating_sub(len)), fill.red()), String::new())
            } else {
                (" ".repeat(BAR_WIDTH), fill.green().to_string())
            };
            println!("  {:<label_width$} {left}│{right} {value}", bar.label);
        } else {
            let fill = if bar.value < 0.0 {
                fill.red()
            } else {
                fill.green()
            };
            println!("  {:<label_width$} {fill} {value}", bar.label);
        }
    }
}

fn print_line_chart(chart: &LineChart) {
    let (Some(first), Some(last)) = (chart.points.first(), chart.points.last()) else {
        println!("{}: (no data)", chart.series_label);
        return;
    };
    let values: Vec<f64> = chart.points.iter().map(|p| p.value).collect();
    println!("{}", chart.series_label.dimmed());
    println!("  {}", sparkline(&values).cyan());
    println!(
        "  {} {:.2}  →  {} {:.2}",
        first.date, first.value, last.date, last.value
    );
}

fn print_article(article: &Article) {
    println!("\n{}", article.title.bold());
    if let Some(description) = &article.description {
        println!("{description}");
    }
    println!("{}", article.url.dimmed());
}

/// Number of bar cells for `value` when `max` fills `width` cells.
fn bar_len(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || !value.is_finite() {
        return 0;
    }
    ((value.abs() / max) * width as f64).round() as usize
}

/// One block character per value, scaled between the series min and max.
fn sparkline(values: &[f64]) -> String {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let top = SPARK_LEVELS.len() - 1;
    values
        .iter()
        .map(|v| {
            let level = if span > 0.0 {
                (((v - min) / span) * top as f64).round() as usize
            } else {
                top / 2
            };
            SPARK_LEVELS[level.min(top)]
        })
        .collect()
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Prints a header for a page.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Prints a divider line.
pub fn print_divider() {
    println!("{}", "─".repeat(60).dimmed());
}
