//! Pricing model view

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use crate::display::plan::format_analytics;
use crate::services::pricing::analytics;
use crate::tui::app::App;
use crate::tui::layout::split_header;

use super::main_block;

/// Render the plans table with analytics below
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = main_block(app, "Pricing Model");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let currency = app.settings.currency_symbol.as_str();
    let table_height = app.plans.len() as u16 + 3;
    let (table_area, analytics_area) = split_header(inner, table_height);

    let rows: Vec<Row> = app
        .plans
        .iter()
        .map(|plan| {
            let features: Vec<String> = plan.features.iter().map(|f| f.to_string()).collect();
            let trial = if plan.trial_available {
                format!("{} days", plan.trial_days)
            } else {
                "-".to_string()
            };
            Row::new(vec![
                plan.name.clone(),
                plan.plan_type.to_string(),
                plan.price_label(currency),
                trial,
                if plan.default_on_cancel { "yes" } else { "" }.to_string(),
                features.join(", "),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Length(7),
            Constraint::Length(14),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Min(20),
        ],
    )
    .header(
        Row::new(vec!["Plan", "Type", "Price", "Trial", "Default", "Features"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().title(" Plans ").borders(Borders::ALL));
    frame.render_widget(table, table_area);

    let summary = Paragraph::new(format_analytics(&analytics(&app.plans), currency))
        .scroll((app.scroll_offset, 0))
        .style(Style::default().fg(Color::White))
        .block(Block::default().title(" Analytics ").borders(Borders::ALL));
    frame.render_widget(summary, analytics_area);
}
