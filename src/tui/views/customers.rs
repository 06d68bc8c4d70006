//! Customers view

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use crate::services::dashboard::{search_customers, CustomerStatus};
use crate::tui::app::{App, InputMode};
use crate::tui::layout::split_header;

use super::main_block;

/// Render the search box and the matching customers
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = main_block(app, "Customers");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (search_area, table_area) = split_header(inner, 3);

    let searching = app.input_mode == InputMode::Search;
    let search = Paragraph::new(Line::from(vec![
        Span::raw(app.customer_search.as_str()),
        Span::styled(if searching { "_" } else { "" }, Style::default().fg(Color::Yellow)),
    ]))
    .block(
        Block::default()
            .title(" Search (/) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if searching {
                Color::Yellow
            } else {
                Color::DarkGray
            })),
    );
    frame.render_widget(search, search_area);

    let rows: Vec<Row> = search_customers(&app.customer_search)
        .into_iter()
        .skip(app.scroll_offset as usize)
        .map(|c| {
            let status_color = match c.status {
                CustomerStatus::Active => Color::Green,
                CustomerStatus::Inactive => Color::DarkGray,
            };
            Row::new(vec![
                Span::raw(c.company_name),
                Span::raw(c.subscription),
                Span::raw(c.start_date.format("%Y-%m-%d").to_string()),
                Span::raw(c.contact_name),
                Span::raw(c.email),
                Span::styled(c.status.to_string(), Style::default().fg(status_color)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(18),
            Constraint::Length(12),
            Constraint::Length(11),
            Constraint::Length(16),
            Constraint::Min(20),
            Constraint::Length(9),
        ],
    )
    .header(
        Row::new(vec!["Company", "Plan", "Since", "Contact", "Email", "Status"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(table, table_area);
}
