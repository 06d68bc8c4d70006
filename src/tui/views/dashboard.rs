//! Dashboard view
//!
//! Development mode shows the onboarding checklist; production mode shows
//! metrics and recent activity.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, List, ListItem, Paragraph, Row, Table},
    Frame,
};

use crate::display::format_dollars;
use crate::models::UserProfile;
use crate::services::dashboard::{
    checklist, checklist_progress, next_steps, recent_activity, DashboardMode, SAMPLE_METRICS,
};
use crate::tui::app::App;
use crate::tui::layout::split_header;

use super::{main_block, render_message};

/// Render the dashboard
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(profile) = &app.profile else {
        render_message(frame, app, area, "Dashboard", "Sign up to see your dashboard.");
        return;
    };

    let mode = DashboardMode::for_profile(profile);
    let block = main_block(app, &format!("Dashboard ({})", mode));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match mode {
        DashboardMode::Development => render_development(frame, profile, inner),
        DashboardMode::Production => render_production(frame, app, inner),
    }
}

fn render_development(frame: &mut Frame, profile: &UserProfile, area: Rect) {
    let (gauge_area, rest) = split_header(area, 3);
    let items = checklist(profile);

    let gauge = Gauge::default()
        .block(Block::default().title(" Onboarding Progress ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Magenta))
        .percent(u16::from(checklist_progress(&items)));
    frame.render_widget(gauge, gauge_area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rest);

    let checklist_items: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let (mark, color) = if item.completed {
                ("[x] ", Color::Green)
            } else {
                ("[ ] ", Color::DarkGray)
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, Style::default().fg(color)),
                Span::raw(item.name),
            ]))
        })
        .collect();
    frame.render_widget(
        List::new(checklist_items)
            .block(Block::default().title(" Checklist ").borders(Borders::ALL)),
        columns[0],
    );

    let steps: Vec<ListItem> = next_steps(profile)
        .into_iter()
        .map(|(label, command)| {
            ListItem::new(vec![
                Line::from(label),
                Line::from(Span::styled(
                    format!("  {}", command),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();
    frame.render_widget(
        List::new(steps).block(Block::default().title(" Next Steps ").borders(Borders::ALL)),
        columns[1],
    );
}

fn render_production(frame: &mut Frame, app: &App, area: Rect) {
    let (metrics_area, rest) = split_header(area, 4);
    let currency = app.settings.currency_symbol.as_str();
    let metrics = SAMPLE_METRICS;

    let cards = [
        ("Monthly Revenue", format_dollars(metrics.mrr, currency), metrics.mrr_growth),
        ("Annual Revenue", format_dollars(metrics.arr, currency), metrics.arr_growth),
        ("Customers", metrics.customers.to_string(), metrics.customer_growth),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(metrics_area);

    for ((title, value, growth), column) in cards.into_iter().zip(columns.iter()) {
        let text = vec![
            Line::from(Span::styled(value, Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(
                format!("+{:.1}% from last month", growth),
                Style::default().fg(Color::Green),
            )),
        ];
        frame.render_widget(
            Paragraph::new(text).block(
                Block::default()
                    .title(format!(" {} ", title))
                    .borders(Borders::ALL),
            ),
            *column,
        );
    }

    let rows: Vec<Row> = recent_activity()
        .into_iter()
        .map(|item| {
            let amount = item
                .amount
                .map(|a| format_dollars(u64::from(a), currency))
                .unwrap_or_default();
            Row::new(vec![
                Cell::from(item.kind.to_string()),
                Cell::from(item.customer),
                Cell::from(item.description),
                Cell::from(amount),
                Cell::from(Span::styled(item.when, Style::default().fg(Color::DarkGray))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(13),
            Constraint::Length(15),
            Constraint::Min(20),
            Constraint::Length(7),
            Constraint::Length(14),
        ],
    )
    .header(
        Row::new(vec!["Event", "Customer", "Description", "Amount", "When"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().title(" Recent Activity ").borders(Borders::ALL));

    frame.render_widget(table, rest);
}
