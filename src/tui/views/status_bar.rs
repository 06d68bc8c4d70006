//! Status bar view
//!
//! Shows the merchant, integration state and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::services::dashboard::DashboardMode;
use crate::tui::app::{App, InputMode};

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![];

    match &app.profile {
        Some(profile) => {
            spans.push(Span::styled(
                format!(" {} ", profile.merchant_id),
                Style::default().fg(Color::Cyan),
            ));
            spans.push(Span::raw("│ "));

            let mode = DashboardMode::for_profile(profile);
            let color = match mode {
                DashboardMode::Production => Color::Green,
                DashboardMode::Development => Color::Yellow,
            };
            spans.push(Span::styled(
                mode.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
        }
        None => spans.push(Span::styled(
            " No account. Run 'atlas signup'",
            Style::default().fg(Color::Red),
        )),
    }

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Yellow),
        ));
    }

    let hints = match app.input_mode {
        InputMode::Normal => " q:Quit  1-6:Go  Tab:Focus  r:Reload ",
        InputMode::Search => " Enter:Done  Esc:Done ",
    };

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints.len());

    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
