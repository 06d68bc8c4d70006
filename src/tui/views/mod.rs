//! TUI Views module
//!
//! One view per route, plus the sidebar and status bar.

pub mod customers;
pub mod dashboard;
pub mod pricing;
pub mod sidebar;
pub mod status_bar;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::display::{format_integration_status, format_profile, format_widget_list};
use crate::services::widget::{snippet, Appearance, WidgetKind};

use super::app::{App, FocusedPanel, Route};
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    sidebar::render(frame, app, layout.sidebar);

    match app.route {
        Route::Dashboard => dashboard::render(frame, app, layout.main),
        Route::PricingModel => pricing::render(frame, app, layout.main),
        Route::Customers => customers::render(frame, app, layout.main),
        Route::Widgets => {
            let mut text = format_widget_list();
            text.push('\n');
            text.push_str(&snippet(WidgetKind::PricingPage, &Appearance::default()));
            text.push_str("\n\nCustomize with 'atlas widgets snippet <widget> --color ...'");
            render_message(frame, app, layout.main, "Widgets", &text);
        }
        Route::Integrations => {
            let text = match &app.profile {
                Some(profile) => format_integration_status(profile),
                None => "Sign up to connect integrations.".to_string(),
            };
            render_message(frame, app, layout.main, "Integrations", &text);
        }
        Route::Profile => {
            let text = match &app.profile {
                Some(profile) => format_profile(profile),
                None => "No account yet. Run 'atlas signup'.".to_string(),
            };
            render_message(frame, app, layout.main, "Profile", &text);
        }
    }

    status_bar::render(frame, app, layout.status_bar);
}

/// Bordered block for the main panel, highlighted when focused
fn main_block(app: &App, title: &str) -> Block<'static> {
    let border_color = if app.focused_panel == FocusedPanel::Main {
        Color::Magenta
    } else {
        Color::DarkGray
    };

    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
}

/// Render plain text in the main panel
fn render_message(frame: &mut Frame, app: &App, area: Rect, title: &str, text: &str) {
    let paragraph = Paragraph::new(text.to_string())
        .block(main_block(app, title))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll_offset, 0));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::AtlasPaths;
    use crate::config::settings::Settings;
    use crate::services::profile::ProfileService;
    use crate::storage::Storage;
    use ratatui::{backend::TestBackend, Terminal};
    use tempfile::TempDir;

    fn rendered(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let mut text = String::new();
        for row in buffer.content.chunks(width) {
            for cell in row {
                text.push_str(cell.symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_every_route_renders() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(AtlasPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        ProfileService::new(&storage)
            .sign_up("ada@example.com", "hunter22!")
            .unwrap();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        let screen = rendered(&mut app);
        assert!(screen.contains("Dashboard (Development)"));
        assert!(screen.contains("Onboarding Progress"));

        app.select_route(Route::PricingModel);
        assert!(rendered(&mut app).contains("Enterprise"));

        app.select_route(Route::Customers);
        assert!(rendered(&mut app).contains("Acme Corp"));

        app.select_route(Route::Profile);
        assert!(rendered(&mut app).contains("ada@example.com"));
    }

    #[test]
    fn test_dashboard_without_profile() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(AtlasPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        let screen = rendered(&mut app);
        assert!(screen.contains("Sign up to see your dashboard."));
        assert!(screen.contains("No account"));
    }
}
