//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.

use crate::config::settings::Settings;
use crate::models::{Plan, UserProfile};
use crate::services::pricing::PricingService;
use crate::services::profile::ProfileService;
use crate::storage::Storage;

/// A screen reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Dashboard,
    PricingModel,
    Customers,
    Widgets,
    Integrations,
    Profile,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Dashboard,
        Route::PricingModel,
        Route::Customers,
        Route::Widgets,
        Route::Integrations,
        Route::Profile,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::PricingModel => "Pricing Model",
            Self::Customers => "Customers",
            Self::Widgets => "Widgets",
            Self::Integrations => "Integrations",
            Self::Profile => "Profile",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|r| r == self).unwrap_or(0)
    }
}

/// Which panel currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPanel {
    #[default]
    Sidebar,
    Main,
}

/// Mode of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a customer search term
    Search,
}

/// Main application state
pub struct App<'a> {
    /// The storage layer
    pub storage: &'a Storage,

    /// Application settings
    pub settings: &'a Settings,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Currently shown route
    pub route: Route,

    /// Which panel is focused
    pub focused_panel: FocusedPanel,

    /// Current input mode
    pub input_mode: InputMode,

    /// Scroll offset for the main view
    pub scroll_offset: u16,

    /// Customer search term
    pub customer_search: String,

    /// Status message to display
    pub status_message: Option<String>,

    /// Profile as last loaded
    pub profile: Option<UserProfile>,

    /// Plans as last loaded (starter plans when none are stored)
    pub plans: Vec<Plan>,
}

impl<'a> App<'a> {
    /// Create a new App instance
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        let mut app = Self {
            storage,
            settings,
            should_quit: false,
            route: Route::default(),
            focused_panel: FocusedPanel::default(),
            input_mode: InputMode::default(),
            scroll_offset: 0,
            customer_search: String::new(),
            status_message: None,
            profile: None,
            plans: Vec::new(),
        };
        app.reload();
        app
    }

    /// Re-read the profile and plans from storage
    pub fn reload(&mut self) {
        self.profile = ProfileService::new(self.storage).current().ok().flatten();
        self.plans = PricingService::new(self.storage)
            .load()
            .map(|editor| editor.into_plans())
            .unwrap_or_default();
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Show a route, resetting the scroll position
    pub fn select_route(&mut self, route: Route) {
        if self.route != route {
            self.route = route;
            self.scroll_offset = 0;
        }
    }

    pub fn next_route(&mut self) {
        let next = (self.route.index() + 1) % Route::ALL.len();
        self.select_route(Route::ALL[next]);
    }

    pub fn previous_route(&mut self) {
        let len = Route::ALL.len();
        let previous = (self.route.index() + len - 1) % len;
        self.select_route(Route::ALL[previous]);
    }

    /// Toggle focus between sidebar and main panel
    pub fn toggle_panel_focus(&mut self) {
        self.focused_panel = match self.focused_panel {
            FocusedPanel::Sidebar => FocusedPanel::Main,
            FocusedPanel::Main => FocusedPanel::Sidebar,
        };
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
