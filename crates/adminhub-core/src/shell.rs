//! Navigation and layout state
//!
//! [`Shell`] is owned by the application and handed to rendering by
//! reference. Nothing here is global.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Page addressed by a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Dashboard,
    Clients,
    Reports,
    Settings,
    Profile,
    Billing,
    Team,
    NotFound,
}

impl Route {
    /// Every routable page, in route table order
    pub const ALL: [Route; 7] = [
        Self::Dashboard,
        Self::Clients,
        Self::Reports,
        Self::Settings,
        Self::Profile,
        Self::Billing,
        Self::Team,
    ];

    /// Pages listed in the sidebar
    pub const SIDEBAR: [Route; 4] = [Self::Dashboard, Self::Clients, Self::Reports, Self::Settings];

    /// Pages listed in the account menu
    pub const ACCOUNT_MENU: [Route; 3] = [Self::Billing, Self::Team, Self::Profile];

    pub fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Clients => "/clients",
            Self::Reports => "/reports",
            Self::Settings => "/settings",
            Self::Profile => "/settings/profile",
            Self::Billing => "/billing",
            Self::Team => "/team",
            Self::NotFound => "*",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Clients => "Clients",
            Self::Reports => "Reports",
            Self::Settings => "Settings",
            Self::Profile => "Profile",
            Self::Billing => "Billing",
            Self::Team => "Team",
            Self::NotFound => "Not Found",
        }
    }

    /// Resolve a path; anything unknown is [`Route::NotFound`]
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };

        Self::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
            .unwrap_or(Self::NotFound)
    }
}

/// Color scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    /// Dark becomes light, anything else becomes dark
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light | Self::System => Self::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Pages remembered for [`Shell::back`]
const HISTORY_LIMIT: usize = 32;

/// Layout view model: current page, sidebar and menu visibility, theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    route: Route,
    history: VecDeque<Route>,
    pub sidebar_open: bool,
    pub mobile_menu_open: bool,
    pub theme: Theme,
}

impl Default for Shell {
    fn default() -> Self {
        Self {
            route: Route::Dashboard,
            history: VecDeque::new(),
            sidebar_open: true,
            mobile_menu_open: false,
            theme: Theme::default(),
        }
    }
}

impl Shell {
    pub fn route(&self) -> Route {
        self.route
    }

    /// Go to `route`, closing the account menu
    pub fn navigate(&mut self, route: Route) {
        if route != self.route {
            debug!(from = self.route.path(), to = route.path(), "Navigate");
            self.history.push_back(self.route);
            if self.history.len() > HISTORY_LIMIT {
                self.history.pop_front();
            }
            self.route = route;
        }
        self.mobile_menu_open = false;
    }

    /// Go to whatever page `path` resolves to
    pub fn navigate_path(&mut self, path: &str) -> Route {
        let route = Route::from_path(path);
        self.navigate(route);
        route
    }

    /// Return to the previous page, if any
    pub fn back(&mut self) -> bool {
        match self.history.pop_back() {
            Some(previous) => {
                self.route = previous;
                true
            }
            None => false,
        }
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/", Route::Dashboard)]
    #[case("", Route::Dashboard)]
    #[case("/clients", Route::Clients)]
    #[case("/clients/", Route::Clients)]
    #[case("/settings/profile", Route::Profile)]
    #[case("/billing", Route::Billing)]
    #[case("/team", Route::Team)]
    #[case("/nope", Route::NotFound)]
    #[case("/settings/unknown", Route::NotFound)]
    fn test_from_path(#[case] path: &str, #[case] expected: Route) {
        assert_eq!(Route::from_path(path), expected);
    }

    #[test]
    fn test_route_paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }

    #[test]
    fn test_navigate_closes_menu_and_records_history() {
        let mut shell = Shell::default();
        shell.toggle_mobile_menu();
        shell.navigate(Route::Billing);

        assert_eq!(shell.route(), Route::Billing);
        assert!(!shell.mobile_menu_open);
        assert!(shell.back());
        assert_eq!(shell.route(), Route::Dashboard);
        assert!(!shell.back());
    }

    #[test]
    fn test_history_keeps_most_recent_pages() {
        let mut shell = Shell::default();
        for i in 0..100 {
            shell.navigate(if i % 2 == 0 { Route::Clients } else { Route::Reports });
        }

        let mut steps = 0;
        while shell.back() {
            steps += 1;
        }
        assert_eq!(steps, HISTORY_LIMIT);
        assert_eq!(shell.route(), Route::Reports);
    }

    #[test]
    fn test_navigate_path_resolves_route() {
        let mut shell = Shell::default();
        assert_eq!(shell.navigate_path("/reports/"), Route::Reports);
        assert_eq!(shell.navigate_path("/nowhere"), Route::NotFound);
        assert_eq!(shell.route(), Route::NotFound);
        assert!(shell.back());
        assert_eq!(shell.route(), Route::Reports);
    }

    #[test]
    fn test_theme_toggle() {
        let mut shell = Shell::default();
        shell.toggle_theme();
        assert_eq!(shell.theme, Theme::Dark);
        shell.toggle_theme();
        assert_eq!(shell.theme, Theme::Light);
        assert!(!shell.theme.is_dark());
    }
}
