//! Navigation shell: routes, side navigation and the dark-mode flag.

use std::fmt;

use storage::{PreferenceStore, Preferences};

pub const APP_NAME: &str = "RelateHub";
pub const NOT_FOUND_HEADING: &str = "Page Not Found";
pub const NOT_FOUND_MESSAGE: &str = "The page you're looking for doesn't exist or has been moved. \
Return to the dashboard to continue managing your relationships.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Contacts,
    Deals,
    NotFound(String),
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = trimmed.trim_end_matches('/');
        match normalized {
            "" => Route::Dashboard,
            "/contacts" => Route::Contacts,
            "/deals" => Route::Deals,
            _ => Route::NotFound(trimmed.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Dashboard => "/",
            Route::Contacts => "/contacts",
            Route::Deals => "/deals",
            Route::NotFound(path) => path,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Contacts => "Contacts",
            Route::Deals => "Deals",
            Route::NotFound(_) => NOT_FOUND_HEADING,
        }
    }

    /// Whether the page embeds the contact list.
    pub fn shows_contacts(&self) -> bool {
        matches!(self, Route::Dashboard | Route::Contacts)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

pub const NAV_ITEMS: [NavItem; 3] = [
    NavItem {
        label: "Dashboard",
        path: "/",
    },
    NavItem {
        label: "Contacts",
        path: "/contacts",
    },
    NavItem {
        label: "Deals",
        path: "/deals",
    },
];

/// Dark-mode flag held in memory and written through to the preference
/// store whenever it changes.
#[derive(Debug)]
pub struct ThemeState {
    dark_mode: bool,
    store: Option<PreferenceStore>,
}

impl ThemeState {
    /// Dark when either the stored preference or the platform asks for it.
    /// An unreadable store counts as "nothing stored".
    pub fn load(store: Option<PreferenceStore>, system_prefers_dark: bool) -> Self {
        let stored = match store.as_ref().map(PreferenceStore::load).transpose() {
            Ok(stored) => stored.flatten(),
            Err(err) => {
                tracing::warn!("ignoring unreadable preferences: {err:#}");
                None
            }
        };
        let dark_mode = stored.is_some_and(|p| p.dark_mode) || system_prefers_dark;
        Self { dark_mode, store }
    }

    pub fn in_memory(dark_mode: bool) -> Self {
        Self {
            dark_mode,
            store: None,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.dark_mode
    }

    pub fn toggle(&mut self) -> anyhow::Result<bool> {
        self.set_dark_mode(!self.dark_mode)?;
        Ok(self.dark_mode)
    }

    /// Updates the flag and flushes it. The in-memory value changes even
    /// when the flush fails.
    pub fn set_dark_mode(&mut self, dark_mode: bool) -> anyhow::Result<()> {
        if self.dark_mode == dark_mode {
            return Ok(());
        }
        self.dark_mode = dark_mode;
        tracing::debug!(dark_mode, "theme changed");

        let Some(store) = &self.store else {
            return Ok(());
        };
        store.save(&Preferences { dark_mode }).inspect_err(|err| {
            tracing::warn!("failed to persist theme preference: {err:#}");
        })
    }
}

#[derive(Debug)]
pub struct NavigationShell {
    route: Route,
    theme: ThemeState,
}

impl NavigationShell {
    pub fn new(theme: ThemeState) -> Self {
        Self {
            route: Route::Dashboard,
            theme,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn navigate(&mut self, path: &str) -> &Route {
        let next = Route::from_path(path);
        if let Route::NotFound(path) = &next {
            tracing::debug!(%path, "navigated to unknown route");
        }
        self.route = next;
        &self.route
    }

    pub fn nav_items(&self) -> &'static [NavItem] {
        &NAV_ITEMS
    }

    pub fn is_active(&self, item: &NavItem) -> bool {
        self.route.path() == item.path
    }

    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut ThemeState {
        &mut self.theme
    }
}

pub fn footer_text(year: i32) -> String {
    format!("© {year} {APP_NAME}. All rights reserved.")
}
