use serde::{Deserialize, Serialize};

use super::chart::ChartGeometry;

/// Key under which the host stores the forced theme.
pub const THEME_STORAGE_KEY: &str = "forcedTheme";

/// Light or dark colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn opposite(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::Dark => write!(f, "dark"),
        }
    }
}

/// The user's theme choice. `None` follows the system colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThemePreference {
    pub forced: Option<ThemeMode>,
}

impl ThemePreference {
    /// Effective mode given the current system scheme.
    pub fn resolve(&self, system: ThemeMode) -> ThemeMode {
        self.forced.unwrap_or(system)
    }

    /// Force the opposite of whatever is currently displayed.
    /// Once toggled, the preference no longer follows the system.
    pub fn toggle(&mut self, system: ThemeMode) -> ThemeMode {
        let next = self.resolve(system).opposite();
        self.forced = Some(next);
        next
    }
}

/// User-configurable settings, handed to the host as JSON for storage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Light/dark preference
    #[serde(default)]
    pub theme: ThemePreference,

    /// Canvas placement of the category pie chart
    #[serde(default)]
    pub chart_geometry: ChartGeometry,
}
