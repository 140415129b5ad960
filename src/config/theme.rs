use serde::Serialize;

pub const THEME_NAME: &str = "zkonnect";

/// Theme settings the client applies at its root. The theme is forced, so
/// there is nothing to persist per user.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ThemeSettings {
    pub attribute: &'static str,
    pub default_theme: &'static str,
    pub forced_theme: Option<&'static str>,
    pub enable_system: bool,
    pub disable_transition_on_change: bool,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            attribute: "data-theme",
            default_theme: THEME_NAME,
            forced_theme: Some(THEME_NAME),
            enable_system: false,
            disable_transition_on_change: true,
        }
    }
}

impl ThemeSettings {
    /// Theme the client ends up rendering.
    pub fn active(&self) -> &'static str {
        self.forced_theme.unwrap_or(self.default_theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_is_forced() {
        let theme = ThemeSettings::default();
        assert_eq!(theme.active(), "zkonnect");
        assert!(!theme.enable_system);
        assert_eq!(theme.attribute, "data-theme");
    }
}
