//! Light/dark theme toggle.
//!
//! The preference is read once at startup and rendered without animation;
//! each toggle flips it, re-renders the body class and the toggle's icon
//! glyph, and persists the new value.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use crate::config::SiteConfig;
use crate::consts::{DARK_MODE_CLASS, ICON_DARK, ICON_LIGHT, THEME_DISABLED, THEME_ENABLED};
use crate::document::{DocumentView, Effect};
use crate::preferences::{PreferenceStore, read_or_absent, write_or_warn};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    /// Decode the stored flag. Anything but `"enabled"` means light.
    #[must_use]
    pub fn from_stored(raw: Option<&str>) -> Self {
        match raw {
            Some(THEME_ENABLED) => Self::Dark,
            _ => Self::Light,
        }
    }

    #[must_use]
    pub fn as_stored(self) -> &'static str {
        match self {
            Self::Light => THEME_DISABLED,
            Self::Dark => THEME_ENABLED,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// Icon offered on the toggle: the sun while dark, the moon while light.
    #[must_use]
    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Light => ICON_LIGHT,
            Self::Dark => ICON_DARK,
        }
    }
}

/// Owns the theme preference and the elements it renders onto.
#[derive(Debug, Clone)]
pub struct ThemeController<N> {
    preference: ThemePreference,
    toggle: N,
    icon: Option<N>,
    body: Option<N>,
    storage_key: String,
}

impl<N: Clone> ThemeController<N> {
    /// Resolve the toggle and its icon. `None` when the page has no toggle.
    pub fn mount<D: DocumentView<Node = N>>(doc: &D, config: &SiteConfig) -> Option<Self> {
        let toggle = doc.query(&config.selectors.theme_toggle)?;
        let icon = doc.query_within(&toggle, &config.selectors.theme_icon);
        Some(Self {
            preference: ThemePreference::Light,
            toggle,
            icon,
            body: doc.body(),
            storage_key: config.storage.theme.clone(),
        })
    }

    #[must_use]
    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    /// The element whose activation calls [`ThemeController::toggle`].
    pub fn toggle_node(&self) -> &N {
        &self.toggle
    }

    /// Load the stored preference (light when absent) and render it.
    pub fn initialize<S: PreferenceStore + ?Sized>(&mut self, store: &S) -> Vec<Effect<N>> {
        let stored = read_or_absent(store, &self.storage_key);
        self.preference = ThemePreference::from_stored(stored.as_deref());
        log::debug!("theme initialized: {:?}", self.preference);
        self.render()
    }

    /// Flip the preference, render it, and persist it.
    pub fn toggle<S: PreferenceStore + ?Sized>(&mut self, store: &mut S) -> Vec<Effect<N>> {
        self.preference = self.preference.toggled();
        write_or_warn(store, &self.storage_key, self.preference.as_stored());
        self.render()
    }

    fn render(&self) -> Vec<Effect<N>> {
        let mut effects = Vec::with_capacity(2);
        if let Some(body) = &self.body {
            effects.push(Effect::toggle_class(body.clone(), DARK_MODE_CLASS, self.preference.is_dark()));
        }
        if let Some(icon) = &self.icon {
            effects.push(Effect::set_attribute(icon.clone(), "class", self.preference.icon_class()));
        }
        effects
    }
}
