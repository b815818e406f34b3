//! Site configuration: storage keys, selectors, and scroll/reveal tuning.
//!
//! Every field has a default matching the shipped markup, so a page without
//! an embedded config behaves exactly like one with `{}`. A page may override
//! any subset through a JSON blob, which is validated before use.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::error::BehaviorError;

pub const DEFAULT_THEME_KEY: &str = "darkMode";
pub const DEFAULT_LANGUAGE_KEY: &str = "language";
pub const DEFAULT_SHADOW_THRESHOLD_PX: f64 = 100.0;
pub const DEFAULT_SECTION_LOOKAHEAD_PX: f64 = 200.0;
pub const DEFAULT_ANCHOR_MARGIN_PX: f64 = 20.0;
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;
pub const DEFAULT_REVEAL_ROOT_MARGIN: &str = "0px 0px -100px 0px";
pub const DEFAULT_STAGGER_STEP_SECS: f64 = 0.05;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub storage: StorageKeys,
    pub selectors: Selectors,
    pub scroll: ScrollTuning,
    pub reveal: RevealTuning,
    /// `error`, `warn`, `info`, `debug`, or `trace`.
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            storage: StorageKeys::default(),
            selectors: Selectors::default(),
            scroll: ScrollTuning::default(),
            reveal: RevealTuning::default(),
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

/// `localStorage` keys for the two persisted preferences.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageKeys {
    pub theme: String,
    pub language: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self { theme: DEFAULT_THEME_KEY.to_owned(), language: DEFAULT_LANGUAGE_KEY.to_owned() }
    }
}

/// CSS selectors for every element the controllers attach to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selectors {
    pub theme_toggle: String,
    /// Resolved inside the theme toggle.
    pub theme_icon: String,
    pub language_toggle: String,
    /// Resolved inside the language toggle.
    pub language_label: String,
    pub nav: String,
    pub nav_toggle: String,
    pub nav_menu: String,
    pub nav_links: String,
    pub toggle_switches: String,
    pub sections: String,
    pub in_page_links: String,
    pub skill_tags: String,
    pub timeline_items: String,
    pub lazy_images: String,
    pub year: String,
    pub contact_cards: String,
    pub external_links: String,
    pub downloads: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            theme_toggle: "#darkModeToggle".to_owned(),
            theme_icon: "i".to_owned(),
            language_toggle: "#languageToggle".to_owned(),
            language_label: ".lang-text".to_owned(),
            nav: ".nav".to_owned(),
            nav_toggle: ".nav-toggle".to_owned(),
            nav_menu: ".nav-menu".to_owned(),
            nav_links: ".nav-menu a".to_owned(),
            toggle_switches: ".toggle-switches".to_owned(),
            sections: ".section".to_owned(),
            in_page_links: "a[href^=\"#\"]".to_owned(),
            skill_tags: ".skill-tag".to_owned(),
            timeline_items: ".timeline-item".to_owned(),
            lazy_images: "img[data-src]".to_owned(),
            year: "#currentYear".to_owned(),
            contact_cards: ".contact-card".to_owned(),
            external_links: "a[href^=\"http\"]".to_owned(),
            downloads: "a[download]".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollTuning {
    /// Scroll offset past which the nav bar gains its shadow.
    pub shadow_threshold_px: f64,
    /// How far above a section's top the section already counts as current.
    pub section_lookahead_px: f64,
    /// Gap left between the nav bar and an anchor target after scrolling.
    pub anchor_margin_px: f64,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self {
            shadow_threshold_px: DEFAULT_SHADOW_THRESHOLD_PX,
            section_lookahead_px: DEFAULT_SECTION_LOOKAHEAD_PX,
            anchor_margin_px: DEFAULT_ANCHOR_MARGIN_PX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealTuning {
    /// Fraction of an element that must be visible before it reveals.
    pub threshold: f64,
    /// Observer root margin; the negative bottom inset keeps elements from
    /// revealing while they only touch the viewport edge.
    pub root_margin: String,
    /// Per-index `transition-delay` step for skill tags, in seconds.
    pub stagger_step_secs: f64,
}

impl Default for RevealTuning {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_REVEAL_THRESHOLD,
            root_margin: DEFAULT_REVEAL_ROOT_MARGIN.to_owned(),
            stagger_step_secs: DEFAULT_STAGGER_STEP_SECS,
        }
    }
}

impl SiteConfig {
    /// Parse and validate a JSON config blob.
    pub fn from_json(raw: &str) -> Result<Self, BehaviorError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), BehaviorError> {
        if self.storage.theme.trim().is_empty() {
            return Err(invalid("storage.theme", "key must not be empty"));
        }
        if self.storage.language.trim().is_empty() {
            return Err(invalid("storage.language", "key must not be empty"));
        }
        if self.storage.theme == self.storage.language {
            return Err(invalid("storage.language", "key must differ from storage.theme"));
        }
        non_negative("scroll.shadowThresholdPx", self.scroll.shadow_threshold_px)?;
        non_negative("scroll.sectionLookaheadPx", self.scroll.section_lookahead_px)?;
        non_negative("scroll.anchorMarginPx", self.scroll.anchor_margin_px)?;
        non_negative("reveal.staggerStepSecs", self.reveal.stagger_step_secs)?;
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(invalid("reveal.threshold", format!("{} is outside 0..=1", self.reveal.threshold)));
        }
        if !is_root_margin(&self.reveal.root_margin) {
            return Err(invalid(
                "reveal.rootMargin",
                format!("{:?} is not 1 to 4 px/% lengths", self.reveal.root_margin),
            ));
        }
        if self.log_level.parse::<log::Level>().is_err() {
            return Err(invalid("logLevel", format!("unknown level {:?}", self.log_level)));
        }
        Ok(())
    }

    /// Configured log level, falling back to `info` when unparseable.
    #[must_use]
    pub fn log_level(&self) -> log::Level {
        match self.log_level.parse::<log::Level>() {
            Ok(level) => level,
            Err(_) => log::Level::Info,
        }
    }
}

/// CSS-margin shorthand as `IntersectionObserver` accepts it: one to four
/// whitespace-separated lengths, each in `px` or `%`.
fn is_root_margin(raw: &str) -> bool {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    (1..=4).contains(&parts.len())
        && parts.iter().all(|part| {
            let number = part.strip_suffix("px").or_else(|| part.strip_suffix('%'));
            number.is_some_and(|n| n.parse::<f64>().is_ok_and(f64::is_finite))
        })
}

fn invalid(field: &'static str, reason: impl Into<String>) -> BehaviorError {
    BehaviorError::InvalidConfig { field, reason: reason.into() }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), BehaviorError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be a finite non-negative number")))
    }
}
