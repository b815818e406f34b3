//! Fixed class names, glyphs, and style values shared by the controllers.

// ── Theme ───────────────────────────────────────────────────────

/// Body class present while dark mode is active.
pub const DARK_MODE_CLASS: &str = "dark-mode";

/// Icon classes shown on the theme toggle. Dark mode offers the sun.
pub const ICON_DARK: &str = "fas fa-sun";
pub const ICON_LIGHT: &str = "fas fa-moon";

/// Stored flag values for the theme preference.
pub const THEME_ENABLED: &str = "enabled";
pub const THEME_DISABLED: &str = "disabled";

// ── Localization ────────────────────────────────────────────────

/// Body class present while the document reads right-to-left.
pub const RTL_CLASS: &str = "rtl";

// ── Navigation ──────────────────────────────────────────────────

/// Class marking the open menu and the highlighted nav link.
pub const ACTIVE_CLASS: &str = "active";

/// Shadow applied to the nav bar once the page is scrolled.
pub const NAV_SHADOW: &str = "0 4px 20px rgba(43, 43, 43, 0.1)";

pub const ARIA_EXPANDED: &str = "aria-expanded";

pub const ESCAPE_KEY: &str = "Escape";

// ── Reveal ──────────────────────────────────────────────────────

pub const REVEALED_OPACITY: &str = "1";

/// Resting transform for revealed elements and un-hovered cards.
pub const REST_TRANSFORM: &str = "translateY(0)";

/// Annotation holding an image source that has not been loaded yet.
pub const PENDING_SRC_ATTR: &str = "data-src";

// ── Misc ────────────────────────────────────────────────────────

pub const CARD_HOVER_TRANSFORM: &str = "translateY(-8px)";

pub const EXTERNAL_TARGET: &str = "_blank";
pub const EXTERNAL_REL: &str = "noopener noreferrer";
