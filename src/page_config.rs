//! Page-embedded configuration.
//!
//! A page may carry `<script type="application/json" id="portfolio-config">`
//! with a partial [`SiteConfig`]. Absent or blank means defaults; a broken
//! blob also means defaults, with the error handed back for logging once
//! the logger is up.

#[cfg(test)]
#[path = "page_config_test.rs"]
mod page_config_test;

use behavior::config::SiteConfig;
use behavior::error::BehaviorError;

pub const CONFIG_ELEMENT_ID: &str = "portfolio-config";

/// Turn the embedded text into a config, reporting why defaults were used.
pub fn resolve(raw: Option<&str>) -> (SiteConfig, Option<BehaviorError>) {
    match raw.map(str::trim).filter(|text| !text.is_empty()) {
        None => (SiteConfig::default(), None),
        Some(text) => match SiteConfig::from_json(text) {
            Ok(config) => (config, None),
            Err(err) => (SiteConfig::default(), Some(err)),
        },
    }
}

/// Read and resolve the config element from `document`.
#[cfg(feature = "hydrate")]
pub fn load(document: &web_sys::Document) -> (SiteConfig, Option<BehaviorError>) {
    let raw = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content());
    resolve(raw.as_deref())
}
