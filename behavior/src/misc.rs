//! Small stateless page touches: footer year, external-link hardening,
//! placeholder-link suppression, contact-card hover, download logging.

#[cfg(test)]
#[path = "misc_test.rs"]
mod misc_test;

use crate::config::SiteConfig;
use crate::consts::{CARD_HOVER_TRANSFORM, EXTERNAL_REL, EXTERNAL_TARGET, REST_TRANSFORM};
use crate::document::{DocumentView, Effect};

/// Write `year` into the footer year element, if present.
pub fn stamp_year<D: DocumentView>(doc: &D, config: &SiteConfig, year: u32) -> Vec<Effect<D::Node>> {
    doc.query(&config.selectors.year)
        .map(|node| Effect::set_text(node, year.to_string()))
        .into_iter()
        .collect()
}

/// Open external links in a new tab without handing over `window.opener`.
/// Links that already choose a target are left alone.
pub fn harden_external_links<D: DocumentView>(doc: &D, config: &SiteConfig) -> Vec<Effect<D::Node>> {
    doc.query_all(&config.selectors.external_links)
        .into_iter()
        .filter(|link| !doc.has_attribute(link, "target"))
        .flat_map(|link| {
            [
                Effect::set_attribute(link.clone(), "target", EXTERNAL_TARGET),
                Effect::set_attribute(link, "rel", EXTERNAL_REL),
            ]
        })
        .collect()
}

/// Whether a click on `node` hit a bare `#` link whose navigation should
/// be suppressed.
pub fn is_placeholder_link<D: DocumentView>(doc: &D, node: &D::Node) -> bool {
    doc.tag_name(node).eq_ignore_ascii_case("a") && doc.attribute(node, "href").as_deref() == Some("#")
}

/// Lift a contact card while hovered.
pub fn card_hover<N>(card: N, entering: bool) -> Effect<N> {
    let transform = if entering { CARD_HOVER_TRANSFORM } else { REST_TRANSFORM };
    Effect::set_style(card, "transform", transform)
}

/// Record a resume download. Logged only; nothing is transmitted.
pub fn log_download(href: Option<&str>) {
    log::info!("Resume download initiated: {}", href.unwrap_or("<no href>"));
}

/// One-time greeting for anyone reading the console.
pub fn log_greeting() {
    log::info!("Hello, fellow developer!");
    log::info!("Interested in the code? Check out the repository or get in touch!");
}
