use super::*;
use crate::document::apply;
use crate::memory::MemoryDocument;

#[test]
fn stamps_year_into_footer() {
    let mut doc = MemoryDocument::new();
    let body = doc.body_node();
    let year = doc.append_text(body, "span", &[("id", "currentYear")], "2024");
    let effects = stamp_year(&doc, &SiteConfig::default(), 2026);
    apply(&mut doc, effects);
    assert_eq!(doc.text(year), "2026");
}

#[test]
fn missing_year_element_is_skipped() {
    let doc = MemoryDocument::new();
    assert!(stamp_year(&doc, &SiteConfig::default(), 2026).is_empty());
}

#[test]
fn external_links_without_target_are_hardened() {
    let mut doc = MemoryDocument::new();
    let body = doc.body_node();
    let plain = doc.append(body, "a", &[("href", "https://github.com/someone")]);
    let chosen = doc.append(body, "a", &[("href", "http://example.com"), ("target", "_self")]);
    let internal = doc.append(body, "a", &[("href", "#about")]);

    let effects = harden_external_links(&doc, &SiteConfig::default());
    apply(&mut doc, effects);

    assert_eq!(doc.attribute(&plain, "target").as_deref(), Some("_blank"));
    assert_eq!(doc.attribute(&plain, "rel").as_deref(), Some("noopener noreferrer"));
    assert_eq!(doc.attribute(&chosen, "target").as_deref(), Some("_self"));
    assert!(!doc.has_attribute(&chosen, "rel"));
    assert!(!doc.has_attribute(&internal, "target"));
}

#[test]
fn only_bare_hash_anchors_are_placeholders() {
    let mut doc = MemoryDocument::new();
    let body = doc.body_node();
    let bare = doc.append(body, "a", &[("href", "#")]);
    let section = doc.append(body, "a", &[("href", "#about")]);
    let button = doc.append(body, "button", &[("href", "#")]);
    let no_href = doc.append(body, "a", &[]);

    assert!(is_placeholder_link(&doc, &bare));
    assert!(!is_placeholder_link(&doc, &section));
    assert!(!is_placeholder_link(&doc, &button));
    assert!(!is_placeholder_link(&doc, &no_href));
}

#[test]
fn card_hover_lifts_and_rests() {
    assert_eq!(card_hover(1_u8, true), Effect::set_style(1_u8, "transform", "translateY(-8px)"));
    assert_eq!(card_hover(1_u8, false), Effect::set_style(1_u8, "transform", "translateY(0)"));
}

#[test]
fn logging_helpers_are_callable_without_logger() {
    log_download(Some("/assets/resume.pdf"));
    log_download(None);
    log_greeting();
}
