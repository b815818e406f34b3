use super::*;
use crate::document::apply;
use crate::memory::{MemoryDocument, NodeId};
use crate::preferences::MemoryStore;

struct Page {
    doc: MemoryDocument,
    label: NodeId,
    heading: NodeId,
    email: NodeId,
    message: NodeId,
    english_only: NodeId,
}

fn page() -> Page {
    let mut doc = MemoryDocument::new();
    let body = doc.body_node();
    let switches = doc.append(body, "div", &[("class", "toggle-switches")]);
    let toggle = doc.append(switches, "button", &[("id", "languageToggle")]);
    let label = doc.append_text(toggle, "span", &[("class", "lang-text")], "AR");
    let heading = doc.append_text(body, "h1", &[("data-en", "About Me"), ("data-ar", "نبذة عني")], "About Me");
    let email = doc.append(
        body,
        "input",
        &[
            ("data-en", ""),
            ("data-ar", ""),
            ("data-placeholder-en", "Your email"),
            ("data-placeholder-ar", "بريدك الإلكتروني"),
            ("placeholder", "Your email"),
        ],
    );
    let message = doc.append(
        body,
        "textarea",
        &[("data-placeholder-en", "Message"), ("data-placeholder-ar", "رسالتك"), ("placeholder", "Message")],
    );
    let english_only = doc.append_text(body, "p", &[("data-en", "Hello")], "Hello");
    Page { doc, label, heading, email, message, english_only }
}

fn mounted(page: &Page) -> LocalizationController<NodeId> {
    LocalizationController::mount(&page.doc, &SiteConfig::default()).unwrap()
}

fn assert_direction_consistent(doc: &MemoryDocument) {
    let html = doc.html();
    let lang = doc.attribute(&html, "lang");
    let dir = doc.attribute(&html, "dir");
    let body = doc.body_node();
    match lang.as_deref() {
        Some("ar") => {
            assert_eq!(dir.as_deref(), Some("rtl"));
            assert!(doc.has_class(&body, "rtl"));
        }
        Some("en") => {
            assert_eq!(dir.as_deref(), Some("ltr"));
            assert!(!doc.has_class(&body, "rtl"));
        }
        other => panic!("unexpected lang {other:?}"),
    }
}

// =============================================================
// Language
// =============================================================

#[test]
fn language_decoding_defaults_to_english() {
    assert_eq!(Language::from_stored(Some("ar")), Language::Ar);
    assert_eq!(Language::from_stored(Some("en")), Language::En);
    assert_eq!(Language::from_stored(Some("fr")), Language::En);
    assert_eq!(Language::from_stored(None), Language::En);
}

#[test]
fn direction_follows_language() {
    assert_eq!(Language::Ar.direction(), TextDirection::Rtl);
    assert_eq!(Language::En.direction(), TextDirection::Ltr);
    assert_eq!(TextDirection::Rtl.as_str(), "rtl");
}

#[test]
fn input_like_tags() {
    assert!(is_input_like("INPUT"));
    assert!(is_input_like("TEXTAREA"));
    assert!(is_input_like("textarea"));
    assert!(!is_input_like("SELECT"));
    assert!(!is_input_like("P"));
}

// =============================================================
// Controller
// =============================================================

#[test]
fn initialize_with_english_changes_nothing() {
    let page = page();
    let mut store = MemoryStore::new();
    let mut locale = mounted(&page);
    assert!(locale.initialize(&page.doc, &mut store).is_empty());
    assert_eq!(locale.language(), Language::En);
}

#[test]
fn initialize_applies_stored_arabic() {
    let mut page = page();
    let mut store = MemoryStore::new().with("language", "ar");
    let mut locale = mounted(&page);
    let effects = locale.initialize(&page.doc, &mut store);
    apply(&mut page.doc, effects);

    assert_eq!(locale.language(), Language::Ar);
    assert_direction_consistent(&page.doc);
    assert_eq!(page.doc.text(page.heading), "نبذة عني");
    assert_eq!(page.doc.text(page.label), "EN");
}

#[test]
fn toggle_to_arabic_rewrites_text_and_placeholders() {
    let mut page = page();
    let mut store = MemoryStore::new();
    let mut locale = mounted(&page);
    let effects = locale.toggle(&page.doc, &mut store);
    apply(&mut page.doc, effects);

    assert_eq!(page.doc.text(page.heading), "نبذة عني");
    assert_eq!(page.doc.attribute(&page.email, "placeholder").as_deref(), Some("بريدك الإلكتروني"));
    assert_eq!(page.doc.attribute(&page.message, "placeholder").as_deref(), Some("رسالتك"));
    assert_eq!(page.doc.text(page.label), "EN");
    assert_eq!(store.get("language"), Some("ar"));
    assert_direction_consistent(&page.doc);
}

#[test]
fn inputs_keep_their_text_content() {
    let mut page = page();
    let mut locale = mounted(&page);
    let effects = locale.toggle(&page.doc, &mut MemoryStore::new());
    assert!(!effects.iter().any(|e| matches!(e, Effect::SetText { node, .. } if *node == page.email)));
    apply(&mut page.doc, effects);
    assert_eq!(page.doc.text(page.email), "");
}

#[test]
fn missing_translation_leaves_prior_text() {
    let mut page = page();
    let mut store = MemoryStore::new();
    let mut locale = mounted(&page);
    let effects = locale.toggle(&page.doc, &mut store);
    apply(&mut page.doc, effects);

    assert_eq!(page.doc.text(page.english_only), "Hello");
}

#[test]
fn round_trip_restores_english_text_and_placeholders() {
    let mut page = page();
    let mut store = MemoryStore::new();
    let mut locale = mounted(&page);

    let to_ar = locale.toggle(&page.doc, &mut store);
    apply(&mut page.doc, to_ar);
    let to_en = locale.toggle(&page.doc, &mut store);
    apply(&mut page.doc, to_en);

    assert_eq!(locale.language(), Language::En);
    assert_eq!(page.doc.text(page.heading), "About Me");
    assert_eq!(page.doc.attribute(&page.email, "placeholder").as_deref(), Some("Your email"));
    assert_eq!(page.doc.attribute(&page.message, "placeholder").as_deref(), Some("Message"));
    assert_eq!(page.doc.text(page.label), "AR");
    assert_eq!(store.get("language"), Some("en"));
    assert_direction_consistent(&page.doc);
}

#[test]
fn direction_consistent_after_every_apply() {
    let mut page = page();
    let mut store = MemoryStore::new();
    let mut locale = mounted(&page);
    let sequence = [Language::Ar, Language::Ar, Language::En, Language::Ar, Language::En, Language::En];
    for language in sequence {
        let effects = locale.apply_language(&page.doc, &mut store, language);
        apply(&mut page.doc, effects);
        assert_direction_consistent(&page.doc);
        assert_eq!(page.doc.attribute(&page.doc.html(), "lang").as_deref(), Some(language.code()));
    }
}

#[test]
fn mount_requires_toggle() {
    let doc = MemoryDocument::new();
    assert!(LocalizationController::<NodeId>::mount(&doc, &SiteConfig::default()).is_none());
}

#[test]
fn failed_persist_still_switches() {
    let mut page = page();
    let mut store = MemoryStore::new().read_only();
    let mut locale = mounted(&page);
    let effects = locale.toggle(&page.doc, &mut store);
    apply(&mut page.doc, effects);
    assert_eq!(locale.language(), Language::Ar);
    assert_direction_consistent(&page.doc);
}
