use super::*;
use crate::document::apply;
use crate::memory::{MemoryDocument, NodeId};

struct Page {
    doc: MemoryDocument,
    section: NodeId,
    tags: Vec<NodeId>,
    item: NodeId,
    image: NodeId,
    eager: NodeId,
}

fn page() -> Page {
    let mut doc = MemoryDocument::new();
    let body = doc.body_node();
    let section = doc.append(body, "section", &[("class", "section"), ("id", "skills")]);
    let tags = (0..4)
        .map(|_| doc.append(section, "span", &[("class", "skill-tag")]))
        .collect();
    let item = doc.append(section, "div", &[("class", "timeline-item")]);
    let image = doc.append(section, "img", &[("data-src", "/img/portrait.webp"), ("alt", "portrait")]);
    let eager = doc.append(section, "img", &[("src", "/img/logo.svg")]);
    Page { doc, section, tags, item, image, eager }
}

fn revealed_style(doc: &MemoryDocument, node: NodeId) -> bool {
    doc.style(node, "opacity") == Some("1") && doc.style(node, "transform") == Some("translateY(0)")
}

// =============================================================
// Stagger
// =============================================================

#[test]
fn stagger_delay_formats_seconds() {
    assert_eq!(stagger_delay(0, 0.05), "0s");
    assert_eq!(stagger_delay(1, 0.05), "0.05s");
    assert_eq!(stagger_delay(3, 0.05), "0.15s");
    assert_eq!(stagger_delay(20, 0.05), "1s");
}

#[test]
fn mount_staggers_skill_tags_and_collects_observed() {
    let mut page = page();
    let (animator, stagger) = VisibilityAnimator::mount(&page.doc, &SiteConfig::default());
    apply(&mut page.doc, stagger);

    assert_eq!(page.doc.style(page.tags[0], "transition-delay"), Some("0s"));
    assert_eq!(page.doc.style(page.tags[2], "transition-delay"), Some("0.1s"));
    let mut expected = vec![page.section];
    expected.extend(page.tags.iter().copied());
    expected.push(page.item);
    assert_eq!(animator.observed(), expected.as_slice());
}

// =============================================================
// Reveal latch
// =============================================================

#[test]
fn entering_reveals_and_unobserves() {
    let mut page = page();
    let (mut animator, _) = VisibilityAnimator::mount(&page.doc, &SiteConfig::default());
    let batch = animator.on_intersections(vec![Intersection::entering(page.section)]);
    assert_eq!(batch.unobserve, vec![page.section]);
    apply(&mut page.doc, batch.effects);

    assert!(animator.is_revealed(&page.section));
    assert!(revealed_style(&page.doc, page.section));
    assert!(!revealed_style(&page.doc, page.item));
}

#[test]
fn leaving_never_unreveals() {
    let mut page = page();
    let (mut animator, _) = VisibilityAnimator::mount(&page.doc, &SiteConfig::default());
    let first = animator.on_intersections(vec![Intersection::entering(page.item)]);
    apply(&mut page.doc, first.effects);

    let exit = animator.on_intersections(vec![Intersection::leaving(page.item)]);
    assert!(exit.effects.is_empty());
    assert!(exit.unobserve.is_empty());
    assert!(animator.is_revealed(&page.item));
    assert!(revealed_style(&page.doc, page.item));
}

#[test]
fn leaving_before_entering_does_nothing() {
    let page = page();
    let (mut animator, _) = VisibilityAnimator::mount(&page.doc, &SiteConfig::default());
    let batch = animator.on_intersections(vec![Intersection::leaving(page.section)]);
    assert_eq!(batch, ObserverBatch::default());
    assert!(!animator.is_revealed(&page.section));
}

#[test]
fn repeated_entries_reveal_once() {
    let page = page();
    let (mut animator, _) = VisibilityAnimator::mount(&page.doc, &SiteConfig::default());
    let batch = animator.on_intersections(vec![
        Intersection::entering(page.section),
        Intersection::leaving(page.section),
        Intersection::entering(page.section),
    ]);
    assert_eq!(batch.effects.len(), 2);
    assert_eq!(batch.unobserve, vec![page.section]);

    let again = animator.on_intersections(vec![Intersection::entering(page.section)]);
    assert!(again.effects.is_empty());
}

#[test]
fn reveal_all_covers_every_observed_element() {
    let mut page = page();
    let (mut animator, _) = VisibilityAnimator::mount(&page.doc, &SiteConfig::default());
    let batch = animator.reveal_all();
    apply(&mut page.doc, batch.effects);
    for node in animator.observed().to_vec() {
        assert!(revealed_style(&page.doc, node));
        assert!(animator.is_revealed(&node));
    }
}

// =============================================================
// Lazy images
// =============================================================

#[test]
fn only_pending_images_are_tracked() {
    let page = page();
    let loader = LazyImageLoader::mount(&page.doc, &SiteConfig::default());
    assert_eq!(loader.pending(), &[page.image]);
    assert!(!loader.pending().contains(&page.eager));
}

#[test]
fn entering_image_promotes_source_once() {
    let mut page = page();
    let mut loader = LazyImageLoader::mount(&page.doc, &SiteConfig::default());

    let batch = loader.on_intersections(&page.doc, vec![Intersection::entering(page.image)]);
    assert_eq!(batch.unobserve, vec![page.image]);
    apply(&mut page.doc, batch.effects);
    assert_eq!(page.doc.attribute(&page.image, "src").as_deref(), Some("/img/portrait.webp"));
    assert!(!page.doc.has_attribute(&page.image, "data-src"));
    assert!(loader.pending().is_empty());

    for _ in 0..3 {
        let again = loader.on_intersections(
            &page.doc,
            vec![Intersection::leaving(page.image), Intersection::entering(page.image)],
        );
        assert_eq!(again, ObserverBatch::default());
    }
}

#[test]
fn duplicate_entries_in_one_batch_load_once() {
    let page = page();
    let mut loader = LazyImageLoader::mount(&page.doc, &SiteConfig::default());
    let batch = loader.on_intersections(
        &page.doc,
        vec![Intersection::entering(page.image), Intersection::entering(page.image)],
    );
    let src_sets = batch
        .effects
        .iter()
        .filter(|e| matches!(e, Effect::SetAttribute { name, .. } if name == "src"))
        .count();
    assert_eq!(src_sets, 1);
}

#[test]
fn leaving_image_stays_pending() {
    let page = page();
    let mut loader = LazyImageLoader::mount(&page.doc, &SiteConfig::default());
    let batch = loader.on_intersections(&page.doc, vec![Intersection::leaving(page.image)]);
    assert_eq!(batch, ObserverBatch::default());
    assert_eq!(loader.pending(), &[page.image]);
}

#[test]
fn load_all_drains_pending() {
    let mut page = page();
    let mut loader = LazyImageLoader::mount(&page.doc, &SiteConfig::default());
    let batch = loader.load_all(&page.doc);
    apply(&mut page.doc, batch.effects);
    assert_eq!(page.doc.attribute(&page.image, "src").as_deref(), Some("/img/portrait.webp"));
    assert!(loader.pending().is_empty());
}

#[test]
fn show_everything_reveals_and_loads_after_partial_progress() {
    let mut page = page();
    let config = SiteConfig::default();
    let (mut animator, _) = VisibilityAnimator::mount(&page.doc, &config);
    let mut loader = LazyImageLoader::mount(&page.doc, &config);
    animator.on_intersections(vec![Intersection::entering(page.section)]);

    let effects = show_everything(&page.doc, &mut animator, &mut loader);
    apply(&mut page.doc, effects);

    assert!(!revealed_style(&page.doc, page.section), "already-revealed section is not re-styled");
    assert!(revealed_style(&page.doc, page.item));
    assert!(page.tags.iter().all(|tag| revealed_style(&page.doc, *tag)));
    assert_eq!(page.doc.attribute(&page.image, "src").as_deref(), Some("/img/portrait.webp"));
    assert!(loader.pending().is_empty());
    assert_eq!(page.doc.attribute(&page.eager, "src").as_deref(), Some("/img/logo.svg"));
}
