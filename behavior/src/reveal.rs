//! Scroll-into-view reveal latch and deferred image loading.
//!
//! Both consume batches of [`Intersection`] entries from a viewport
//! observer owned by the host. Each answers with effects plus the nodes the
//! host should stop observing: a node fires at most once in either role.

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

use crate::config::SiteConfig;
use crate::consts::{PENDING_SRC_ATTR, REST_TRANSFORM, REVEALED_OPACITY};
use crate::document::{DocumentView, Effect};

/// One observer entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection<N> {
    pub target: N,
    pub is_intersecting: bool,
}

impl<N> Intersection<N> {
    pub fn entering(target: N) -> Self {
        Self { target, is_intersecting: true }
    }

    pub fn leaving(target: N) -> Self {
        Self { target, is_intersecting: false }
    }
}

/// What the host does after an observer callback.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverBatch<N> {
    pub effects: Vec<Effect<N>>,
    pub unobserve: Vec<N>,
}

impl<N> Default for ObserverBatch<N> {
    fn default() -> Self {
        Self { effects: Vec::new(), unobserve: Vec::new() }
    }
}

/// `transition-delay` for the `index`-th staggered element, in whole
/// milliseconds rendered as seconds (`"0.15s"`).
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn stagger_delay(index: usize, step_secs: f64) -> String {
    let secs = (index as f64 * step_secs * 1000.0).round() / 1000.0;
    format!("{secs}s")
}

/// Fade-in latch over sections, skill tags, and timeline items.
#[derive(Debug, Clone)]
pub struct VisibilityAnimator<N> {
    observed: Vec<N>,
    revealed: Vec<N>,
}

impl<N: Clone + PartialEq> VisibilityAnimator<N> {
    /// Collect the elements to observe. Also returns the skill-tag stagger
    /// delays, which must be applied before observation starts.
    pub fn mount<D: DocumentView<Node = N>>(doc: &D, config: &SiteConfig) -> (Self, Vec<Effect<N>>) {
        let selectors = &config.selectors;
        let skill_tags = doc.query_all(&selectors.skill_tags);
        let stagger = skill_tags
            .iter()
            .enumerate()
            .map(|(i, tag)| {
                Effect::set_style(tag.clone(), "transition-delay", stagger_delay(i, config.reveal.stagger_step_secs))
            })
            .collect();

        let mut observed: Vec<N> = Vec::new();
        let groups = [doc.query_all(&selectors.sections), skill_tags, doc.query_all(&selectors.timeline_items)];
        for node in groups.into_iter().flatten() {
            if !observed.contains(&node) {
                observed.push(node);
            }
        }
        (Self { observed, revealed: Vec::new() }, stagger)
    }

    /// Elements the host should register with the reveal observer.
    pub fn observed(&self) -> &[N] {
        &self.observed
    }

    #[must_use]
    pub fn is_revealed(&self, node: &N) -> bool {
        self.revealed.contains(node)
    }

    /// Reveal every entering element not yet revealed. Leaving entries are
    /// ignored: the latch never resets.
    pub fn on_intersections(&mut self, entries: Vec<Intersection<N>>) -> ObserverBatch<N> {
        let mut batch = ObserverBatch::default();
        for entry in entries {
            if entry.is_intersecting {
                self.reveal(entry.target, &mut batch);
            }
        }
        batch
    }

    /// Reveal everything at once, for platforms without an observer.
    pub fn reveal_all(&mut self) -> ObserverBatch<N> {
        let mut batch = ObserverBatch::default();
        for node in self.observed.clone() {
            self.reveal(node, &mut batch);
        }
        batch
    }

    fn reveal(&mut self, node: N, batch: &mut ObserverBatch<N>) {
        if self.revealed.contains(&node) {
            return;
        }
        batch.effects.push(Effect::set_style(node.clone(), "opacity", REVEALED_OPACITY));
        batch.effects.push(Effect::set_style(node.clone(), "transform", REST_TRANSFORM));
        batch.unobserve.push(node.clone());
        self.revealed.push(node);
    }
}

/// One-shot loader for images carrying a pending `data-src`.
#[derive(Debug, Clone)]
pub struct LazyImageLoader<N> {
    pending: Vec<N>,
}

impl<N: Clone + PartialEq> LazyImageLoader<N> {
    pub fn mount<D: DocumentView<Node = N>>(doc: &D, config: &SiteConfig) -> Self {
        Self { pending: doc.query_all(&config.selectors.lazy_images) }
    }

    /// Images still waiting for their source.
    pub fn pending(&self) -> &[N] {
        &self.pending
    }

    /// Promote `data-src` to `src` for each entering pending image.
    pub fn on_intersections<D: DocumentView<Node = N>>(
        &mut self,
        doc: &D,
        entries: Vec<Intersection<N>>,
    ) -> ObserverBatch<N> {
        let mut batch = ObserverBatch::default();
        for entry in entries.into_iter().filter(|e| e.is_intersecting) {
            self.load(doc, entry.target, &mut batch);
        }
        batch
    }

    /// Load every pending image, for platforms without an observer.
    pub fn load_all<D: DocumentView<Node = N>>(&mut self, doc: &D) -> ObserverBatch<N> {
        let mut batch = ObserverBatch::default();
        for node in self.pending.clone() {
            self.load(doc, node, &mut batch);
        }
        batch
    }

    fn load<D: DocumentView<Node = N>>(&mut self, doc: &D, node: N, batch: &mut ObserverBatch<N>) {
        let Some(index) = self.pending.iter().position(|p| *p == node) else {
            return;
        };
        self.pending.remove(index);
        if let Some(src) = doc.attribute(&node, PENDING_SRC_ATTR) {
            batch.effects.push(Effect::set_attribute(node.clone(), "src", src));
            batch.effects.push(Effect::remove_attribute(node.clone(), PENDING_SRC_ATTR));
        }
        batch.unobserve.push(node);
    }
}

/// Reveal every latch and load every pending image at once. The host falls
/// back to this when it cannot observe the viewport at all.
pub fn show_everything<D>(
    doc: &D,
    animator: &mut VisibilityAnimator<D::Node>,
    loader: &mut LazyImageLoader<D::Node>,
) -> Vec<Effect<D::Node>>
where
    D: DocumentView,
    D::Node: Clone + PartialEq,
{
    let mut effects = animator.reveal_all().effects;
    effects.extend(loader.load_all(doc).effects);
    effects
}
