//! `IntersectionObserver` wiring for the reveal latch and lazy images.

use behavior::config::RevealTuning;
use behavior::document;
use behavior::reveal::{Intersection, ObserverBatch};
use js_sys::{Array, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window};

use crate::dom::WebDocument;

/// Whether the platform provides `IntersectionObserver`.
pub fn supported(window: &Window) -> bool {
    Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

/// Observer options for the reveal latch.
pub fn reveal_options(tuning: &RevealTuning) -> IntersectionObserverInit {
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(tuning.threshold));
    init.set_root_margin(&tuning.root_margin);
    init
}

/// Observe `targets`, feeding each callback batch to `handler` and applying
/// its answer: effects onto the page, then `unobserve` for latched nodes.
pub fn observe<F>(
    doc: &WebDocument,
    targets: &[Element],
    init: Option<&IntersectionObserverInit>,
    mut handler: F,
) -> Result<(), JsValue>
where
    F: FnMut(Vec<Intersection<Element>>) -> ObserverBatch<Element> + 'static,
{
    if targets.is_empty() {
        return Ok(());
    }
    let mut page = doc.clone();
    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        let batch = handler(intersections(&entries));
        document::apply(&mut page, batch.effects);
        for node in &batch.unobserve {
            observer.unobserve(node);
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let observer = match init {
        Some(init) => IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), init)?,
        None => IntersectionObserver::new(callback.as_ref().unchecked_ref())?,
    };
    for target in targets {
        observer.observe(target);
    }
    callback.forget();
    Ok(())
}

fn intersections(entries: &Array) -> Vec<Intersection<Element>> {
    entries
        .iter()
        .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
        .map(|entry| Intersection { target: entry.target(), is_intersecting: entry.is_intersecting() })
        .collect()
}
