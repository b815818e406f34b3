//! Event-listener attachment.
//!
//! Listeners live as long as the page, so each closure is leaked with
//! `forget` once registered.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget};

/// Attach `handler` for `event` on `target`, downcasting the event to `E`.
pub fn listen<E, F>(target: &EventTarget, event: &str, mut handler: F)
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let name = event.to_owned();
    let callback = Closure::wrap(Box::new(move |raw: Event| match raw.dyn_into::<E>() {
        Ok(ev) => handler(ev),
        Err(_) => log::debug!("{name} event had an unexpected type"),
    }) as Box<dyn FnMut(Event)>);

    if let Err(err) = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
        log::warn!("addEventListener({event}) failed: {}", crate::dom::js_reason(&err));
    }
    callback.forget();
}

/// Attach `handler` to every element in `targets`.
pub fn listen_all<E, F>(targets: &[web_sys::Element], event: &str, handler: F)
where
    E: JsCast + 'static,
    F: Fn(&web_sys::Element, E) + Clone + 'static,
{
    for target in targets {
        let element = target.clone();
        let handler = handler.clone();
        listen(target, event, move |ev: E| handler(&element, ev));
    }
}
