//! Page boot: mount every controller against the live document and wire
//! the browser events to them.
//!
//! Controllers are pure; this module owns the only mutable page state, an
//! `Rc<RefCell<Site>>` shared by the listeners. Each listener borrows it
//! for one event turn and applies the returned effects before releasing.

use std::cell::RefCell;
use std::rc::Rc;

use behavior::config::SiteConfig;
use behavior::document::{self, DocumentView, Effect};
use behavior::locale::LocalizationController;
use behavior::misc;
use behavior::navigation::{self, MenuEvent, NavigationController};
use behavior::preferences::PreferenceStore;
use behavior::reveal::{LazyImageLoader, VisibilityAnimator, show_everything};
use behavior::theme::ThemeController;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent, ScrollRestoration, Window};

use crate::dom::{WebDocument, js_reason};
use crate::listeners::{listen, listen_all};
use crate::{logging, observers, page_config, storage};

struct Site {
    doc: WebDocument,
    prefs: Box<dyn PreferenceStore>,
    theme: Option<ThemeController<Element>>,
    locale: Option<LocalizationController<Element>>,
    nav: NavigationController<Element>,
    reveal: VisibilityAnimator<Element>,
    images: LazyImageLoader<Element>,
}

type Shared = Rc<RefCell<Site>>;

/// Run `f` against the site and apply what it returns. A re-entrant event
/// (dispatched while another handler holds the site) is dropped.
fn update<F>(site: &Shared, f: F)
where
    F: FnOnce(&mut Site) -> Vec<Effect<Element>>,
{
    let Ok(mut guard) = site.try_borrow_mut() else {
        log::debug!("site busy; re-entrant event skipped");
        return;
    };
    let effects = f(&mut guard);
    document::apply(&mut guard.doc, effects);
}

fn event_element(event: &Event) -> Option<Element> {
    event.target().and_then(|target| target.dyn_into::<Element>().ok())
}

/// Boot once the DOM is parsed.
pub fn start() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(doc) = WebDocument::from_window(window.clone()) else {
        return;
    };
    if doc.document().ready_state() == "loading" {
        let document = doc.document().clone();
        listen(&document, "DOMContentLoaded", move |_: Event| boot(doc.clone()));
    } else {
        boot(doc);
    }
}

fn boot(mut doc: WebDocument) {
    let (config, config_error) = page_config::load(doc.document());
    logging::init(config.log_level());
    if let Some(err) = config_error {
        log::warn!("{err}; using default configuration");
    }

    let window = doc.window().clone();
    let mut prefs = storage::open_preferences(&window);

    let mut theme = ThemeController::mount(&doc, &config);
    if let Some(theme) = theme.as_mut() {
        let effects = theme.initialize(&*prefs);
        document::apply(&mut doc, effects);
    }
    let mut locale = LocalizationController::mount(&doc, &config);
    if let Some(locale) = locale.as_mut() {
        let effects = locale.initialize(&doc, &mut *prefs);
        document::apply(&mut doc, effects);
    }

    let nav = NavigationController::mount(&doc, &config);
    let (reveal, stagger) = VisibilityAnimator::mount(&doc, &config);
    document::apply(&mut doc, stagger);
    let images = LazyImageLoader::mount(&doc, &config);

    let year = js_sys::Date::new_0().get_full_year();
    let touches = misc::stamp_year(&doc, &config, year)
        .into_iter()
        .chain(misc::harden_external_links(&doc, &config))
        .collect();
    document::apply(&mut doc, touches);
    misc::log_greeting();

    let site = Rc::new(RefCell::new(Site { doc, prefs, theme, locale, nav, reveal, images }));
    wire_toggles(&site);
    wire_menu(&site);
    wire_scrolling(&site, &window, &config);
    wire_extras(&site, &config);
    start_observers(&site, &window, &config);
    log::debug!("portfolio behavior mounted");
}

fn wire_toggles(site: &Shared) {
    let guard = site.borrow();
    if let Some(toggle) = guard.theme.as_ref().map(|t| t.toggle_node().clone()) {
        let site = Rc::clone(site);
        listen(&toggle, "click", move |_: Event| {
            update(&site, |s| {
                let Site { prefs, theme, .. } = s;
                theme.as_mut().map_or_else(Vec::new, |t| t.toggle(&mut **prefs))
            });
        });
    }
    if let Some(toggle) = guard.locale.as_ref().map(|l| l.toggle_node().clone()) {
        let site = Rc::clone(site);
        listen(&toggle, "click", move |_: Event| {
            update(&site, |s| {
                let Site { doc, prefs, locale, .. } = s;
                locale.as_mut().map_or_else(Vec::new, |l| l.toggle(&*doc, &mut **prefs))
            });
        });
    }
}

fn menu_handler(site: &Shared) -> impl Fn(MenuEvent<Element>) + Clone + 'static {
    let site = Rc::clone(site);
    move |event| update(&site, |s| s.nav.handle_menu(&s.doc, event))
}

fn wire_menu(site: &Shared) {
    let (toggle, links, document) = {
        let guard = site.borrow();
        (guard.nav.toggle_node().cloned(), guard.nav.menu_links().to_vec(), guard.doc.document().clone())
    };

    // Outside clicks and placeholder links are handled on the document even
    // without a mobile menu.
    let menu = menu_handler(site);
    let placeholder_site = Rc::clone(site);
    listen(&document, "click", move |event: Event| {
        let Some(target) = event_element(&event) else {
            return;
        };
        let placeholder = placeholder_site
            .try_borrow()
            .is_ok_and(|s| misc::is_placeholder_link(&s.doc, &target));
        if placeholder {
            event.prevent_default();
        }
        menu(MenuEvent::DocumentClick { target });
    });

    let menu = menu_handler(site);
    listen(&document, "keydown", move |event: KeyboardEvent| menu(MenuEvent::KeyDown { key: event.key() }));

    let Some(toggle) = toggle else {
        return;
    };
    let menu = menu_handler(site);
    listen(&toggle, "click", move |_: Event| menu(MenuEvent::ToggleActivated));
    let menu = menu_handler(site);
    listen_all(&links, "click", move |_: &Element, _: Event| menu(MenuEvent::LinkActivated));
}

fn wire_scrolling(site: &Shared, window: &Window, config: &SiteConfig) {
    let anchors = site.borrow().doc.query_all(&config.selectors.in_page_links);
    let anchor_site = Rc::clone(site);
    listen_all(&anchors, "click", move |anchor: &Element, event: Event| {
        let Some(href) = anchor.get_attribute("href") else {
            return;
        };
        update(&anchor_site, |s| {
            let outcome = s.nav.on_anchor_click(&s.doc, &href);
            if outcome.prevent_default {
                event.prevent_default();
            }
            outcome.effects
        });
    });

    let scroll_site = Rc::clone(site);
    listen(window, "scroll", move |_: Event| update(&scroll_site, |s| s.nav.on_scroll(&s.doc)));

    let load_site = Rc::clone(site);
    let history_window = window.clone();
    listen(window, "load", move |_: Event| {
        match history_window.history() {
            Ok(history) => {
                if let Err(err) = history.set_scroll_restoration(ScrollRestoration::Manual) {
                    log::debug!("scrollRestoration unavailable: {}", js_reason(&err));
                }
            }
            Err(err) => log::debug!("history unavailable: {}", js_reason(&err)),
        }
        update(&load_site, |_| navigation::on_load());
    });
}

fn wire_extras(site: &Shared, config: &SiteConfig) {
    let (cards, downloads) = {
        let guard = site.borrow();
        (guard.doc.query_all(&config.selectors.contact_cards), guard.doc.query_all(&config.selectors.downloads))
    };
    for (event, entering) in [("mouseenter", true), ("mouseleave", false)] {
        let site = Rc::clone(site);
        listen_all(&cards, event, move |card: &Element, _: Event| {
            let card = card.clone();
            update(&site, move |_| vec![misc::card_hover(card, entering)]);
        });
    }
    listen_all(&downloads, "click", |link: &Element, _: Event| {
        misc::log_download(link.get_attribute("href").as_deref());
    });
}

fn start_observers(site: &Shared, window: &Window, config: &SiteConfig) {
    let Ok(mut guard) = site.try_borrow_mut() else {
        return;
    };
    let Site { doc, reveal, images, .. } = &mut *guard;

    if !observers::supported(window) {
        log::info!("IntersectionObserver unsupported; revealing all content");
        let effects = show_everything(&*doc, reveal, images);
        document::apply(doc, effects);
        return;
    }

    let targets = reveal.observed().to_vec();
    let options = observers::reveal_options(&config.reveal);
    let reveal_site = Rc::clone(site);
    let reveal_result = observers::observe(doc, &targets, Some(&options), move |entries| {
        reveal_site
            .try_borrow_mut()
            .map(|mut s| s.reveal.on_intersections(entries))
            .unwrap_or_default()
    });
    if let Err(err) = reveal_result {
        log::warn!("reveal observer failed: {}; revealing all content", js_reason(&err));
        let effects = show_everything(&*doc, reveal, images);
        document::apply(doc, effects);
        return;
    }

    let pending = images.pending().to_vec();
    let image_site = Rc::clone(site);
    let image_result = observers::observe(doc, &pending, None, move |entries| {
        image_site
            .try_borrow_mut()
            .map(|mut s| {
                let Site { doc, images, .. } = &mut *s;
                images.on_intersections(&*doc, entries)
            })
            .unwrap_or_default()
    });
    if let Err(err) = image_result {
        log::warn!("image observer failed: {}; loading all images", js_reason(&err));
        let effects = images.load_all(&*doc).effects;
        document::apply(doc, effects);
    }
}
