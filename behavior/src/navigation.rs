//! Mobile menu state machine, in-page anchor scrolling, and scroll-driven
//! nav styling.
//!
//! DESIGN
//! ======
//! The menu transition is a pure function over [`MenuState`] and a
//! node-free [`MenuInput`]. The controller resolves DOM specifics (is this
//! click inside the menu?) into a `MenuInput`, runs the transition, and
//! renders the result as effects. Scroll handlers run on every scroll tick
//! with no throttling, so they only read cached nodes and offsets.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use crate::config::{ScrollTuning, SiteConfig};
use crate::consts::{ACTIVE_CLASS, ARIA_EXPANDED, ESCAPE_KEY, NAV_SHADOW};
use crate::document::{DocumentView, Effect};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

/// A menu-relevant user action, already classified against the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuInput {
    /// The menu toggle button was activated.
    Toggle,
    /// A link inside the menu was activated.
    LinkActivated,
    /// A click landed outside the menu, its toggle, and the toggle switches.
    ClickOutside,
    /// A click landed on the menu, its toggle, or the toggle switches.
    ClickInside,
    Escape,
    OtherKey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuTransition {
    pub next: MenuState,
    /// Focus returns to the toggle (Escape dismissal).
    pub refocus_toggle: bool,
}

/// Menu state machine. Initial state is [`MenuState::Closed`]; there is no
/// terminal state.
#[must_use]
pub fn transition(state: MenuState, input: MenuInput) -> MenuTransition {
    let (next, refocus_toggle) = match (state, input) {
        (MenuState::Closed, MenuInput::Toggle) => (MenuState::Open, false),
        (MenuState::Open, MenuInput::Toggle | MenuInput::LinkActivated | MenuInput::ClickOutside) => {
            (MenuState::Closed, false)
        }
        (MenuState::Open, MenuInput::Escape) => (MenuState::Closed, true),
        (state, _) => (state, false),
    };
    MenuTransition { next, refocus_toggle }
}

/// A raw menu event as the host observes it.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuEvent<N> {
    ToggleActivated,
    LinkActivated,
    DocumentClick { target: N },
    KeyDown { key: String },
}

/// Result of activating an in-page link.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorOutcome<N> {
    pub prevent_default: bool,
    pub effects: Vec<Effect<N>>,
}

/// Scroll destination for an anchor: the target's top, less the nav bar
/// height and a visual margin.
#[must_use]
pub fn anchor_scroll_top(target_top: f64, nav_height: f64, margin: f64) -> f64 {
    target_top - nav_height - margin
}

/// Index of the last section whose top, less `lookahead`, is at or above
/// `scroll_y`. Later sections win ties, so document order decides.
#[must_use]
pub fn active_section_index(section_tops: &[f64], scroll_y: f64, lookahead: f64) -> Option<usize> {
    section_tops.iter().rposition(|top| scroll_y >= top - lookahead)
}

/// Nav bar `box-shadow` for a scroll offset.
#[must_use]
pub fn nav_shadow(scroll_y: f64, threshold: f64) -> &'static str {
    if scroll_y > threshold { NAV_SHADOW } else { "none" }
}

#[derive(Debug, Clone)]
pub struct NavigationController<N> {
    menu_state: MenuState,
    nav: Option<N>,
    toggle: Option<N>,
    menu: Option<N>,
    toggle_switches: Option<N>,
    links: Vec<N>,
    sections: Vec<N>,
    tuning: ScrollTuning,
}

impl<N: Clone + PartialEq> NavigationController<N> {
    /// Cache the nav elements. Missing pieces disable only the features
    /// that need them.
    pub fn mount<D: DocumentView<Node = N>>(doc: &D, config: &SiteConfig) -> Self {
        let selectors = &config.selectors;
        Self {
            menu_state: MenuState::Closed,
            nav: doc.query(&selectors.nav),
            toggle: doc.query(&selectors.nav_toggle),
            menu: doc.query(&selectors.nav_menu),
            toggle_switches: doc.query(&selectors.toggle_switches),
            links: doc.query_all(&selectors.nav_links),
            sections: doc.query_all(&selectors.sections),
            tuning: config.scroll,
        }
    }

    #[must_use]
    pub fn menu_state(&self) -> MenuState {
        self.menu_state
    }

    /// The menu toggle, when the page has a usable mobile menu.
    pub fn toggle_node(&self) -> Option<&N> {
        self.toggle.as_ref().filter(|_| self.menu.is_some())
    }

    pub fn menu_links(&self) -> &[N] {
        &self.links
    }

    /// Run one menu event through the state machine.
    pub fn handle_menu<D: DocumentView<Node = N>>(&mut self, doc: &D, event: MenuEvent<N>) -> Vec<Effect<N>> {
        let (Some(toggle), Some(menu)) = (self.toggle.clone(), self.menu.clone()) else {
            return Vec::new();
        };
        let input = match event {
            MenuEvent::ToggleActivated => MenuInput::Toggle,
            MenuEvent::LinkActivated => MenuInput::LinkActivated,
            MenuEvent::DocumentClick { target } => {
                let inside = doc.contains(&toggle, &target)
                    || doc.contains(&menu, &target)
                    || self.toggle_switches.as_ref().is_some_and(|s| doc.contains(s, &target));
                if inside { MenuInput::ClickInside } else { MenuInput::ClickOutside }
            }
            MenuEvent::KeyDown { key } if key == ESCAPE_KEY => MenuInput::Escape,
            MenuEvent::KeyDown { .. } => MenuInput::OtherKey,
        };

        let step = transition(self.menu_state, input);
        if step.next == self.menu_state {
            return Vec::new();
        }
        self.menu_state = step.next;
        let open = step.next == MenuState::Open;
        let mut effects = vec![
            Effect::set_attribute(toggle.clone(), ARIA_EXPANDED, if open { "true" } else { "false" }),
            Effect::toggle_class(menu, ACTIVE_CLASS, open),
        ];
        if step.refocus_toggle {
            effects.push(Effect::Focus(toggle));
        }
        effects
    }

    /// Smooth-scroll to the target of an in-page link.
    ///
    /// Default navigation is always suppressed for `#...` links; a bare `#`
    /// or an unknown target scrolls nowhere.
    pub fn on_anchor_click<D: DocumentView<Node = N>>(&self, doc: &D, href: &str) -> AnchorOutcome<N> {
        if !href.starts_with('#') {
            return AnchorOutcome { prevent_default: false, effects: Vec::new() };
        }
        let target = if href.len() > 1 { doc.query(href) } else { None };
        let effects = match target {
            Some(target) => {
                let nav_height = self.nav.as_ref().map_or(0.0, |nav| doc.offset_height(nav));
                let top = anchor_scroll_top(doc.offset_top(&target), nav_height, self.tuning.anchor_margin_px);
                vec![Effect::ScrollTo { top, smooth: true }]
            }
            None => Vec::new(),
        };
        AnchorOutcome { prevent_default: true, effects }
    }

    /// Recompute the nav shadow and the highlighted link for the current
    /// scroll offset.
    pub fn on_scroll<D: DocumentView<Node = N>>(&self, doc: &D) -> Vec<Effect<N>> {
        let scroll_y = doc.scroll_y();
        let mut effects = Vec::with_capacity(self.links.len() + 1);

        if let Some(nav) = &self.nav {
            effects.push(Effect::set_style(
                nav.clone(),
                "box-shadow",
                nav_shadow(scroll_y, self.tuning.shadow_threshold_px),
            ));
        }

        let tops: Vec<f64> = self.sections.iter().map(|s| doc.offset_top(s)).collect();
        let current = active_section_index(&tops, scroll_y, self.tuning.section_lookahead_px)
            .and_then(|i| self.sections.get(i))
            .and_then(|section| doc.attribute(section, "id"))
            .map(|id| format!("#{id}"));

        for link in &self.links {
            let active = current
                .as_deref()
                .is_some_and(|wanted| doc.attribute(link, "href").as_deref() == Some(wanted));
            effects.push(Effect::toggle_class(link.clone(), ACTIVE_CLASS, active));
        }
        effects
    }
}

/// Jump to the top once the page has loaded.
#[must_use]
pub fn on_load<N>() -> Vec<Effect<N>> {
    vec![Effect::ScrollTo { top: 0.0, smooth: false }]
}
