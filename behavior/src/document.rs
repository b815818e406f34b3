//! Minimal document surface the controllers read from, and the effect
//! commands they answer with.
//!
//! ARCHITECTURE
//! ============
//! Controllers never mutate the page directly. They query through
//! [`DocumentView`], update their own state, and return `Vec<Effect>`.
//! The host applies those effects with [`apply`] inside the same event turn,
//! so a handler's whole response is observable (and testable) as data.

#[cfg(test)]
#[path = "document_test.rs"]
mod document_test;

/// Read/write access to the page, keyed by an opaque node handle.
///
/// Read methods take `&self`; writes take `&mut self` so an in-memory
/// implementation needs no interior mutability.
pub trait DocumentView {
    /// Handle to one element. Equality is element identity.
    type Node: Clone + PartialEq + std::fmt::Debug;

    /// The `<html>` element.
    fn root(&self) -> Option<Self::Node>;

    /// The `<body>` element.
    fn body(&self) -> Option<Self::Node>;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// First element matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Node> {
        self.query_all(selector).into_iter().next()
    }

    /// First descendant of `scope` matching `selector`.
    fn query_within(&self, scope: &Self::Node, selector: &str) -> Option<Self::Node>;

    /// Upper-case tag name, as the DOM reports it (`"INPUT"`, `"A"`).
    fn tag_name(&self, node: &Self::Node) -> String;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn has_attribute(&self, node: &Self::Node, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Whether `node` is `ancestor` or lies inside it.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    /// Layout offset from the top of the page, in CSS pixels.
    fn offset_top(&self, node: &Self::Node) -> f64;

    /// Rendered height, in CSS pixels.
    fn offset_height(&self, node: &Self::Node) -> f64;

    /// Current vertical scroll offset of the window.
    fn scroll_y(&self) -> f64;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    fn remove_attribute(&mut self, node: &Self::Node, name: &str);

    fn add_class(&mut self, node: &Self::Node, class: &str);

    fn remove_class(&mut self, node: &Self::Node, class: &str);

    /// Replace the element's text content.
    fn set_text(&mut self, node: &Self::Node, text: &str);

    /// Set one inline style property (kebab-case name).
    fn set_style(&mut self, node: &Self::Node, property: &str, value: &str);

    fn focus(&mut self, node: &Self::Node);

    fn scroll_to(&mut self, top: f64, smooth: bool);
}

/// One visual change requested by a controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect<N> {
    SetAttribute { node: N, name: String, value: String },
    RemoveAttribute { node: N, name: String },
    AddClass { node: N, class: String },
    RemoveClass { node: N, class: String },
    SetText { node: N, text: String },
    SetStyle { node: N, property: String, value: String },
    Focus(N),
    /// Scroll the window so `top` is at the viewport top.
    ScrollTo { top: f64, smooth: bool },
}

impl<N> Effect<N> {
    pub fn set_attribute(node: N, name: &str, value: impl Into<String>) -> Self {
        Self::SetAttribute { node, name: name.to_owned(), value: value.into() }
    }

    pub fn remove_attribute(node: N, name: &str) -> Self {
        Self::RemoveAttribute { node, name: name.to_owned() }
    }

    pub fn add_class(node: N, class: &str) -> Self {
        Self::AddClass { node, class: class.to_owned() }
    }

    pub fn remove_class(node: N, class: &str) -> Self {
        Self::RemoveClass { node, class: class.to_owned() }
    }

    /// Add `class` when `on`, remove it otherwise.
    pub fn toggle_class(node: N, class: &str, on: bool) -> Self {
        if on { Self::add_class(node, class) } else { Self::remove_class(node, class) }
    }

    pub fn set_text(node: N, text: impl Into<String>) -> Self {
        Self::SetText { node, text: text.into() }
    }

    pub fn set_style(node: N, property: &str, value: impl Into<String>) -> Self {
        Self::SetStyle { node, property: property.to_owned(), value: value.into() }
    }
}

/// Execute `effects` against `doc` in order.
pub fn apply<D: DocumentView>(doc: &mut D, effects: Vec<Effect<D::Node>>) {
    for effect in effects {
        match effect {
            Effect::SetAttribute { node, name, value } => doc.set_attribute(&node, &name, &value),
            Effect::RemoveAttribute { node, name } => doc.remove_attribute(&node, &name),
            Effect::AddClass { node, class } => doc.add_class(&node, &class),
            Effect::RemoveClass { node, class } => doc.remove_class(&node, &class),
            Effect::SetText { node, text } => doc.set_text(&node, &text),
            Effect::SetStyle { node, property, value } => doc.set_style(&node, &property, &value),
            Effect::Focus(node) => doc.focus(&node),
            Effect::ScrollTo { top, smooth } => doc.scroll_to(top, smooth),
        }
    }
}
