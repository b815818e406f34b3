//! In-memory [`DocumentView`] used to exercise controllers without a browser.
//!
//! Elements live in a flat arena; creation order stands in for document
//! order. Classes are read from the `class` attribute, mirroring the DOM,
//! so `set_attribute(node, "class", ..)` and `add_class` stay consistent.
//!
//! The selector engine covers what the site markup needs: type, `#id`,
//! `.class`, `[attr]`, `[attr="v"]`, `[attr^="v"]`, the descendant
//! combinator, and comma-separated lists. Anything else matches nothing.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::collections::BTreeMap;

use crate::document::DocumentView;

/// Handle into a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A recorded `scroll_to` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub smooth: bool,
}

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    parent: Option<NodeId>,
    attributes: BTreeMap<String, String>,
    text: String,
    style: BTreeMap<String, String>,
    offset_top: f64,
    offset_height: f64,
}

#[derive(Debug, Clone)]
pub struct MemoryDocument {
    elements: Vec<Element>,
    scroll_y: f64,
    focused: Option<NodeId>,
    scrolls: Vec<ScrollRequest>,
}

const HTML: NodeId = NodeId(0);
const BODY: NodeId = NodeId(1);

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// An empty page: `<html>` containing `<body>`.
    #[must_use]
    pub fn new() -> Self {
        let html = Element { tag: "HTML".to_owned(), ..Element::default() };
        let body = Element { tag: "BODY".to_owned(), parent: Some(HTML), ..Element::default() };
        Self { elements: vec![html, body], scroll_y: 0.0, focused: None, scrolls: Vec::new() }
    }

    #[must_use]
    pub fn html(&self) -> NodeId {
        HTML
    }

    #[must_use]
    pub fn body_node(&self) -> NodeId {
        BODY
    }

    /// Create an element under `parent` with the given attributes.
    pub fn append(&mut self, parent: NodeId, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let id = NodeId(self.elements.len());
        self.elements.push(Element {
            tag: tag.to_ascii_uppercase(),
            parent: Some(parent),
            attributes: attributes
                .iter()
                .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
                .collect(),
            ..Element::default()
        });
        id
    }

    /// Like [`MemoryDocument::append`], also setting the text content.
    pub fn append_text(&mut self, parent: NodeId, tag: &str, attributes: &[(&str, &str)], text: &str) -> NodeId {
        let id = self.append(parent, tag, attributes);
        self.set_text(&id, text);
        id
    }

    /// Set layout metrics for `node`.
    pub fn set_layout(&mut self, node: NodeId, offset_top: f64, offset_height: f64) {
        if let Some(el) = self.get_mut(node) {
            el.offset_top = offset_top;
            el.offset_height = offset_height;
        }
    }

    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }

    #[must_use]
    pub fn text(&self, node: NodeId) -> &str {
        self.get(node).map_or("", |el| el.text.as_str())
    }

    #[must_use]
    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.get(node)?.style.get(property).map(String::as_str)
    }

    #[must_use]
    pub fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.classes(*node).contains(&class)
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    #[must_use]
    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.scrolls
    }

    fn get(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(node.0)
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.elements.get_mut(node.0)
    }

    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|el| el.parent)
    }

    fn classes(&self, node: NodeId) -> Vec<&str> {
        self.get(node)
            .and_then(|el| el.attributes.get("class"))
            .map_or_else(Vec::new, |classes| classes.split_whitespace().collect())
    }

    fn write_classes(&mut self, node: NodeId, classes: &[String]) {
        if let Some(el) = self.get_mut(node) {
            el.attributes.insert("class".to_owned(), classes.join(" "));
        }
    }

    fn select(&self, selector: &str, within: Option<NodeId>) -> Vec<NodeId> {
        let Some(list) = parse_selector_list(selector) else {
            log::debug!("unsupported selector {selector:?}");
            return Vec::new();
        };
        (0..self.elements.len())
            .map(NodeId)
            .filter(|&node| within.map_or(true, |scope| scope != node && self.is_inside(scope, node)))
            .filter(|&node| list.iter().any(|chain| self.matches_chain(node, chain)))
            .collect()
    }

    fn is_inside(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self.parent_of(candidate);
        }
        false
    }

    fn matches_chain(&self, node: NodeId, chain: &[Compound]) -> bool {
        let Some((last, mut remaining)) = chain.split_last() else {
            return false;
        };
        if !self.matches_compound(node, last) {
            return false;
        }
        let mut current = self.parent_of(node);
        while let Some((wanted, rest)) = remaining.split_last() {
            loop {
                let Some(candidate) = current else {
                    return false;
                };
                current = self.parent_of(candidate);
                if self.matches_compound(candidate, wanted) {
                    break;
                }
            }
            remaining = rest;
        }
        true
    }

    fn matches_compound(&self, node: NodeId, compound: &Compound) -> bool {
        let Some(el) = self.get(node) else {
            return false;
        };
        if compound.tag.as_ref().is_some_and(|tag| *tag != el.tag) {
            return false;
        }
        if compound
            .id
            .as_ref()
            .is_some_and(|id| el.attributes.get("id") != Some(id))
        {
            return false;
        }
        let classes = self.classes(node);
        if !compound.classes.iter().all(|c| classes.contains(&c.as_str())) {
            return false;
        }
        compound.attributes.iter().all(|test| match test {
            AttrTest::Present(name) => el.attributes.contains_key(name),
            AttrTest::Equals(name, value) => el.attributes.get(name) == Some(value),
            AttrTest::Prefix(name, prefix) => el.attributes.get(name).is_some_and(|v| v.starts_with(prefix.as_str())),
        })
    }
}

impl DocumentView for MemoryDocument {
    type Node = NodeId;

    fn root(&self) -> Option<NodeId> {
        Some(HTML)
    }

    fn body(&self) -> Option<NodeId> {
        Some(BODY)
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.select(selector, None)
    }

    fn query_within(&self, scope: &NodeId, selector: &str) -> Option<NodeId> {
        self.select(selector, Some(*scope)).into_iter().next()
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.get(*node).map_or_else(String::new, |el| el.tag.clone())
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.get(*node)?.attributes.get(name).cloned()
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        self.is_inside(*ancestor, *node)
    }

    fn offset_top(&self, node: &NodeId) -> f64 {
        self.get(*node).map_or(0.0, |el| el.offset_top)
    }

    fn offset_height(&self, node: &NodeId) -> f64 {
        self.get(*node).map_or(0.0, |el| el.offset_height)
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        if let Some(el) = self.get_mut(*node) {
            el.attributes.insert(name.to_owned(), value.to_owned());
        }
    }

    fn remove_attribute(&mut self, node: &NodeId, name: &str) {
        if let Some(el) = self.get_mut(*node) {
            el.attributes.remove(name);
        }
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        let mut classes: Vec<String> = self.classes(*node).into_iter().map(str::to_owned).collect();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_owned());
            self.write_classes(*node, &classes);
        }
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        let classes: Vec<String> = self
            .classes(*node)
            .into_iter()
            .filter(|c| *c != class)
            .map(str::to_owned)
            .collect();
        self.write_classes(*node, &classes);
    }

    fn set_text(&mut self, node: &NodeId, text: &str) {
        if let Some(el) = self.get_mut(*node) {
            el.text = text.to_owned();
        }
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: &str) {
        if let Some(el) = self.get_mut(*node) {
            el.style.insert(property.to_owned(), value.to_owned());
        }
    }

    fn focus(&mut self, node: &NodeId) {
        self.focused = Some(*node);
    }

    fn scroll_to(&mut self, top: f64, smooth: bool) {
        self.scrolls.push(ScrollRequest { top, smooth });
        self.scroll_y = top.max(0.0);
    }
}

// ── Selector parsing ────────────────────────────────────────────

#[derive(Debug, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttrTest>,
}

#[derive(Debug)]
enum AttrTest {
    Present(String),
    Equals(String, String),
    Prefix(String, String),
}

/// Parse `a, b c` into chains of compounds; `None` if any part is unsupported.
fn parse_selector_list(selector: &str) -> Option<Vec<Vec<Compound>>> {
    split_top_level(selector, |c| c == ',')
        .into_iter()
        .map(|part| {
            let chain = split_top_level(part, char::is_whitespace)
                .into_iter()
                .map(parse_compound)
                .collect::<Option<Vec<_>>>()?;
            if chain.is_empty() { None } else { Some(chain) }
        })
        .collect()
}

/// Split on `is_sep` outside brackets and quotes, dropping empty pieces.
fn split_top_level(source: &str, is_sep: impl Fn(char) -> bool) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0_usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in source.char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, _) if depth == 0 && is_sep(c) => {
                parts.push(source[start..i].trim());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(source[start..].trim());
    parts.retain(|p| !p.is_empty());
    parts
}

fn parse_compound(source: &str) -> Option<Compound> {
    let is_marker = |c: char| matches!(c, '#' | '.' | '[');
    let mut compound = Compound::default();

    let tag_end = source.find(is_marker).unwrap_or(source.len());
    let tag = &source[..tag_end];
    if !tag.is_empty() && tag != "*" {
        if !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return None;
        }
        compound.tag = Some(tag.to_ascii_uppercase());
    }

    let mut rest = &source[tag_end..];
    while let Some(marker) = rest.chars().next() {
        match marker {
            '#' | '.' => {
                let body = &rest[1..];
                let end = body.find(is_marker).unwrap_or(body.len());
                let name = &body[..end];
                if name.is_empty() {
                    return None;
                }
                if marker == '#' {
                    compound.id = Some(name.to_owned());
                } else {
                    compound.classes.push(name.to_owned());
                }
                rest = &body[end..];
            }
            '[' => {
                let close = closing_bracket(rest)?;
                compound.attributes.push(parse_attribute(&rest[1..close])?);
                rest = &rest[close + 1..];
            }
            _ => return None,
        }
    }
    Some(compound)
}

/// Byte index of the `]` closing the bracket that opens `source`.
fn closing_bracket(source: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in source.char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, ']') => return Some(i),
            _ => {}
        }
    }
    None
}

fn parse_attribute(inner: &str) -> Option<AttrTest> {
    if let Some((name, value)) = inner.split_once("^=") {
        return Some(AttrTest::Prefix(attribute_name(name)?, unquote(value)));
    }
    if let Some((name, value)) = inner.split_once('=') {
        return Some(AttrTest::Equals(attribute_name(name)?, unquote(value)));
    }
    Some(AttrTest::Present(attribute_name(inner)?))
}

fn attribute_name(raw: &str) -> Option<String> {
    let name = raw.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return None;
    }
    Some(name.to_ascii_lowercase())
}

fn unquote(raw: &str) -> String {
    let trimmed = raw.trim();
    for q in ['"', '\''] {
        if let Some(inner) = trimmed.strip_prefix(q).and_then(|s| s.strip_suffix(q)) {
            return inner.to_owned();
        }
    }
    trimmed.to_owned()
}
