//! In-memory document model.
//!
//! The controllers in [`crate::ui`] never talk to a browser. They read and
//! mutate a [`Document`]: an arena of [`Element`]s with the handful of
//! properties the portfolio behaviours touch (class list, `data-*`
//! attributes, text, form value, disabled flag, inline display/animation/color
//! and a layout rectangle for visibility checks).
//!
//! Elements are addressed by [`ElementId`] handles that stay valid for the
//! lifetime of the document. Detached elements keep their handle but drop out
//! of every query, the same way a removed DOM node stops matching
//! `querySelectorAll`.
//!
//! ```rust
//! use simple_folio::dom::Document;
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let nav = doc.build("nav").class("navbar").append_to(body);
//! doc.add_class(nav, "scrolled");
//! assert!(doc.has_class(nav, "scrolled"));
//! assert_eq!(doc.by_class("navbar"), vec![nav]);
//! ```

use std::collections::BTreeMap;

/// Handle to an element inside one [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// Inline `style.display` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    /// No inline value; the stylesheet decides.
    #[default]
    Unset,
    Block,
    None,
}

/// Vertical layout box in document coordinates (pixels from the page top).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    data: BTreeMap<String, String>,
    attrs: BTreeMap<String, String>,
    text: String,
    inner_html: Option<String>,
    value: String,
    disabled: bool,
    display: Display,
    animation: Option<String>,
    color: Option<String>,
    rect: Option<Rect>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// `class` attribute as it would serialize.
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn inner_html(&self) -> Option<&str> {
        self.inner_html.as_deref()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn display(&self) -> Display {
        self.display
    }

    pub fn animation(&self) -> Option<&str> {
        self.animation.as_deref()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

/// Default viewport height used by [`Document::new`].
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.0;

/// An arena-backed document with a `<head>` and a `<body>`.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    root: ElementId,
    head: ElementId,
    body: ElementId,
    scroll_y: f64,
    viewport_height: f64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Element::new("html")],
            root: ElementId(0),
            head: ElementId(0),
            body: ElementId(0),
            scroll_y: 0.0,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
        };
        let head = doc.create("head");
        let body = doc.create("body");
        doc.append(doc.root, head);
        doc.append(doc.root, body);
        doc.head = head;
        doc.body = body;
        doc
    }

    pub fn head(&self) -> ElementId {
        self.head
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    pub fn get(&self, id: ElementId) -> &Element {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.nodes[id.0]
    }

    // ------------------------------------------------------------------
    // Tree
    // ------------------------------------------------------------------

    /// Create a detached element.
    pub fn create(&mut self, tag: &str) -> ElementId {
        self.nodes.push(Element::new(tag));
        ElementId(self.nodes.len() - 1)
    }

    /// Start building a detached element; finish with
    /// [`ElementBuilder::append_to`] or [`ElementBuilder::finish`].
    pub fn build(&mut self, tag: &str) -> ElementBuilder<'_> {
        let id = self.create(tag);
        ElementBuilder { doc: self, id }
    }

    /// Move `child` under `parent`, after its existing children.
    pub fn append(&mut self, parent: ElementId, child: ElementId) {
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    pub fn detach(&mut self, id: ElementId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.node_mut(parent).children.retain(|c| *c != id);
        }
    }

    /// Equivalent of `innerHTML = ''`: every child is detached.
    pub fn clear_children(&mut self, parent: ElementId) {
        let children = std::mem::take(&mut self.node_mut(parent).children);
        for child in children {
            self.node_mut(child).parent = None;
        }
        self.node_mut(parent).inner_html = None;
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).parent
    }

    pub fn is_attached(&self, id: ElementId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.get(current).parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// True when `node` is `ancestor` or sits anywhere below it.
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).parent;
        }
        false
    }

    /// Pre-order descendants of `root`, excluding `root` itself.
    pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.get(root).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.get(id).children.iter().rev().copied());
        }
        out
    }

    // ------------------------------------------------------------------
    // Queries (attached elements only, document order)
    // ------------------------------------------------------------------

    pub fn by_id(&self, id: &str) -> Option<ElementId> {
        self.descendants(self.root)
            .into_iter()
            .find(|e| self.get(*e).id() == Some(id))
    }

    pub fn by_class(&self, class: &str) -> Vec<ElementId> {
        self.within_by_class(self.root, class)
    }

    /// Elements carrying every class in `classes`.
    pub fn by_classes(&self, classes: &[&str]) -> Vec<ElementId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|e| classes.iter().all(|c| self.get(*e).has_class(c)))
            .collect()
    }

    pub fn first_by_class(&self, class: &str) -> Option<ElementId> {
        self.by_class(class).into_iter().next()
    }

    pub fn within_by_class(&self, root: ElementId, class: &str) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|e| self.get(*e).has_class(class))
            .collect()
    }

    pub fn within_by_tag(&self, root: ElementId, tag: &str) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|e| self.get(*e).tag == tag)
            .collect()
    }

    // ------------------------------------------------------------------
    // Class list
    // ------------------------------------------------------------------

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.get(id).has_class(class)
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        let node = self.node_mut(id);
        if !node.has_class(class) {
            node.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        self.node_mut(id).classes.retain(|c| c != class);
    }

    /// Flip `class`; returns whether it is present afterwards.
    pub fn toggle_class(&mut self, id: ElementId, class: &str) -> bool {
        if self.has_class(id, class) {
            self.remove_class(id, class);
            false
        } else {
            self.add_class(id, class);
            true
        }
    }

    pub fn set_class(&mut self, id: ElementId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    /// Replace the whole class list from a space separated string.
    pub fn set_class_name(&mut self, id: ElementId, class_name: &str) {
        self.node_mut(id).classes = class_name.split_whitespace().map(str::to_string).collect();
    }

    // ------------------------------------------------------------------
    // Attributes, content and style
    // ------------------------------------------------------------------

    pub fn set_id(&mut self, id: ElementId, value: &str) {
        self.node_mut(id).id = Some(value.to_string());
    }

    pub fn data(&self, id: ElementId, key: &str) -> Option<&str> {
        self.get(id).data(key)
    }

    pub fn set_data(&mut self, id: ElementId, key: &str, value: &str) {
        self.node_mut(id)
            .data
            .insert(key.to_string(), value.to_string());
    }

    pub fn attr(&self, id: ElementId, key: &str) -> Option<&str> {
        self.get(id).attr(key)
    }

    pub fn set_attr(&mut self, id: ElementId, key: &str, value: &str) {
        self.node_mut(id)
            .attrs
            .insert(key.to_string(), value.to_string());
    }

    pub fn text(&self, id: ElementId) -> &str {
        self.get(id).text()
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        self.node_mut(id).text = text.into();
    }

    pub fn set_inner_html(&mut self, id: ElementId, html: impl Into<String>) {
        self.node_mut(id).inner_html = Some(html.into());
    }

    pub fn value(&self, id: ElementId) -> &str {
        self.get(id).value()
    }

    pub fn set_value(&mut self, id: ElementId, value: impl Into<String>) {
        self.node_mut(id).value = value.into();
    }

    pub fn is_disabled(&self, id: ElementId) -> bool {
        self.get(id).disabled
    }

    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) {
        self.node_mut(id).disabled = disabled;
    }

    pub fn display(&self, id: ElementId) -> Display {
        self.get(id).display
    }

    pub fn set_display(&mut self, id: ElementId, display: Display) {
        self.node_mut(id).display = display;
    }

    pub fn set_animation(&mut self, id: ElementId, animation: Option<&str>) {
        self.node_mut(id).animation = animation.map(str::to_string);
    }

    pub fn set_color(&mut self, id: ElementId, color: &str) {
        self.node_mut(id).color = Some(color.to_string());
    }

    pub fn set_rect(&mut self, id: ElementId, rect: Rect) {
        self.node_mut(id).rect = Some(rect);
    }

    /// Append a `<style>` element to `<head>`.
    pub fn inject_style(&mut self, css: &str) -> ElementId {
        let head = self.head;
        self.build("style").text(css).append_to(head)
    }

    /// Text of every `<style>` in `<head>`, in order.
    pub fn styles(&self) -> Vec<&str> {
        self.within_by_tag(self.head, "style")
            .into_iter()
            .map(|s| self.text(s))
            .collect()
    }

    // ------------------------------------------------------------------
    // Viewport
    // ------------------------------------------------------------------

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn set_scroll_y(&mut self, offset: f64) {
        self.scroll_y = offset.max(0.0);
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height.max(0.0);
    }
}

/// Fluent construction of one element. Created by [`Document::build`].
pub struct ElementBuilder<'a> {
    doc: &'a mut Document,
    id: ElementId,
}

impl ElementBuilder<'_> {
    pub fn id(self, value: &str) -> Self {
        self.doc.set_id(self.id, value);
        self
    }

    /// Add one or more space separated classes.
    pub fn class(self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.doc.add_class(self.id, class);
        }
        self
    }

    pub fn data(self, key: &str, value: &str) -> Self {
        self.doc.set_data(self.id, key, value);
        self
    }

    pub fn attr(self, key: &str, value: &str) -> Self {
        self.doc.set_attr(self.id, key, value);
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.doc.set_text(self.id, text);
        self
    }

    pub fn rect(self, top: f64, height: f64) -> Self {
        self.doc.set_rect(self.id, Rect::new(top, height));
        self
    }

    pub fn append_to(self, parent: ElementId) -> ElementId {
        self.doc.append(parent, self.id);
        self.id
    }

    /// Leave the element detached.
    pub fn finish(self) -> ElementId {
        self.id
    }
}
