//! Document model
//!
//! An in-memory element tree standing in for the hosting page: tags, ids,
//! classes, a handful of inline style properties, and border boxes in
//! document coordinates. The page markup itself is an external collaborator;
//! behaviors only decorate whatever tree they are handed.
//!
//! Attribute writes are journaled so observers can be notified after the
//! writing handler completes, mirroring how attribute mutation observation
//! is delivered on the hosting side.

use crate::color::Color;
use crate::geometry::{Rect, Size};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Unique identifier for an element in a document
    pub struct ElementId;
}

/// Style properties a transition declaration can cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionProperty {
    Opacity,
    Transform,
}

/// Timing keyword for a declared transition. The animation layer maps these
/// onto concrete curves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimingFunction {
    #[default]
    Ease,
    EaseInOut,
    Linear,
}

/// A declared transition on an element: which properties animate, how long,
/// and with what timing.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionDecl {
    pub properties: SmallVec<[TransitionProperty; 2]>,
    pub duration_ms: u32,
    pub timing: TimingFunction,
}

impl TransitionDecl {
    pub fn new(
        properties: impl IntoIterator<Item = TransitionProperty>,
        duration_ms: u32,
        timing: TimingFunction,
    ) -> Self {
        Self {
            properties: properties.into_iter().collect(),
            duration_ms,
            timing,
        }
    }

    pub fn covers(&self, property: TransitionProperty) -> bool {
        self.properties.contains(&property)
    }
}

/// Inline style of an element. Only the properties the behaviors touch.
#[derive(Clone, Debug, Default)]
pub struct InlineStyle {
    pub opacity: Option<f32>,
    pub translate_y: Option<f32>,
    pub background: Option<Color>,
    pub transition: Option<TransitionDecl>,
    pub transition_delay_ms: Option<u32>,
}

/// A class-scoped style rule registered on the document. Rules marked
/// `important` take precedence over inline values, later rules over earlier
/// ones.
#[derive(Clone, Debug)]
pub struct ClassRule {
    pub class: String,
    pub opacity: Option<f32>,
    pub translate_y: Option<f32>,
    pub important: bool,
}

/// A recorded attribute write, drained by the runtime and delivered to
/// observers after the writing handler returns.
#[derive(Clone, Debug)]
pub struct Mutation {
    pub target: ElementId,
    pub attribute: String,
}

/// An element in the document tree.
#[derive(Debug)]
pub struct Element {
    pub tag: String,
    id: Option<String>,
    classes: SmallVec<[String; 4]>,
    attributes: FxHashMap<String, String>,
    pub style: InlineStyle,
    pub bounds: Rect,
    children: Vec<ElementId>,
    parent: Option<ElementId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: SmallVec::new(),
            attributes: FxHashMap::default(),
            style: InlineStyle::default(),
            bounds: Rect::ZERO,
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }
}

/// The element tree plus the scroll/viewport state the behaviors read.
pub struct Document {
    nodes: SlotMap<ElementId, Element>,
    root: ElementId,
    viewport: Size,
    scroll_y: f32,
    class_rules: Vec<ClassRule>,
    mutations: Vec<Mutation>,
}

impl Document {
    pub fn new(viewport: Size) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Element::new("html"));
        Self {
            nodes,
            root,
            viewport,
            scroll_y: 0.0,
            class_rules: Vec::new(),
            mutations: Vec::new(),
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn set_scroll_y(&mut self, offset: f32) {
        self.scroll_y = offset.max(0.0);
    }

    /// The currently visible region, in document coordinates.
    pub fn viewport_rect(&self) -> Rect {
        Rect {
            origin: crate::geometry::Point::new(0.0, self.scroll_y),
            size: self.viewport,
        }
    }

    // ========== Tree construction ==========

    /// Create a detached element. Attach it with [`Document::append_child`].
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.insert(Element::new(tag))
    }

    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
    }

    pub fn set_id(&mut self, element: ElementId, id: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.id = Some(id.to_string());
        }
    }

    pub fn set_bounds(&mut self, element: ElementId, bounds: Rect) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.bounds = bounds;
        }
    }

    // ========== Access ==========

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.nodes.get_mut(id)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn bounds(&self, id: ElementId) -> Rect {
        self.nodes.get(id).map(|n| n.bounds).unwrap_or(Rect::ZERO)
    }

    /// Top edge of the element relative to the visible viewport, the live
    /// equivalent of a bounding-client-rect top.
    pub fn top_relative_to_viewport(&self, id: ElementId) -> f32 {
        self.bounds(id).y() - self.scroll_y
    }

    // ========== Attributes (journaled) ==========

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.attribute(name))
    }

    /// Write an attribute and record the mutation for observer delivery.
    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.attributes.insert(name.to_string(), value.to_string());
        tracing::trace!(attribute = name, value, "attribute write");
        self.mutations.push(Mutation {
            target: id,
            attribute: name.to_string(),
        });
    }

    /// Drain the journaled attribute writes.
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.mutations)
    }

    // ========== Classes ==========

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            if !node.has_class(class) {
                node.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.classes.retain(|c| c != class);
        }
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.nodes.get(id).is_some_and(|n| n.has_class(class))
    }

    pub fn toggle_class(&mut self, id: ElementId, class: &str) {
        if self.has_class(id, class) {
            self.remove_class(id, class);
        } else {
            self.add_class(id, class);
        }
    }

    // ========== Queries (document order) ==========

    fn walk(&self) -> Vec<ElementId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(node) = self.nodes.get(id) {
                for child in node.children.iter().rev() {
                    stack.push(*child);
                }
            }
        }
        out
    }

    pub fn first_by_class(&self, class: &str) -> Option<ElementId> {
        self.walk()
            .into_iter()
            .find(|id| self.has_class(*id, class))
    }

    pub fn by_class(&self, class: &str) -> Vec<ElementId> {
        self.walk()
            .into_iter()
            .filter(|id| self.has_class(*id, class))
            .collect()
    }

    pub fn by_tag(&self, tag: &str) -> Vec<ElementId> {
        self.walk()
            .into_iter()
            .filter(|id| self.nodes.get(*id).is_some_and(|n| n.tag == tag))
            .collect()
    }

    /// Descendants of `ancestor` with the given tag, in document order. The
    /// ancestor itself is not included.
    pub fn by_tag_within(&self, ancestor: ElementId, tag: &str) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self
            .children(ancestor)
            .iter()
            .rev()
            .copied()
            .collect();
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(id) {
                if node.tag == tag {
                    out.push(id);
                }
                for child in node.children.iter().rev() {
                    stack.push(*child);
                }
            }
        }
        out
    }

    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.walk()
            .into_iter()
            .find(|el| self.nodes.get(*el).is_some_and(|n| n.id() == Some(id)))
    }

    // ========== Style resolution ==========

    /// Register a class-scoped rule. Later registrations win within the same
    /// precedence tier.
    pub fn register_class_rule(&mut self, rule: ClassRule) {
        self.class_rules.push(rule);
    }

    /// Resolved opacity: important class rules beat inline, inline beats
    /// ordinary class rules, default 1.0.
    pub fn effective_opacity(&self, id: ElementId) -> f32 {
        self.resolve(id, |rule| rule.opacity, |style| style.opacity)
            .unwrap_or(1.0)
    }

    /// Resolved vertical offset, same precedence as opacity, default 0.0.
    pub fn effective_translate_y(&self, id: ElementId) -> f32 {
        self.resolve(id, |rule| rule.translate_y, |style| style.translate_y)
            .unwrap_or(0.0)
    }

    fn resolve(
        &self,
        id: ElementId,
        from_rule: impl Fn(&ClassRule) -> Option<f32>,
        from_inline: impl Fn(&InlineStyle) -> Option<f32>,
    ) -> Option<f32> {
        let node = self.nodes.get(id)?;

        let matching = |important: bool| {
            self.class_rules
                .iter()
                .filter(|rule| rule.important == important && node.has_class(&rule.class))
                .filter_map(&from_rule)
                .last()
        };

        matching(true)
            .or_else(|| from_inline(&node.style))
            .or_else(|| matching(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document::new(Size::new(1280.0, 720.0))
    }

    #[test]
    fn queries_follow_document_order() {
        let mut d = doc();
        let a = d.create_element("section");
        let b = d.create_element("section");
        let inner = d.create_element("div");
        d.add_class(a, "card");
        d.add_class(inner, "card");
        d.add_class(b, "card");
        d.append_child(d.root(), a);
        d.append_child(a, inner);
        d.append_child(d.root(), b);

        assert_eq!(d.first_by_class("card"), Some(a));
        assert_eq!(d.by_class("card"), vec![a, inner, b]);
    }

    #[test]
    fn element_lookup_by_id() {
        let mut d = doc();
        let el = d.create_element("section");
        d.set_id(el, "skills");
        d.append_child(d.root(), el);

        assert_eq!(d.element_by_id("skills"), Some(el));
        assert_eq!(d.element_by_id("missing"), None);
    }

    #[test]
    fn attribute_writes_are_journaled() {
        let mut d = doc();
        let root = d.root();
        d.set_attribute(root, "data-theme", "dark");
        d.set_attribute(root, "data-theme", "light");

        let muts = d.take_mutations();
        assert_eq!(muts.len(), 2);
        assert!(muts.iter().all(|m| m.attribute == "data-theme"));
        assert!(d.take_mutations().is_empty());
    }

    #[test]
    fn important_class_rule_overrides_inline() {
        let mut d = doc();
        let el = d.create_element("div");
        d.append_child(d.root(), el);
        d.element_mut(el).unwrap().style.opacity = Some(0.0);
        d.element_mut(el).unwrap().style.translate_y = Some(20.0);

        assert_eq!(d.effective_opacity(el), 0.0);

        d.add_class(el, "animate-in");
        d.register_class_rule(ClassRule {
            class: "animate-in".into(),
            opacity: Some(1.0),
            translate_y: Some(0.0),
            important: true,
        });

        assert_eq!(d.effective_opacity(el), 1.0);
        assert_eq!(d.effective_translate_y(el), 0.0);
    }

    #[test]
    fn top_relative_to_viewport_tracks_scroll() {
        let mut d = doc();
        let el = d.create_element("section");
        d.append_child(d.root(), el);
        d.set_bounds(el, Rect::new(0.0, 900.0, 100.0, 100.0));

        assert_eq!(d.top_relative_to_viewport(el), 900.0);
        d.set_scroll_y(400.0);
        assert_eq!(d.top_relative_to_viewport(el), 500.0);
    }

    #[test]
    fn scroll_offset_clamps_at_zero() {
        let mut d = doc();
        d.set_scroll_y(-50.0);
        assert_eq!(d.scroll_y(), 0.0);
    }
}
