//! In-memory document model
//!
//! Provides the element tree the motion layer animates: layout bounds,
//! inline styles, classes and attributes, event listeners, batched mutation
//! observers, and the host's native scroll position.
//!
//! Listener and observer callbacks are moved out of their slot while they
//! run, so a callback may freely add or remove listeners (observers even get
//! `&mut Document`). A callback removed during its own invocation is dropped
//! once it returns.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::error::{PlatformError, Result};
use crate::geometry::{Rect, Size};
use crate::input::{EventKind, InputEvent};
use crate::selector::Selector;
use crate::style::{Property, Style};

new_key_type! {
    /// Handle to an element in a [`Document`]
    pub struct ElementId;
    /// Handle to a registered event listener
    pub struct ListenerId;
    /// Handle to a registered mutation observer
    pub struct ObserverId;
}

/// Attribute that opts any element into cursor hover styling
pub const HOVER_ATTRIBUTE: &str = "data-cursor-hover";

/// Duration of the host's own smooth scroll (`scrollIntoView` with smooth behavior)
const NATIVE_SMOOTH_SCROLL_MS: f32 = 600.0;

/// Maximum observer delivery rounds per flush (observers may mutate)
const MAX_FLUSH_ROUNDS: usize = 16;

/// Element tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Anchor,
    Button,
    Div,
    Section,
    Nav,
    Main,
    Footer,
    Span,
    Image,
    Heading,
    Paragraph,
}

impl ElementKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "a" => ElementKind::Anchor,
            "button" => ElementKind::Button,
            "div" => ElementKind::Div,
            "section" => ElementKind::Section,
            "nav" => ElementKind::Nav,
            "main" => ElementKind::Main,
            "footer" => ElementKind::Footer,
            "span" => ElementKind::Span,
            "img" => ElementKind::Image,
            "h1" | "h2" | "h3" => ElementKind::Heading,
            "p" => ElementKind::Paragraph,
            _ => return None,
        })
    }

    pub fn tag(self) -> &'static str {
        match self {
            ElementKind::Anchor => "a",
            ElementKind::Button => "button",
            ElementKind::Div => "div",
            ElementKind::Section => "section",
            ElementKind::Nav => "nav",
            ElementKind::Main => "main",
            ElementKind::Footer => "footer",
            ElementKind::Span => "span",
            ElementKind::Image => "img",
            ElementKind::Heading => "h2",
            ElementKind::Paragraph => "p",
        }
    }

    /// Anchors and buttons react to the cursor without opting in
    pub fn is_interactive(self) -> bool {
        matches!(self, ElementKind::Anchor | ElementKind::Button)
    }
}

/// A node of the document tree
#[derive(Clone, Debug)]
pub struct Element {
    kind: ElementKind,
    id: Option<String>,
    classes: SmallVec<[String; 4]>,
    attributes: FxHashMap<String, String>,
    bounds: Rect,
    style: Style,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    fn new(kind: ElementKind, parent: Option<ElementId>) -> Self {
        Self {
            kind,
            id: None,
            classes: SmallVec::new(),
            attributes: FxHashMap::default(),
            bounds: Rect::default(),
            style: Style::new(),
            parent,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
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

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Whether the cursor treats this element as a hover target
    pub fn is_interactive(&self) -> bool {
        self.kind.is_interactive() || self.has_attribute(HOVER_ATTRIBUTE)
    }
}

/// Where a listener is attached
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// Receives every event of its kind
    Window,
    /// Receives only events addressed to this element
    Element(ElementId),
}

type Listener = Box<dyn FnMut(&InputEvent)>;

struct ListenerEntry {
    target: ListenerTarget,
    kind: EventKind,
    callback: Option<Listener>,
}

/// A change to the document tree
#[derive(Clone, Debug, PartialEq)]
pub enum MutationRecord {
    /// An element was inserted
    ChildAdded {
        parent: Option<ElementId>,
        child: ElementId,
    },
    /// An element (and its subtree) was removed
    ChildRemoved {
        parent: Option<ElementId>,
        child: ElementId,
    },
    /// An attribute was set or removed
    AttributeChanged { target: ElementId, name: String },
}

/// Mutation observer callback
pub type MutationObserver = Box<dyn FnMut(&mut Document, &[MutationRecord])>;

/// Enumerate interactive targets and subscribe to changes in that set
pub trait InteractiveRegistry {
    /// Current interactive elements in tree order
    fn interactive_targets(&self) -> Vec<ElementId>;

    /// Subscribe to subtree mutations
    fn observe(&mut self, observer: MutationObserver) -> ObserverId;

    /// Stop an observer; returns false if it was already gone
    fn disconnect(&mut self, id: ObserverId) -> bool;
}

/// Host-level smooth scroll in flight
#[derive(Clone, Copy, Debug)]
struct NativeScroll {
    from: f32,
    to: f32,
    elapsed_ms: f32,
}

/// The page document
pub struct Document {
    elements: SlotMap<ElementId, Element>,
    roots: Vec<ElementId>,
    viewport: Size,
    scroll_y: f32,
    native_scroll: Option<NativeScroll>,
    listeners: SlotMap<ListenerId, ListenerEntry>,
    observers: SlotMap<ObserverId, Option<MutationObserver>>,
    pending: Vec<MutationRecord>,
}

impl Document {
    pub fn new(viewport: Size) -> Self {
        Self {
            elements: SlotMap::with_key(),
            roots: Vec::new(),
            viewport,
            scroll_y: 0.0,
            native_scroll: None,
            listeners: SlotMap::with_key(),
            observers: SlotMap::with_key(),
            pending: Vec::new(),
        }
    }

    // =========================================================================
    // Tree
    // =========================================================================

    /// Create an element and append it to `parent` (or the root list)
    ///
    /// A parent that no longer exists makes the element a root.
    pub fn create_element(&mut self, kind: ElementKind, parent: Option<ElementId>) -> ElementId {
        let parent = parent.filter(|p| self.elements.contains_key(*p));
        let id = self.elements.insert(Element::new(kind, parent));
        match parent.and_then(|p| self.elements.get_mut(p)) {
            Some(p) => p.children.push(id),
            None => self.roots.push(id),
        }
        self.pending.push(MutationRecord::ChildAdded { parent, child: id });
        id
    }

    /// Remove an element and its whole subtree
    ///
    /// Listeners attached to removed elements are dropped with them.
    /// Returns false if the element was already gone.
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        let Some(parent) = self.elements.get(id).map(|e| e.parent) else {
            return false;
        };

        match parent.and_then(|p| self.elements.get_mut(p)) {
            Some(p) => p.children.retain(|c| *c != id),
            None => self.roots.retain(|c| *c != id),
        }

        let mut stack = vec![id];
        let mut removed = Vec::new();
        while let Some(next) = stack.pop() {
            if let Some(element) = self.elements.remove(next) {
                stack.extend(element.children);
                removed.push(next);
            }
        }

        self.listeners.retain(|_, l| match l.target {
            ListenerTarget::Element(target) => !removed.contains(&target),
            ListenerTarget::Window => true,
        });

        tracing::trace!("Document: removed {} element(s)", removed.len());
        self.pending
            .push(MutationRecord::ChildRemoved { parent, child: id });
        true
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All elements in tree (document) order
    pub fn tree_order(&self) -> Vec<ElementId> {
        let mut order = Vec::with_capacity(self.elements.len());
        let mut stack: Vec<ElementId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if let Some(element) = self.elements.get(id) {
                order.push(id);
                stack.extend(element.children.iter().rev().copied());
            }
        }
        order
    }

    // =========================================================================
    // Attributes, classes and ids
    // =========================================================================

    pub fn set_id(&mut self, id: ElementId, value: impl Into<String>) {
        if let Some(element) = self.elements.get_mut(id) {
            element.id = Some(value.into());
        }
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            if !element.has_class(class) {
                element.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.classes.retain(|c| c != class);
        }
    }

    /// Add or remove a class depending on `on`
    pub fn toggle_class(&mut self, id: ElementId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.elements.get(id).is_some_and(|e| e.has_class(class))
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        if let Some(element) = self.elements.get_mut(id) {
            element.attributes.insert(name.to_string(), value.into());
            self.pending.push(MutationRecord::AttributeChanged {
                target: id,
                name: name.to_string(),
            });
        }
    }

    pub fn remove_attribute(&mut self, id: ElementId, name: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            if element.attributes.remove(name).is_some() {
                self.pending.push(MutationRecord::AttributeChanged {
                    target: id,
                    name: name.to_string(),
                });
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Elements matching `selector`, in tree order
    pub fn query(&self, selector: &Selector) -> Vec<ElementId> {
        self.tree_order()
            .into_iter()
            .filter(|id| self.elements.get(*id).is_some_and(|e| selector.matches(e)))
            .collect()
    }

    /// Parse and run a selector
    pub fn query_str(&self, selector: &str) -> Result<Vec<ElementId>> {
        Ok(self.query(&Selector::parse(selector)?))
    }

    /// Elements matching `selector` inside the subtree rooted at `root`
    pub fn query_within(&self, root: ElementId, selector: &Selector) -> Vec<ElementId> {
        let mut found = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(element) = self.elements.get(id) {
                if id != root && selector.matches(element) {
                    found.push(id);
                }
                stack.extend(element.children.iter().rev().copied());
            }
        }
        found
    }

    /// First element with the given `id` attribute
    pub fn find_by_id(&self, value: &str) -> Option<ElementId> {
        self.query(&Selector::id(value)).into_iter().next()
    }

    /// Like [`Document::find_by_id`] but as an error for assembly-time lookups
    pub fn require_by_id(&self, value: &str) -> Result<ElementId> {
        self.find_by_id(value)
            .ok_or_else(|| PlatformError::ElementNotFound(format!("#{value}")))
    }

    // =========================================================================
    // Layout and style
    // =========================================================================

    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        if let Some(element) = self.elements.get_mut(id) {
            element.bounds = bounds;
        }
    }

    pub fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.elements.get(id).map(|e| e.bounds)
    }

    pub fn style(&self, id: ElementId) -> Option<&Style> {
        self.elements.get(id).map(|e| &e.style)
    }

    pub fn style_mut(&mut self, id: ElementId) -> Option<&mut Style> {
        self.elements.get_mut(id).map(|e| &mut e.style)
    }

    /// Current value of a style property, or `None` for a missing element
    pub fn get_style(&self, id: ElementId, property: Property) -> Option<f32> {
        self.style(id).map(|s| s.get(property))
    }

    /// Write a style property; silently ignored for a missing element
    pub fn set_style(&mut self, id: ElementId, property: Property, value: f32) {
        if let Some(style) = self.style_mut(id) {
            style.set(property, value);
        }
    }

    // =========================================================================
    // Viewport and native scrolling
    // =========================================================================

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
    }

    /// Total document height (bottom-most element edge)
    pub fn scroll_height(&self) -> f32 {
        self.elements
            .values()
            .map(|e| e.bounds.bottom())
            .fold(self.viewport.height, f32::max)
    }

    /// Largest valid native scroll position
    pub fn max_scroll(&self) -> f32 {
        (self.scroll_height() - self.viewport.height).max(0.0)
    }

    /// Native scroll position
    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Set the native scroll position, clamped to the document
    pub fn set_scroll_y(&mut self, y: f32) {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    /// Begin a host-level smooth scroll that brings `id` to the viewport top
    ///
    /// Missing elements are skipped. Returns whether a scroll started.
    pub fn scroll_into_view(&mut self, id: ElementId) -> bool {
        let Some(bounds) = self.bounds(id) else {
            return false;
        };
        self.smooth_scroll_to(bounds.top());
        true
    }

    /// Begin a host-level smooth scroll to a document position
    pub fn smooth_scroll_to(&mut self, y: f32) {
        let to = y.clamp(0.0, self.max_scroll());
        tracing::debug!("Document: smooth scroll {:.0} -> {:.0}", self.scroll_y, to);
        self.native_scroll = Some(NativeScroll {
            from: self.scroll_y,
            to,
            elapsed_ms: 0.0,
        });
    }

    pub fn is_native_scrolling(&self) -> bool {
        self.native_scroll.is_some()
    }

    /// Cancel a host smooth scroll in flight (user input takes over)
    pub fn cancel_native_scroll(&mut self) {
        self.native_scroll = None;
    }

    /// Advance the host smooth scroll; returns true while still moving
    pub fn advance_native_scroll(&mut self, dt_ms: f32) -> bool {
        let Some(mut scroll) = self.native_scroll else {
            return false;
        };
        scroll.elapsed_ms += dt_ms;
        let t = (scroll.elapsed_ms / NATIVE_SMOOTH_SCROLL_MS).clamp(0.0, 1.0);
        // ease-in-out cubic, the usual browser curve
        let eased = if t < 0.5 {
            4.0 * t * t * t
        } else {
            1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
        };
        self.set_scroll_y(scroll.from + (scroll.to - scroll.from) * eased);

        if t >= 1.0 {
            self.native_scroll = None;
            false
        } else {
            self.native_scroll = Some(scroll);
            true
        }
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    pub fn add_listener<F>(&mut self, target: ListenerTarget, kind: EventKind, callback: F) -> ListenerId
    where
        F: FnMut(&InputEvent) + 'static,
    {
        self.listeners.insert(ListenerEntry {
            target,
            kind,
            callback: Some(Box::new(callback)),
        })
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id).is_some()
    }

    /// Number of listeners of a kind, across all targets
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.values().filter(|l| l.kind == kind).count()
    }

    /// Deliver an input event; returns how many listeners ran
    pub fn dispatch(&mut self, event: &InputEvent) -> usize {
        let kind = event.kind();
        let target = event.target();
        let ids: Vec<ListenerId> = self
            .listeners
            .iter()
            .filter(|(_, l)| {
                l.kind == kind
                    && match l.target {
                        ListenerTarget::Window => true,
                        ListenerTarget::Element(id) => target == Some(id),
                    }
            })
            .map(|(id, _)| id)
            .collect();

        let mut invoked = 0;
        for id in ids {
            let Some(mut callback) = self.listeners.get_mut(id).and_then(|l| l.callback.take())
            else {
                continue;
            };
            callback(event);
            invoked += 1;
            if let Some(entry) = self.listeners.get_mut(id) {
                entry.callback = Some(callback);
            }
        }
        invoked
    }

    // =========================================================================
    // Mutation observers
    // =========================================================================

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Deliver queued mutation records to every observer
    ///
    /// Observers may mutate the document; the records they produce are
    /// delivered in a following round.
    pub fn flush_mutations(&mut self) {
        for _ in 0..MAX_FLUSH_ROUNDS {
            if self.pending.is_empty() {
                return;
            }
            let records = std::mem::take(&mut self.pending);
            if self.observers.is_empty() {
                return;
            }

            let ids: Vec<ObserverId> = self.observers.keys().collect();
            for id in ids {
                let Some(mut observer) = self.observers.get_mut(id).and_then(Option::take) else {
                    continue;
                };
                observer(self, &records);
                if let Some(slot) = self.observers.get_mut(id) {
                    *slot = Some(observer);
                }
            }
        }
        if !self.pending.is_empty() {
            tracing::warn!(
                "Document: dropping {} mutation record(s) after {} observer rounds",
                self.pending.len(),
                MAX_FLUSH_ROUNDS
            );
            self.pending.clear();
        }
    }
}

impl InteractiveRegistry for Document {
    fn interactive_targets(&self) -> Vec<ElementId> {
        self.tree_order()
            .into_iter()
            .filter(|id| self.elements.get(*id).is_some_and(Element::is_interactive))
            .collect()
    }

    fn observe(&mut self, observer: MutationObserver) -> ObserverId {
        self.observers.insert(Some(observer))
    }

    fn disconnect(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id).is_some()
    }
}
