use std::any::Any;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::component::{ComponentId, RenderContext, Widget};
use crate::element::Element;
use crate::event::Event;
use crate::focus::{focusable_sibling, FocusState, SiblingDirection};

struct Node {
    widget: Box<dyn Widget>,
    parent: Option<ComponentId>,
    children: Vec<ComponentId>,
}

impl Node {
    fn widget_any(&self) -> &dyn Any {
        let widget: &dyn Widget = &*self.widget;
        widget.as_any()
    }

    fn widget_any_mut(&mut self) -> &mut dyn Any {
        let widget: &mut dyn Widget = &mut *self.widget;
        widget.as_any_mut()
    }
}

/// Arena of mounted components.
///
/// The tree owns every component, knows each one's parent and ordered
/// children, holds the focus state and queues the events components raise.
/// Components that are detached from their parent stay in the arena until
/// they are removed.
#[derive(Default)]
pub struct Tree {
    nodes: HashMap<ComponentId, Node>,
    focus: FocusState,
    events: VecDeque<Event>,
}

impl std::fmt::Debug for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tree")
            .field("nodes", &self.nodes.len())
            .field("focus", &self.focus)
            .field("pending_events", &self.events.len())
            .finish()
    }
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Mounting
    // -------------------------------------------------------------------------

    /// Mount a detached component and return its id.
    pub fn insert(&mut self, widget: impl Widget + 'static) -> ComponentId {
        self.insert_boxed(Box::new(widget))
    }

    /// Mount an already boxed component.
    pub fn insert_boxed(&mut self, widget: Box<dyn Widget>) -> ComponentId {
        let id = ComponentId::next();
        self.nodes.insert(
            id,
            Node {
                widget,
                parent: None,
                children: Vec::new(),
            },
        );
        log::trace!("[tree] insert {}", id);
        id
    }

    /// Append `child` to the end of `parent`'s children, moving it out of any
    /// previous parent.
    pub fn append_child(&mut self, parent: ComponentId, child: ComponentId) -> bool {
        let mut children = self.children(parent).to_vec();
        if !self.nodes.contains_key(&parent) {
            return false;
        }
        children.retain(|c| *c != child);
        children.push(child);
        self.replace_children(parent, children)
    }

    /// Atomically swap the full child sequence of `parent`.
    ///
    /// Children that are not in the new sequence become detached roots (they
    /// are not destroyed). Unknown ids, duplicates, and ids that would create a
    /// cycle are skipped.
    pub fn replace_children(&mut self, parent: ComponentId, children: Vec<ComponentId>) -> bool {
        if !self.nodes.contains_key(&parent) {
            log::debug!("[tree] replace_children on unknown parent {}", parent);
            return false;
        }

        let mut seen = HashSet::new();
        let mut accepted = Vec::with_capacity(children.len());
        for child in children {
            if !self.nodes.contains_key(&child) || self.is_ancestor_or_self(child, parent) {
                log::warn!("[tree] refusing to attach {} under {}", child, parent);
                continue;
            }
            if seen.insert(child) {
                accepted.push(child);
            }
        }

        let previous = match self.nodes.get_mut(&parent) {
            Some(node) => std::mem::take(&mut node.children),
            None => return false,
        };
        for old in previous {
            if !seen.contains(&old) {
                if let Some(node) = self.nodes.get_mut(&old) {
                    node.parent = None;
                }
            }
        }

        for child in &accepted {
            let old_parent = self.nodes.get(child).and_then(|n| n.parent);
            if let Some(old_parent) = old_parent {
                if old_parent != parent {
                    if let Some(node) = self.nodes.get_mut(&old_parent) {
                        node.children.retain(|c| c != child);
                    }
                }
            }
            if let Some(node) = self.nodes.get_mut(child) {
                node.parent = Some(parent);
            }
        }

        log::trace!("[tree] {} children -> {:?}", parent, accepted);
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children = accepted;
        }
        true
    }

    /// Detach a component from its parent without destroying it.
    pub fn detach(&mut self, id: ComponentId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.retain(|c| *c != id);
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = None;
        }
        true
    }

    /// Destroy a component and its whole subtree.
    pub fn remove(&mut self, id: ComponentId) -> bool {
        if !self.nodes.contains_key(&id) {
            return false;
        }
        self.detach(id);

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend(node.children);
            }
            if self.focus.focused() == Some(current) {
                log::debug!("[focus] focused component {} removed, clearing focus", current);
                self.focus.blur();
            }
        }
        log::trace!("[tree] removed {}", id);
        true
    }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    pub fn contains(&self, id: ComponentId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Immediate structural parent, or `None` at a root.
    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Ordered children (empty for leaves and unknown ids).
    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Position of `id` within its parent's children.
    pub fn index_in_parent(&self, id: ComponentId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|c| *c == id)
    }

    /// Iterate `id` and then its ancestors up to the root.
    pub fn ancestors(&self, id: ComponentId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.contains(id).then_some(id),
        }
    }

    pub fn is_ancestor_or_self(&self, ancestor: ComponentId, id: ComponentId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Walk up from `id` to the direct child of `ancestor` on that path.
    ///
    /// Returns `None` if `id` is `ancestor` itself or lies outside it.
    pub fn child_of_ancestor(&self, ancestor: ComponentId, id: ComponentId) -> Option<ComponentId> {
        let mut current = id;
        loop {
            let parent = self.parent(current)?;
            if parent == ancestor {
                return Some(current);
            }
            current = parent;
        }
    }

    // -------------------------------------------------------------------------
    // Widgets
    // -------------------------------------------------------------------------

    /// Borrow the concrete widget behind `id`.
    pub fn widget<W: Widget + 'static>(&self, id: ComponentId) -> Option<&W> {
        self.nodes.get(&id)?.widget_any().downcast_ref::<W>()
    }

    pub fn widget_mut<W: Widget + 'static>(&mut self, id: ComponentId) -> Option<&mut W> {
        self.nodes.get_mut(&id)?.widget_any_mut().downcast_mut::<W>()
    }

    /// Whether the component has the focus capability and currently accepts focus.
    pub fn is_focusable(&self, id: ComponentId) -> bool {
        self.nodes
            .get(&id)
            .and_then(|n| n.widget.as_focusable())
            .is_some_and(|f| f.accepts_focus())
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    pub fn focused(&self) -> Option<ComponentId> {
        self.focus.focused()
    }

    pub fn has_focus(&self, id: ComponentId) -> bool {
        self.focus.focused() == Some(id)
    }

    /// Ask `id` to take input focus.
    ///
    /// Components without the focus capability ignore the request and `false`
    /// is returned. A change of focus queues `FocusOut` / `FocusIn` events.
    pub fn request_focus(&mut self, id: ComponentId) -> bool {
        if !self.is_focusable(id) {
            log::trace!("[focus] {} does not take focus", id);
            return false;
        }

        let old = self.focus.focused();
        if self.focus.focus(id) {
            log::debug!("[focus] Changing focus from {:?} to {}", old, id);
            if let Some(old) = old {
                self.events.push_back(Event::FocusOut { target: old });
            }
            self.events.push_back(Event::FocusIn { target: id });
        }
        true
    }

    /// Move focus to the nearest focusable sibling before `id`.
    pub fn request_focus_previous(&mut self, id: ComponentId) -> bool {
        match focusable_sibling(self, id, SiblingDirection::Previous) {
            Some(target) => self.request_focus(target),
            None => false,
        }
    }

    /// Move focus to the nearest focusable sibling after `id`.
    pub fn request_focus_next(&mut self, id: ComponentId) -> bool {
        match focusable_sibling(self, id, SiblingDirection::Next) {
            Some(target) => self.request_focus(target),
            None => false,
        }
    }

    /// Clear focus, queueing a `FocusOut` for the previous holder.
    pub fn blur(&mut self) -> bool {
        match self.focus.focused() {
            Some(old) => {
                self.focus.blur();
                self.events.push_back(Event::FocusOut { target: old });
                true
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Queue a typed event raised by `source`.
    pub fn emit<T: Any + Send + Sync>(&mut self, source: ComponentId, payload: T) {
        self.events.push_back(Event::emitted(source, payload));
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Drain queued events in the order they were raised.
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Render `id` and its subtree into an element tree.
    pub fn render(&self, id: ComponentId) -> Option<Element> {
        let node = self.nodes.get(&id)?;
        let children = node
            .children
            .iter()
            .filter_map(|child| self.render(*child))
            .collect();
        let focused = self.has_focus(id);

        let mut element = node.widget.render(RenderContext {
            id,
            focused,
            children,
        });
        element.id = id.to_string();
        element.focused = focused;
        element.focusable = self.is_focusable(id);
        Some(element)
    }
}

/// Iterator over a component and its ancestors.
pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<ComponentId>,
}

impl Iterator for Ancestors<'_> {
    type Item = ComponentId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
