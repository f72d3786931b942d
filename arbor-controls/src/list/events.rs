//! Focus tracking and keyboard navigation for the list controller.

use arbor::{ComponentId, Event, Key, Tree};

use crate::collection::Item;
use crate::events::EventResult;

use super::state::ListController;

impl<T: Item> ListController<T> {
    /// Handle an event bubbling up from the container or one of its
    /// descendants.
    ///
    /// Focus notifications are only observed (`Ignored`), so they keep
    /// bubbling. Arrow keys that actually move focus are `Consumed`.
    pub fn handle_event(&mut self, tree: &mut Tree, event: &Event) -> EventResult {
        match event {
            Event::FocusIn { target } => {
                self.on_focus_in(tree, *target);
                EventResult::Ignored
            }
            Event::Key {
                target: Some(target),
                key,
                modifiers,
            } if modifiers.none() => match key {
                Key::Up => self.move_focus(tree, *target, false),
                Key::Down => self.move_focus(tree, *target, true),
                _ => EventResult::Ignored,
            },
            _ => EventResult::Ignored,
        }
    }

    /// Focus the item at the remembered position, clamped to the rendered
    /// range. Silent no-op on an empty list or an item that does not take
    /// focus.
    pub fn restore_focus(&self, tree: &mut Tree) -> bool {
        let children = tree.children(self.container);
        let Some(last) = children.len().checked_sub(1) else {
            return false;
        };
        let target = children[self.last_focused_index.min(last)];
        log::debug!(
            "[list] restoring focus to index {} ({})",
            self.last_focused_index.min(last),
            target
        );
        tree.request_focus(target)
    }

    /// Index of the rendered item that is, or contains, `component`.
    ///
    /// Returns `None` when the component is not inside the container (or is
    /// the container itself).
    pub fn index_of_component(&self, tree: &Tree, component: ComponentId) -> Option<usize> {
        let item = tree.child_of_ancestor(self.container, component)?;
        tree.children(self.container).iter().position(|c| *c == item)
    }

    fn on_focus_in(&mut self, tree: &mut Tree, target: ComponentId) {
        if target == self.container {
            // Focus landed on the list as a whole; hand it to a real item.
            self.restore_focus(tree);
            return;
        }
        if let Some(index) = self.index_of_component(tree, target) {
            log::trace!("[list] item {} focused at index {}", target, index);
            self.last_focused_index = index;
        }
    }

    fn move_focus(&mut self, tree: &mut Tree, target: ComponentId, forward: bool) -> EventResult {
        if !self.options.enable_arrow_key_focus {
            return EventResult::Ignored;
        }
        let Some(item) = tree.child_of_ancestor(self.container, target) else {
            return EventResult::Ignored;
        };

        let moved = if forward {
            tree.request_focus_next(item)
        } else {
            tree.request_focus_previous(item)
        };
        if moved {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}
