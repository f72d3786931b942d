use crate::component::ComponentId;
use crate::tree::Tree;

/// Tracks which component is currently focused.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<ComponentId>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused component.
    pub fn focused(&self) -> Option<ComponentId> {
        self.focused
    }

    /// Programmatically focus a component.
    /// Returns true if focus changed.
    pub fn focus(&mut self, id: ComponentId) -> bool {
        if self.focused == Some(id) {
            return false;
        }
        self.focused = Some(id);
        true
    }

    /// Clear focus.
    /// Returns true if there was something focused.
    pub fn blur(&mut self) -> bool {
        self.focused.take().is_some()
    }
}

/// Which way to look for a sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingDirection {
    Previous,
    Next,
}

/// Collect all focusable component IDs below `root` (inclusive) in tree order.
pub fn collect_focusable(tree: &Tree, root: ComponentId) -> Vec<ComponentId> {
    let mut result = Vec::new();
    collect_focusable_recursive(tree, root, &mut result);
    result
}

fn collect_focusable_recursive(tree: &Tree, id: ComponentId, result: &mut Vec<ComponentId>) {
    if tree.is_focusable(id) {
        result.push(id);
    }
    for child in tree.children(id) {
        collect_focusable_recursive(tree, *child, result);
    }
}

/// Nearest focusable sibling of `id` in the given direction, skipping
/// siblings that do not accept focus.
pub fn focusable_sibling(
    tree: &Tree,
    id: ComponentId,
    direction: SiblingDirection,
) -> Option<ComponentId> {
    let parent = tree.parent(id)?;
    let siblings = tree.children(parent);
    let position = siblings.iter().position(|s| *s == id)?;

    let found = match direction {
        SiblingDirection::Previous => siblings[..position]
            .iter()
            .rev()
            .find(|s| tree.is_focusable(**s)),
        SiblingDirection::Next => siblings[position + 1..]
            .iter()
            .find(|s| tree.is_focusable(**s)),
    };

    log::trace!(
        "[focus] sibling of {} direction={:?} found={:?}",
        id, direction, found
    );
    found.copied()
}
