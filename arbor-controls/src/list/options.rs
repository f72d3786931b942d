//! List windowing and navigation options.

/// Per-list configuration.
///
/// Defaults: arrow-key focus on, window starting at the first item, no
/// item limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    /// Move focus between items with the Up/Down keys.
    pub enable_arrow_key_focus: bool,

    /// Index of the first item to materialize.
    pub first_index: usize,

    /// Maximum number of items to materialize (None = unbounded).
    pub max_items: Option<usize>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            enable_arrow_key_focus: true,
            first_index: 0,
            max_items: None,
        }
    }
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first visible index.
    pub fn first_index(mut self, index: usize) -> Self {
        self.first_index = index;
        self
    }

    /// Limit the number of visible items.
    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    /// Remove the item limit.
    pub fn unbounded(mut self) -> Self {
        self.max_items = None;
        self
    }

    /// Enable or disable arrow-key focus movement.
    pub fn arrow_key_focus(mut self, enabled: bool) -> Self {
        self.enable_arrow_key_focus = enabled;
        self
    }

    pub(super) fn same_window(&self, other: &ListOptions) -> bool {
        self.first_index == other.first_index && self.max_items == other.max_items
    }
}
