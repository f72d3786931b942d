//! Menu selection event.

/// Emitted by a built menu when the user picks an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemSelectedEvent {
    /// Key of the selected option.
    pub key: String,
}

impl MenuItemSelectedEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}
