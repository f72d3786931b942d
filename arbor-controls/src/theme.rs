//! Themes supply platform-specific builders to controllers.

use std::sync::Arc;

use crate::menu::{MenuBuilder, StackMenuBuilder};

/// Creates a fresh menu builder for one menu.
pub type MenuBuilderFactory = Arc<dyn Fn() -> Box<dyn MenuBuilder> + Send + Sync>;

/// A named presentation theme.
///
/// Themes are passed to controllers explicitly; there is no global active
/// theme.
#[derive(Clone)]
pub struct Theme {
    name: String,
    menu_builder: Option<MenuBuilderFactory>,
}

impl Theme {
    /// A theme without any builders.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            menu_builder: None,
        }
    }

    /// Register the menu builder used by menus created with this theme.
    pub fn with_menu_builder<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn MenuBuilder> + Send + Sync + 'static,
    {
        self.menu_builder = Some(Arc::new(factory));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_menu_builder(&self) -> bool {
        self.menu_builder.is_some()
    }

    /// A new menu builder, if the theme has one.
    pub fn menu_builder(&self) -> Option<Box<dyn MenuBuilder>> {
        self.menu_builder.as_ref().map(|factory| factory())
    }
}

impl Default for Theme {
    fn default() -> Self {
        default_theme()
    }
}

impl std::fmt::Debug for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Theme")
            .field("name", &self.name)
            .field("menu_builder", &self.menu_builder.is_some())
            .finish()
    }
}

/// The stock theme: menus are built as stacked option lists.
pub fn default_theme() -> Theme {
    Theme::new("default").with_menu_builder(|| Box::new(StackMenuBuilder::new()))
}
