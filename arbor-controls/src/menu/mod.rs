//! Popup menu controller.
//!
//! A [`Menu`] only holds declarative state (options, gravity). Building the
//! actual component is delegated to a [`MenuBuilder`] resolved from the
//! active [`Theme`]:
//!
//! 1. Idle: options and gravity are configured.
//! 2. Building (`render`): the builder is cleared, fed every option in order,
//!    given the gravity, and build hooks may customize it.
//! 3. Built: the builder's factory constructs one menu component, which
//!    replaces the previous one and is rendered.
//!
//! Selections bubble up from the built component as
//! [`MenuItemSelectedEvent`]s; the menu records the key and re-emits them.

mod builder;
mod events;

pub use builder::{Gravity, MenuBuilder, MenuFactory, MenuOption, MenuView, StackMenuBuilder};
pub use events::MenuItemSelectedEvent;

use arbor::{ComponentId, Element, Event, Tree};

use crate::error::ControlError;
use crate::renderable::RenderableController;
use crate::theme::Theme;

/// Hook run while the menu is being built, after the options were added.
pub type BuildHook = Box<dyn FnMut(&mut dyn MenuBuilder)>;

/// A to-be-built popup menu.
pub struct Menu {
    builder: Box<dyn MenuBuilder>,
    options: Vec<MenuOption>,
    gravity: Option<Gravity>,
    selected: Option<String>,
    build_hooks: Vec<BuildHook>,
    content: RenderableController,
}

impl Menu {
    /// Create a menu using the builder registered on `theme`.
    ///
    /// Fails if the theme has no menu builder: such a menu could never be
    /// rendered.
    pub fn new(theme: &Theme) -> Result<Self, ControlError> {
        let builder = theme
            .menu_builder()
            .ok_or_else(|| ControlError::MissingMenuBuilder {
                theme: theme.name().to_string(),
            })?;
        Ok(Self::with_builder(builder))
    }

    /// Create a menu with an explicit builder.
    pub fn with_builder(builder: Box<dyn MenuBuilder>) -> Self {
        Self {
            builder,
            options: Vec::new(),
            gravity: None,
            selected: None,
            build_hooks: Vec::new(),
            content: RenderableController::empty(),
        }
    }

    // -------------------------------------------------------------------------
    // Options
    // -------------------------------------------------------------------------

    pub fn options(&self) -> &[MenuOption] {
        &self.options
    }

    /// Append an option.
    pub fn add_option(&mut self, key: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.options.push(MenuOption::new(key, text));
        self
    }

    pub fn set_options(&mut self, options: Vec<MenuOption>) {
        self.options = options;
    }

    pub fn clear_options(&mut self) {
        self.options.clear();
    }

    pub fn gravity(&self) -> Option<Gravity> {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Option<Gravity>) {
        self.gravity = gravity;
    }

    /// Key of the most recently selected option.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Register a hook that can customize the builder on every render.
    pub fn on_build(&mut self, hook: impl FnMut(&mut dyn MenuBuilder) + 'static) {
        self.build_hooks.push(Box::new(hook));
    }

    /// The currently built menu component, if rendered.
    pub fn built(&self) -> Option<ComponentId> {
        self.content.content()
    }

    // -------------------------------------------------------------------------
    // Building
    // -------------------------------------------------------------------------

    /// Build a fresh menu component and render it with `callback`.
    ///
    /// Any previously built component is released.
    pub fn render(
        &mut self,
        tree: &mut Tree,
        callback: impl FnMut(Option<Element>) + 'static,
    ) -> ComponentId {
        self.builder.clear();
        for option in &self.options {
            self.builder.add_option(&option.key, &option.text);
        }
        if let Some(gravity) = self.gravity {
            self.builder.set_gravity(gravity);
        }
        for hook in &mut self.build_hooks {
            hook(&mut *self.builder);
        }

        let factory = self.builder.build();
        let id = tree.insert_boxed(factory());
        log::debug!("[menu] built {} with {} options", id, self.options.len());

        self.content.replace_and_render(tree, id, callback);
        id
    }

    /// Release the built component, if any.
    pub fn dispose(&mut self, tree: &mut Tree) {
        self.content.release(tree);
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Intercept selection events bubbling from the built menu.
    ///
    /// Records the selected key and returns the same event for re-emission.
    /// Anything else yields `None` and continues to propagate untouched.
    pub fn handle_event(&mut self, tree: &Tree, event: &Event) -> Option<Event> {
        let Event::Emitted(emitted) = event else {
            return None;
        };
        let selection = emitted.downcast_ref::<MenuItemSelectedEvent>()?;
        let built = self.content.content()?;
        if !tree.is_ancestor_or_self(built, emitted.source) {
            return None;
        }

        log::debug!("[menu] selected {:?}", selection.key);
        self.selected = Some(selection.key.clone());
        Some(event.clone())
    }
}

impl std::fmt::Debug for Menu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Menu")
            .field("options", &self.options)
            .field("gravity", &self.gravity)
            .field("selected", &self.selected)
            .field("build_hooks", &self.build_hooks.len())
            .field("content", &self.content)
            .finish()
    }
}
