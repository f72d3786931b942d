//! Menu builder seam and the stock stacked-menu builder.

use arbor::{ComponentId, Element, Focusable, RenderContext, Tree, Widget};

use super::events::MenuItemSelectedEvent;

/// One selectable menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    /// Value reported when the option is selected.
    pub key: String,
    /// Display text.
    pub text: String,
}

impl MenuOption {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }
}

/// Where a popup menu attaches relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gravity {
    #[default]
    Start,
    Stretch,
    End,
}

impl Gravity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gravity::Start => "start",
            Gravity::Stretch => "stretch",
            Gravity::End => "end",
        }
    }
}

/// Constructs one concrete menu component.
pub type MenuFactory = Box<dyn Fn() -> Box<dyn Widget>>;

/// Platform-specific menu construction.
///
/// A builder is reused across render cycles: the menu clears it, feeds it the
/// current options, and asks it for a factory exactly once per render.
pub trait MenuBuilder {
    /// Forget everything added during the previous cycle.
    fn clear(&mut self);

    fn add_option(&mut self, key: &str, text: &str);

    fn set_gravity(&mut self, gravity: Gravity);

    /// Produce a constructor for the concrete menu component.
    fn build(&mut self) -> MenuFactory;
}

/// Builder producing a [`MenuView`]: options stacked vertically.
#[derive(Debug, Clone, Default)]
pub struct StackMenuBuilder {
    options: Vec<MenuOption>,
    gravity: Gravity,
}

impl StackMenuBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &[MenuOption] {
        &self.options
    }

    pub fn gravity(&self) -> Gravity {
        self.gravity
    }
}

impl MenuBuilder for StackMenuBuilder {
    fn clear(&mut self) {
        self.options.clear();
        self.gravity = Gravity::default();
    }

    fn add_option(&mut self, key: &str, text: &str) {
        self.options.push(MenuOption::new(key, text));
    }

    fn set_gravity(&mut self, gravity: Gravity) {
        self.gravity = gravity;
    }

    fn build(&mut self) -> MenuFactory {
        let options = self.options.clone();
        let gravity = self.gravity;
        Box::new(move || -> Box<dyn Widget> {
            Box::new(MenuView {
                options: options.clone(),
                gravity,
            })
        })
    }
}

/// Rendered popup menu built by [`StackMenuBuilder`].
#[derive(Debug, Clone)]
pub struct MenuView {
    pub options: Vec<MenuOption>,
    pub gravity: Gravity,
}

impl MenuView {
    /// Select the option with `key` on the mounted menu `id`, emitting a
    /// [`MenuItemSelectedEvent`]. Unknown keys are ignored.
    pub fn select(tree: &mut Tree, id: ComponentId, key: &str) -> bool {
        let known = tree
            .widget::<MenuView>(id)
            .is_some_and(|menu| menu.options.iter().any(|o| o.key == key));
        if !known {
            log::debug!("[menu] {} has no option {:?}", id, key);
            return false;
        }
        tree.emit(id, MenuItemSelectedEvent::new(key));
        true
    }
}

impl Widget for MenuView {
    fn render(&self, cx: RenderContext) -> Element {
        Element::col()
            .data("role", "menu")
            .data("gravity", self.gravity.as_str())
            .children(self.options.iter().map(|option| {
                Element::text(&option.text)
                    .focusable(true)
                    .data("key", &option.key)
            }))
            .children(cx.children)
    }

    fn as_focusable(&self) -> Option<&dyn Focusable> {
        Some(self)
    }
}

impl Focusable for MenuView {}
