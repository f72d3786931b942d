use std::any::Any;
use std::sync::Arc;

use crate::component::ComponentId;

/// Notifications delivered to controllers, targeted at components.
#[derive(Debug, Clone)]
pub enum Event {
    /// Key press event, targeted at the focused component
    Key {
        target: Option<ComponentId>,
        key: Key,
        modifiers: Modifiers,
    },
    /// Component gained focus
    FocusIn { target: ComponentId },
    /// Component lost focus
    FocusOut { target: ComponentId },
    /// Typed event emitted by a component, bubbling towards the root
    Emitted(Emitted),
}

impl Event {
    /// Build a typed event emitted by `source`.
    pub fn emitted<T: Any + Send + Sync>(source: ComponentId, payload: T) -> Self {
        Self::Emitted(Emitted::new(source, payload))
    }

    /// The component this event originates from or is addressed to.
    pub fn target(&self) -> Option<ComponentId> {
        match self {
            Self::Key { target, .. } => *target,
            Self::FocusIn { target } | Self::FocusOut { target } => Some(*target),
            Self::Emitted(emitted) => Some(emitted.source),
        }
    }
}

/// Type-erased payload of a component event.
///
/// Cloning shares the payload, so a re-emitted event carries the very same
/// value as the original.
#[derive(Clone)]
pub struct Emitted {
    pub source: ComponentId,
    payload: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Emitted {
    pub fn new<T: Any + Send + Sync>(source: ComponentId, payload: T) -> Self {
        Self {
            source,
            payload: Arc::new(payload),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Borrow the payload as `T`, or `None` if it has another type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.payload.is::<T>()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether two events share the same payload value.
    pub fn same_payload(&self, other: &Emitted) -> bool {
        Arc::ptr_eq(&self.payload, &other.payload)
    }
}

impl std::fmt::Debug for Emitted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitted")
            .field("source", &self.source)
            .field("type", &self.type_name)
            .finish()
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

// Conversion from crossterm types
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Char('\0'), // Placeholder for unsupported keys
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl Event {
    /// Translate a crossterm key press into a key event for `target`.
    ///
    /// Releases and repeats are dropped, like the focus loop does for raw input.
    pub fn from_key_event(
        key_event: &crossterm::event::KeyEvent,
        target: Option<ComponentId>,
    ) -> Option<Self> {
        if key_event.kind != crossterm::event::KeyEventKind::Press {
            return None;
        }
        Some(Self::Key {
            target,
            key: key_event.code.into(),
            modifiers: key_event.modifiers.into(),
        })
    }
}
