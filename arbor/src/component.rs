use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::element::Element;

/// Unique identifier for a component mounted in a [`Tree`](crate::Tree).
///
/// Identity never changes for the lifetime of a component, which is what
/// controllers compare when they talk about "the same instance".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    pub(crate) fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Rebuild an id from its raw value (for lookups from rendered output).
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "c-{}", self.0)
    }
}

/// Upcast helper so trees can hand out concrete widget types.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// What a widget sees while rendering.
#[derive(Debug)]
pub struct RenderContext {
    pub id: ComponentId,
    /// Whether this component currently holds focus.
    pub focused: bool,
    /// Already rendered children, in order.
    pub children: Vec<Element>,
}

/// A component that can live in a [`Tree`](crate::Tree).
pub trait Widget: AsAny {
    /// Produce this component's output from its rendered children.
    fn render(&self, cx: RenderContext) -> Element;

    /// Focus capability. Components that return `None` silently ignore focus
    /// requests.
    fn as_focusable(&self) -> Option<&dyn Focusable> {
        None
    }
}

/// Optional focus capability of a widget.
pub trait Focusable {
    /// Whether the widget takes focus right now (e.g. not disabled).
    fn accepts_focus(&self) -> bool {
        true
    }
}
