//! Stock widgets: a stacking container and a text label.

use crate::component::{Focusable, RenderContext, Widget};
use crate::element::Element;
use crate::types::Direction;

/// Container that lays its children out along one axis.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    pub direction: Direction,
    pub focusable: bool,
}

impl Stack {
    pub fn column() -> Self {
        Self {
            direction: Direction::Column,
            focusable: false,
        }
    }

    pub fn row() -> Self {
        Self {
            direction: Direction::Row,
            focusable: false,
        }
    }

    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }
}

impl Widget for Stack {
    fn render(&self, cx: RenderContext) -> Element {
        Element::box_()
            .direction(self.direction)
            .children(cx.children)
    }

    fn as_focusable(&self) -> Option<&dyn Focusable> {
        if self.focusable {
            Some(self)
        } else {
            None
        }
    }
}

impl Focusable for Stack {}

/// Single line of text, optionally focusable.
#[derive(Debug, Clone, Default)]
pub struct Label {
    pub text: String,
    pub focusable: bool,
    pub disabled: bool,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Widget for Label {
    fn render(&self, cx: RenderContext) -> Element {
        if cx.children.is_empty() {
            return Element::text(&self.text);
        }
        // Labels with mounted children render as a row: text first.
        Element::row()
            .child(Element::text(&self.text))
            .children(cx.children)
    }

    fn as_focusable(&self) -> Option<&dyn Focusable> {
        if self.focusable {
            Some(self)
        } else {
            None
        }
    }
}

impl Focusable for Label {
    fn accepts_focus(&self) -> bool {
        !self.disabled
    }
}
