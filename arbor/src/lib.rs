pub mod component;
pub mod element;
pub mod event;
pub mod focus;
pub mod tree;
pub mod types;
pub mod widgets;

pub use component::{ComponentId, Focusable, RenderContext, Widget};
pub use element::{find_element, Content, Element};
pub use event::{Emitted, Event, Key, Modifiers};
pub use focus::{collect_focusable, focusable_sibling, FocusState, SiblingDirection};
pub use tree::Tree;
pub use types::Direction;
pub use widgets::{Label, Stack};
