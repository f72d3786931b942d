pub mod collection;
pub mod error;
pub mod events;
pub mod list;
pub mod menu;
pub mod renderable;
pub mod theme;

pub use error::ControlError;

pub mod prelude {
    pub use crate::collection::{Change, Collection, Item, Subscription};
    pub use crate::error::ControlError;
    pub use crate::events::EventResult;
    pub use crate::list::{Adapter, ListController, ListOptions, adapter};
    pub use crate::menu::{
        Gravity, Menu, MenuBuilder, MenuItemSelectedEvent, MenuOption, MenuView, StackMenuBuilder,
    };
    pub use crate::renderable::RenderableController;
    pub use crate::theme::{Theme, default_theme};
}
