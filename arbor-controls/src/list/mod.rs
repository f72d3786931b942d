//! List controller - renders a windowed collection as a live list of view
//! components.
//!
//! The controller provides:
//! - Identity-preserving reconciliation (one view per object key)
//! - Windowing with `first_index` / `max_items`
//! - Arrow-key focus movement between items
//! - Focus restoration to the last focused position
//!
//! # Example
//!
//! ```ignore
//! use arbor::{Label, Tree};
//! use arbor_controls::prelude::*;
//!
//! #[derive(Clone)]
//! struct Contact {
//!     id: u32,
//!     name: String,
//! }
//!
//! impl Item for Contact {
//!     type Key = u32;
//!
//!     fn key(&self) -> u32 {
//!         self.id
//!     }
//! }
//!
//! let mut tree = Tree::new();
//! let contacts = Collection::new();
//! let mut list = ListController::new(&mut tree, |c: &Contact| {
//!     Label::new(&c.name).focusable(true)
//! });
//! list.set_items(Some(contacts.clone()));
//!
//! contacts.push(Contact { id: 1, name: "Ada".into() });
//! list.update(&mut tree);
//! ```

mod events;
mod options;
mod state;

pub use options::ListOptions;
pub use state::{Adapter, ListController, adapter};
