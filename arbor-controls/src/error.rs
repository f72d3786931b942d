//! Controller error types.

use thiserror::Error;

/// Errors raised while constructing controllers.
///
/// Everything else in this crate degrades to "nothing to render" instead of
/// failing, so this stays small.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    /// The theme has no menu builder, so a menu can never be built.
    #[error("No menu builder registered for theme '{theme}'")]
    MissingMenuBuilder {
        /// Name of the theme that was consulted.
        theme: String,
    },
}
