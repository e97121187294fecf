//! Pocket Browser Navigation
//!
//! Address bar input resolution:
//! 1. Domain-shaped input → navigate (https:// added when no scheme is given)
//! 2. Anything else → web search
//!
//! While not being edited the address bar shows a short host label
//! instead of the full URL.

mod address_bar;
mod display;
mod error;
mod input;

pub use address_bar::AddressBar;
pub use display::display_label;
pub use error::NavigationError;
pub use input::{InputResolution, InputResolver, DEFAULT_SEARCH_TEMPLATE};

pub type Result<T> = std::result::Result<T, NavigationError>;
