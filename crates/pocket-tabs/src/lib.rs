//! Pocket Browser Tab Management
//!
//! Tabs are independent browsing contexts, each with its own navigation
//! history. The store keeps at least one tab open at all times.

mod error;
mod history;
mod id;
mod session;
mod store;
mod tab;

pub use error::TabError;
pub use history::TabHistory;
pub use id::{IdGenerator, SequentialIds, UuidGenerator};
pub use session::{load_session, save_session, SavedSession};
pub use store::TabStore;
pub use tab::{BrowserTab, TabUpdate};

pub type Result<T> = std::result::Result<T, TabError>;
