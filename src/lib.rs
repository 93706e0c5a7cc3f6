//! A messaging-app style chat window backed by an in-memory conversation
//! store. The GTK front end lives behind the `gui` feature.

pub mod app;
pub mod avatar;
pub mod error;
pub mod motion;
pub mod store;
pub mod view;

#[cfg(feature = "gui")]
pub mod ui;
#[cfg(feature = "gui")]
pub mod utils;

pub use error::{ChatError, SendError};
pub use store::ChatStore;
pub use store::session::{Intent, Session};
