//! The logged in user, shared by every request handler.

mod state;
mod store;

pub use state::{Session, SessionSubscriber};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
