//! Storage for live sessions.

pub mod sessions;

pub use sessions::{SessionHandle, SessionStore};
