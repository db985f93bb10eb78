//! Storage module
//!
//! Durable JSON document storage backing the session and complaint stores.

pub mod local_store;

pub use local_store::LocalStore;
