//! In-memory adapters for local development and tests.

mod store;

pub use store::InMemoryStore;
