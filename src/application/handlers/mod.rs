//! Application handlers.
//!
//! One command or query handler per operation. Handlers hold their ports as
//! `Arc<dyn Port>` and take the caller's `AuthenticatedUser` explicitly.

pub mod contact;
pub mod membership;
pub mod packages;
pub mod relay;
