//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, error types, the state machine trait
//! and the authenticated session context.

mod auth;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, Role};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AccountId, MessageId, PackageId, PurchaseId};
pub use state_machine::StateMachine;
pub use timestamp::{today, Timestamp};
