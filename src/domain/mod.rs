//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, state machine, auth context)
//! - `membership` - Accounts, packages, purchases and the membership ledger
//! - `contact` - Contact-form messages and replies
//! - `mail` - Transactional email templates

pub mod contact;
pub mod foundation;
pub mod mail;
pub mod membership;
