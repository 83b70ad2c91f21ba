//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - Session token validation (JWT, mock)
//! - `http` - axum REST API
//! - `mail` - Mailjet delivery and a recording mailer
//! - `memory` - In-memory persistence for tests and local runs
//! - `postgres` - PostgreSQL persistence

pub mod auth;
pub mod http;
pub mod mail;
pub mod memory;
pub mod postgres;
