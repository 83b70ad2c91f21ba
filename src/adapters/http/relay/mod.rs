//! HTTP adapter for the transactional mail relay.
//!
//! - `POST /api/send-otp`
//! - `POST /api/send-reminder`
//! - `POST /api/send-reply`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::relay_routes;
