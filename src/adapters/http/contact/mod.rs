//! HTTP adapter for contact-form messages.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{admin_contact_routes, public_contact_routes};
