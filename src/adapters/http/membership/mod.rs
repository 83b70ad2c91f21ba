//! HTTP adapter for accounts, purchases and expiry reminders.
//!
//! - `GET /api/me/membership`, `POST /api/me/profile`
//! - `/api/admin/accounts[...]`, `/api/admin/purchases[...]`, `/api/admin/expiring[...]`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{admin_membership_routes, member_routes};
