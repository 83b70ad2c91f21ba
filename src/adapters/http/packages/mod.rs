//! HTTP adapter for membership packages.
//!
//! - `GET /api/packages` - public catalogue
//! - `/api/admin/packages[...]` - create, edit, toggle, delete

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{admin_package_routes, public_package_routes};
