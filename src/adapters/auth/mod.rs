//! Authentication adapters implementing the `SessionValidator` port.
//!
//! - `jwt` - HS256 tokens signed by the identity provider
//! - `mock` - Fixed token table for tests and local runs

mod jwt;
mod mock;

pub use jwt::{JwtSessionValidator, SessionClaims};
pub use mock::MockSessionValidator;
