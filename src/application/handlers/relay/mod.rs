//! Mail relay handler.

mod relay_email;

pub use relay_email::{RelayEmailHandler, RelayError, RelayKind, RelayRequest};
