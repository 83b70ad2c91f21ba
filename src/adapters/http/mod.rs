//! HTTP adapters - REST API implementations.
//!
//! Each domain area has its own adapter (`dto`, `handlers`, `routes`). They
//! share one `AppState` and are assembled by `router::app_router`.

pub mod contact;
pub mod error;
pub mod membership;
pub mod middleware;
pub mod packages;
pub mod relay;
pub mod router;
pub mod state;

pub use error::{ContactApiError, ErrorResponse, MembershipApiError};
pub use router::{api_routes, app_router};
pub use state::AppState;
