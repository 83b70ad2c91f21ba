//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `AccountRepository` - Account reads and version-checked updates
//! - `PackageRepository` - Package CRUD
//! - `PurchaseReader` - Purchase queries
//! - `LedgerStore` - Atomic purchase + account writes
//! - `ContactMessageRepository` - Contact-form messages
//!
//! ## Integration Ports
//!
//! - `Mailer` - Transactional email delivery
//! - `SessionValidator` - Access token validation

mod account_repository;
mod contact_message_repository;
mod ledger_store;
mod mailer;
mod package_repository;
mod purchase_reader;
mod session_validator;

pub use account_repository::AccountRepository;
pub use contact_message_repository::ContactMessageRepository;
pub use ledger_store::LedgerStore;
pub use mailer::{MailError, Mailer};
pub use package_repository::PackageRepository;
pub use purchase_reader::PurchaseReader;
pub use session_validator::SessionValidator;
