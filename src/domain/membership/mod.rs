//! Membership module - accounts, packages, purchases and the ledger.
//!
//! # Module Structure
//!
//! - `account` - Account aggregate and its lifecycle operations
//! - `package` - Purchasable plan templates
//! - `purchase` - Purchase records with copied package terms
//! - `ledger` - Plan activity, remaining days and refunds
//! - `status` - Plan and approval status enums
//! - `errors` - Membership-specific errors

mod account;
mod errors;
pub mod ledger;
pub(crate) mod package;
pub(crate) mod purchase;
mod status;

pub use account::Account;
pub use errors::MembershipError;
pub use ledger::{ActiveSelection, RefundQuote};
pub use package::{Package, PackageDetails};
pub use purchase::{PaymentMethod, PaymentStatus, Purchase};
pub use status::{ApprovalStatus, PlanStatus};

#[cfg(test)]
pub(crate) use account::test_account;
