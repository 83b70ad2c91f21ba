//! Membership handlers.
//!
//! ## Commands
//! - Registering an account for a signed-in user
//! - Adding and removing purchases (atomic with the plan status)
//! - Approving, blacklisting and reconciling accounts
//! - Sending expiry reminders
//!
//! ## Queries
//! - Membership summary for one account
//! - Account listing with statistics (admin)
//! - Refund quotes and the expiring-membership worklist (admin)

mod add_purchase;
mod approve_account;
mod blacklist_account;
mod get_membership_summary;
mod list_accounts;
mod list_expiring;
mod quote_refund;
mod reconcile_account;
mod register_account;
mod remove_purchase;
mod send_expiry_reminder;

// Commands
pub use add_purchase::{AddPurchaseCommand, AddPurchaseHandler, AddPurchaseResult};
pub use approve_account::{ApproveAccountCommand, ApproveAccountHandler};
pub use blacklist_account::{BlacklistAccountCommand, BlacklistAccountHandler};
pub use reconcile_account::{
    ReconcileAccountCommand, ReconcileAccountHandler, ReconcileAccountResult,
};
pub use register_account::{
    RegisterAccountCommand, RegisterAccountHandler, RegisterAccountResult,
};
pub use remove_purchase::{RemovePurchaseCommand, RemovePurchaseHandler, RemovePurchaseResult};
pub use send_expiry_reminder::{
    SendExpiryReminderCommand, SendExpiryReminderHandler, SendExpiryReminderResult,
};

// Queries
pub use get_membership_summary::{
    GetMembershipSummaryHandler, GetMembershipSummaryQuery, GetMembershipSummaryResult,
};
pub use list_accounts::{
    AccountFilter, AccountStats, ListAccountsHandler, ListAccountsQuery, ListAccountsResult,
};
pub use list_expiring::{ExpiringMembership, ListExpiringMembershipsHandler, ListExpiringQuery};
pub use quote_refund::{QuoteRefundHandler, QuoteRefundQuery, QuoteRefundResult};
