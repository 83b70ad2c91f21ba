//! Application layer - Commands, Queries, and Handlers.
//!
//! Orchestrates domain operations across ports. Write handlers return the
//! updated aggregate; query handlers never write.

pub mod handlers;

pub use handlers::contact::{
    ListContactMessagesHandler, ListContactMessagesQuery, ReplyToContactMessageCommand,
    ReplyToContactMessageHandler, ResolveContactMessageCommand, ResolveContactMessageHandler,
    SubmitContactMessageHandler,
};
pub use handlers::membership::{
    AccountFilter, AccountStats, AddPurchaseCommand, AddPurchaseHandler, ApproveAccountCommand,
    ApproveAccountHandler, BlacklistAccountCommand, BlacklistAccountHandler, ExpiringMembership,
    GetMembershipSummaryHandler, GetMembershipSummaryQuery, ListAccountsHandler,
    ListAccountsQuery, ListExpiringMembershipsHandler, ListExpiringQuery, QuoteRefundHandler,
    QuoteRefundQuery, ReconcileAccountCommand, ReconcileAccountHandler, RegisterAccountCommand,
    RegisterAccountHandler, RemovePurchaseCommand, RemovePurchaseHandler,
    SendExpiryReminderCommand, SendExpiryReminderHandler,
};
pub use handlers::packages::{
    CreatePackageCommand, CreatePackageHandler, DeletePackageCommand, DeletePackageHandler,
    ListPackagesHandler, ListPackagesQuery, PackageChange, PackageToggle, UpdatePackageCommand,
    UpdatePackageHandler,
};
pub use handlers::relay::{RelayEmailHandler, RelayError, RelayKind, RelayRequest};
