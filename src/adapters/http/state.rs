//! Shared application state for every HTTP router.

use std::sync::Arc;

use crate::application::handlers::contact::{
    ListContactMessagesHandler, ReplyToContactMessageHandler, ResolveContactMessageHandler,
    SubmitContactMessageHandler,
};
use crate::application::handlers::membership::{
    AddPurchaseHandler, ApproveAccountHandler, BlacklistAccountHandler,
    GetMembershipSummaryHandler, ListAccountsHandler, ListExpiringMembershipsHandler,
    QuoteRefundHandler, ReconcileAccountHandler, RegisterAccountHandler, RemovePurchaseHandler,
    SendExpiryReminderHandler,
};
use crate::application::handlers::packages::{
    CreatePackageHandler, DeletePackageHandler, ListPackagesHandler, UpdatePackageHandler,
};
use crate::application::handlers::relay::RelayEmailHandler;
use crate::ports::{
    AccountRepository, ContactMessageRepository, LedgerStore, Mailer, PackageRepository,
    PurchaseReader, SessionValidator,
};

/// Arc-wrapped ports, cloned per request. Handlers are built on demand.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountRepository>,
    pub packages: Arc<dyn PackageRepository>,
    pub purchases: Arc<dyn PurchaseReader>,
    pub ledger: Arc<dyn LedgerStore>,
    pub messages: Arc<dyn ContactMessageRepository>,
    pub mailer: Arc<dyn Mailer>,
    pub sessions: Arc<dyn SessionValidator>,
    /// Default window for the expiring-memberships view.
    pub reminder_lookahead_days: u32,
}

impl AppState {
    // Accounts

    pub fn register_account_handler(&self) -> RegisterAccountHandler {
        RegisterAccountHandler::new(self.accounts.clone())
    }

    pub fn list_accounts_handler(&self) -> ListAccountsHandler {
        ListAccountsHandler::new(self.accounts.clone())
    }

    pub fn approve_account_handler(&self) -> ApproveAccountHandler {
        ApproveAccountHandler::new(self.accounts.clone())
    }

    pub fn blacklist_account_handler(&self) -> BlacklistAccountHandler {
        BlacklistAccountHandler::new(self.accounts.clone())
    }

    pub fn reconcile_account_handler(&self) -> ReconcileAccountHandler {
        ReconcileAccountHandler::new(self.accounts.clone(), self.purchases.clone())
    }

    pub fn membership_summary_handler(&self) -> GetMembershipSummaryHandler {
        GetMembershipSummaryHandler::new(self.accounts.clone(), self.purchases.clone())
    }

    // Purchases

    pub fn add_purchase_handler(&self) -> AddPurchaseHandler {
        AddPurchaseHandler::new(
            self.accounts.clone(),
            self.packages.clone(),
            self.purchases.clone(),
            self.ledger.clone(),
        )
    }

    pub fn remove_purchase_handler(&self) -> RemovePurchaseHandler {
        RemovePurchaseHandler::new(
            self.accounts.clone(),
            self.purchases.clone(),
            self.ledger.clone(),
        )
    }

    pub fn quote_refund_handler(&self) -> QuoteRefundHandler {
        QuoteRefundHandler::new(self.purchases.clone())
    }

    pub fn list_expiring_handler(&self) -> ListExpiringMembershipsHandler {
        ListExpiringMembershipsHandler::new(self.accounts.clone(), self.purchases.clone())
    }

    pub fn send_reminder_handler(&self) -> SendExpiryReminderHandler {
        SendExpiryReminderHandler::new(
            self.accounts.clone(),
            self.purchases.clone(),
            self.mailer.clone(),
        )
    }

    // Packages

    pub fn create_package_handler(&self) -> CreatePackageHandler {
        CreatePackageHandler::new(self.packages.clone())
    }

    pub fn update_package_handler(&self) -> UpdatePackageHandler {
        UpdatePackageHandler::new(self.packages.clone())
    }

    pub fn delete_package_handler(&self) -> DeletePackageHandler {
        DeletePackageHandler::new(self.packages.clone())
    }

    pub fn list_packages_handler(&self) -> ListPackagesHandler {
        ListPackagesHandler::new(self.packages.clone())
    }

    // Contact

    pub fn submit_message_handler(&self) -> SubmitContactMessageHandler {
        SubmitContactMessageHandler::new(self.messages.clone())
    }

    pub fn list_messages_handler(&self) -> ListContactMessagesHandler {
        ListContactMessagesHandler::new(self.messages.clone())
    }

    pub fn reply_handler(&self) -> ReplyToContactMessageHandler {
        ReplyToContactMessageHandler::new(self.messages.clone(), self.mailer.clone())
    }

    pub fn resolve_handler(&self) -> ResolveContactMessageHandler {
        ResolveContactMessageHandler::new(self.messages.clone())
    }

    // Relay

    pub fn relay_handler(&self) -> RelayEmailHandler {
        RelayEmailHandler::new(self.mailer.clone())
    }
}
