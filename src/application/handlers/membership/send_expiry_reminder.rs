//! SendExpiryReminderHandler - Emails a member about an ending plan.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{AccountId, AuthenticatedUser, PurchaseId};
use crate::domain::mail::{default_reminder_message, reminder_email, ReminderEmail};
use crate::domain::membership::{ledger, MembershipError};
use crate::ports::{AccountRepository, Mailer, PurchaseReader};

#[derive(Debug, Clone)]
pub struct SendExpiryReminderCommand {
    pub actor: AuthenticatedUser,
    pub account_id: AccountId,
    pub purchase_id: PurchaseId,
    /// Body written by the administrator; a stock text is used when absent.
    pub message: Option<String>,
    pub today: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct SendExpiryReminderResult {
    pub to_email: String,
    pub days_remaining: i64,
}

pub struct SendExpiryReminderHandler {
    accounts: Arc<dyn AccountRepository>,
    purchases: Arc<dyn PurchaseReader>,
    mailer: Arc<dyn Mailer>,
}

impl SendExpiryReminderHandler {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        purchases: Arc<dyn PurchaseReader>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            accounts,
            purchases,
            mailer,
        }
    }

    pub async fn handle(
        &self,
        cmd: SendExpiryReminderCommand,
    ) -> Result<SendExpiryReminderResult, MembershipError> {
        cmd.actor.require_admin()?;

        let account = self
            .accounts
            .find_by_id(&cmd.account_id)
            .await?
            .ok_or_else(|| MembershipError::AccountNotFound(cmd.account_id.clone()))?;

        let purchase = self
            .purchases
            .find_by_id(&cmd.purchase_id)
            .await?
            .filter(|p| p.account_id == account.id)
            .ok_or(MembershipError::PurchaseNotFound(cmd.purchase_id))?;

        let days_remaining = ledger::days_remaining_clamped(&purchase, cmd.today);
        let message = cmd
            .message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                default_reminder_message(&purchase.package_name, days_remaining, purchase.end_date)
            });

        let email = reminder_email(&ReminderEmail {
            email: account.email.clone(),
            user_name: account.name.clone(),
            package_name: purchase.package_name.clone(),
            days_remaining: Some(days_remaining),
            end_date: Some(purchase.end_date.format("%Y-%m-%d").to_string()),
            message,
        });

        self.mailer.send(&email).await.map_err(|e| {
            tracing::error!(account_id = %account.id, error = %e, "Expiry reminder failed");
            MembershipError::MailDeliveryFailed(e.to_string())
        })?;

        tracing::info!(
            account_id = %account.id,
            purchase_id = %purchase.id,
            days_remaining,
            "Expiry reminder sent"
        );

        Ok(SendExpiryReminderResult {
            to_email: account.email,
            days_remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mail::RecordingMailer;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::membership::fixtures::{
        admin, date, seed_account, seed_purchase,
    };
    use crate::domain::foundation::ErrorCode;
    use crate::domain::membership::PaymentStatus;
    use crate::ports::MailError;

    fn command(purchase_id: PurchaseId, message: Option<&str>) -> SendExpiryReminderCommand {
        SendExpiryReminderCommand {
            actor: admin(),
            account_id: AccountId::new("acc-1").unwrap(),
            purchase_id,
            message: message.map(str::to_string),
            today: date(2024, 1, 29),
        }
    }

    async fn seeded() -> (Arc<InMemoryStore>, PurchaseId) {
        let store = Arc::new(InMemoryStore::new());
        seed_account(&store, "acc-1").await;
        let p = seed_purchase(
            &store,
            "acc-1",
            date(2024, 1, 1),
            date(2024, 1, 31),
            PaymentStatus::Completed,
        )
        .await;
        (store, p.id)
    }

    #[tokio::test]
    async fn default_message_names_package_and_days() {
        let (store, purchase_id) = seeded().await;
        let mailer = Arc::new(RecordingMailer::new());

        let result = SendExpiryReminderHandler::new(store.clone(), store.clone(), mailer.clone())
            .handle(command(purchase_id, None))
            .await
            .unwrap();

        assert_eq!(result.days_remaining, 2);
        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to_email, "asha@example.com");
        assert_eq!(sent[0].subject, "Membership Expiry Reminder - Monthly");
        assert!(sent[0].text.contains("expires in 2 days on 2024-01-31"));
    }

    #[tokio::test]
    async fn custom_message_is_used_verbatim() {
        let (store, purchase_id) = seeded().await;
        let mailer = Arc::new(RecordingMailer::new());

        SendExpiryReminderHandler::new(store.clone(), store.clone(), mailer.clone())
            .handle(command(purchase_id, Some("See you at the front desk!")))
            .await
            .unwrap();

        assert!(mailer.sent()[0].text.contains("See you at the front desk!"));
    }

    #[tokio::test]
    async fn purchase_of_another_account_is_not_found() {
        let (store, _) = seeded().await;
        seed_account(&store, "acc-2").await;
        let foreign = seed_purchase(
            &store,
            "acc-2",
            date(2024, 1, 1),
            date(2024, 1, 31),
            PaymentStatus::Completed,
        )
        .await;
        let mailer = Arc::new(RecordingMailer::new());

        let err = SendExpiryReminderHandler::new(store.clone(), store.clone(), mailer.clone())
            .handle(command(foreign.id, None))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::PurchaseNotFound);
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn mail_failure_is_reported() {
        let (store, purchase_id) = seeded().await;
        let mailer = Arc::new(RecordingMailer::failing(MailError::Transport("timeout".into())));

        let err = SendExpiryReminderHandler::new(store.clone(), store.clone(), mailer)
            .handle(command(purchase_id, None))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::MailDeliveryFailed);
    }
}
