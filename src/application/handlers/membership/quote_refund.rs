//! QuoteRefundHandler - Pro-rated refund for the account's active purchase.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{AuthenticatedUser, PurchaseId};
use crate::domain::membership::{ledger, MembershipError, Purchase, RefundQuote};
use crate::ports::PurchaseReader;

#[derive(Debug, Clone)]
pub struct QuoteRefundQuery {
    pub actor: AuthenticatedUser,
    pub purchase_id: PurchaseId,
    pub today: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct QuoteRefundResult {
    pub purchase: Purchase,
    pub quote: RefundQuote,
}

/// Quotes a refund; nothing is written.
///
/// Only the purchase the ledger currently treats as the account's active
/// one can be quoted. Anything else is `PurchaseNotActive`.
pub struct QuoteRefundHandler {
    purchases: Arc<dyn PurchaseReader>,
}

impl QuoteRefundHandler {
    pub fn new(purchases: Arc<dyn PurchaseReader>) -> Self {
        Self { purchases }
    }

    pub async fn handle(&self, query: QuoteRefundQuery) -> Result<QuoteRefundResult, MembershipError> {
        query.actor.require_admin()?;

        let purchase = self
            .purchases
            .find_by_id(&query.purchase_id)
            .await?
            .ok_or(MembershipError::PurchaseNotFound(query.purchase_id))?;

        let history = self.purchases.list_for_account(&purchase.account_id).await?;
        match ledger::active_purchase(&history, query.today) {
            Some(active) if active.id == purchase.id => {}
            _ => return Err(MembershipError::PurchaseNotActive(purchase.id)),
        }

        let quote = ledger::quote_refund(&purchase, query.today)?;
        tracing::debug!(
            purchase_id = %purchase.id,
            amount = quote.amount,
            days_remaining = quote.days_remaining,
            "Refund quoted"
        );

        Ok(QuoteRefundResult { purchase, quote })
    }
}
