//! PostgreSQL purchase queries and transactional ledger writes.
//!
//! `PostgresLedgerStore` runs the purchase write and the account write in a
//! single transaction. The account write is version-checked, so a stale
//! read rolls the whole thing back.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgConnection, PgPool};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::foundation::{
    AccountId, DomainError, ErrorCode, PackageId, PurchaseId, Timestamp,
};
use crate::domain::membership::{Account, PaymentStatus, Purchase};
use crate::ports::{LedgerStore, PurchaseReader};

use super::account_repository::update_account_cas;
use super::db_error;

const PURCHASE_COLUMNS: &str = "id, account_id, package_id, package_name, amount, duration_days, \
     start_date, end_date, payment_status, payment_method, transaction_id, created_at";

#[derive(Debug, sqlx::FromRow)]
struct PurchaseRow {
    id: Uuid,
    account_id: String,
    package_id: Uuid,
    package_name: String,
    amount: i64,
    duration_days: i32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    payment_status: String,
    payment_method: String,
    transaction_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PurchaseRow> for Purchase {
    type Error = DomainError;

    fn try_from(row: PurchaseRow) -> Result<Self, Self::Error> {
        let invalid = |field: &str, value: &str| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid {} value: {}", field, value),
            )
        };

        let payment_status: PaymentStatus = row
            .payment_status
            .parse()
            .map_err(|_| invalid("payment_status", &row.payment_status))?;
        let payment_method = row
            .payment_method
            .parse()
            .map_err(|_| invalid("payment_method", &row.payment_method))?;
        let duration_days = u32::try_from(row.duration_days)
            .map_err(|_| invalid("duration_days", &row.duration_days.to_string()))?;
        if row.end_date < row.start_date {
            return Err(invalid("end_date", &row.end_date.to_string()));
        }

        Ok(Purchase {
            id: PurchaseId::from_uuid(row.id),
            account_id: AccountId::new(row.account_id.clone())
                .map_err(|_| invalid("account_id", &row.account_id))?,
            package_id: PackageId::from_uuid(row.package_id),
            package_name: row.package_name,
            amount: row.amount,
            duration_days,
            start_date: row.start_date,
            end_date: row.end_date,
            payment_status,
            payment_method,
            transaction_id: row.transaction_id,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

pub struct PostgresPurchaseReader {
    pool: PgPool,
}

impl PostgresPurchaseReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PurchaseReader for PostgresPurchaseReader {
    async fn find_by_id(&self, id: &PurchaseId) -> Result<Option<Purchase>, DomainError> {
        let row: Option<PurchaseRow> = sqlx::query_as(&format!(
            "SELECT {} FROM purchases WHERE id = $1",
            PURCHASE_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find purchase", e))?;

        row.map(Purchase::try_from).transpose()
    }

    async fn list_for_account(&self, account_id: &AccountId) -> Result<Vec<Purchase>, DomainError> {
        let rows: Vec<PurchaseRow> = sqlx::query_as(&format!(
            "SELECT {} FROM purchases WHERE account_id = $1 ORDER BY created_at DESC",
            PURCHASE_COLUMNS
        ))
        .bind(account_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list purchases", e))?;

        rows.into_iter().map(Purchase::try_from).collect()
    }

    async fn list_completed_ending_between(
        &self,
        after: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<Purchase>, DomainError> {
        let rows: Vec<PurchaseRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM purchases
            WHERE payment_status = 'completed'
              AND end_date > $1
              AND end_date <= $2
            ORDER BY end_date ASC
            "#,
            PURCHASE_COLUMNS
        ))
        .bind(after)
        .bind(until)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list expiring purchases", e))?;

        rows.into_iter().map(Purchase::try_from).collect()
    }
}

pub struct PostgresLedgerStore {
    pool: PgPool,
}

impl PostgresLedgerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn insert_purchase(conn: &mut PgConnection, purchase: &Purchase) -> Result<(), DomainError> {
    let duration_days = i32::try_from(purchase.duration_days)
        .map_err(|_| DomainError::validation("duration_days", "Duration is too large"))?;

    sqlx::query(
        r#"
        INSERT INTO purchases (
            id, account_id, package_id, package_name, amount, duration_days,
            start_date, end_date, payment_status, payment_method, transaction_id, created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(purchase.id.as_uuid())
    .bind(purchase.account_id.as_str())
    .bind(purchase.package_id.as_uuid())
    .bind(&purchase.package_name)
    .bind(purchase.amount)
    .bind(duration_days)
    .bind(purchase.start_date)
    .bind(purchase.end_date)
    .bind(purchase.payment_status.as_str())
    .bind(purchase.payment_method.as_str())
    .bind(&purchase.transaction_id)
    .bind(purchase.created_at.as_datetime())
    .execute(conn)
    .await
    .map_err(|e| db_error("Failed to insert purchase", e))?;

    Ok(())
}

#[async_trait]
impl LedgerStore for PostgresLedgerStore {
    async fn record_purchase(
        &self,
        purchase: &Purchase,
        account: &Account,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        insert_purchase(&mut tx, purchase).await?;
        if let Err(e) = update_account_cas(&mut tx, account).await {
            warn!(account_id = %account.id, purchase_id = %purchase.id, error = %e, "Rolling back purchase insert");
            return Err(e);
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit purchase", e))?;

        info!(
            account_id = %account.id,
            purchase_id = %purchase.id,
            plan_status = %account.plan_status,
            "Purchase recorded"
        );
        Ok(())
    }

    async fn remove_purchase(
        &self,
        purchase_id: &PurchaseId,
        account: &Account,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        let deleted = sqlx::query("DELETE FROM purchases WHERE id = $1 AND account_id = $2")
            .bind(purchase_id.as_uuid())
            .bind(account.id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete purchase", e))?;

        if deleted.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::PurchaseNotFound,
                format!("Purchase not found: {}", purchase_id),
            ));
        }

        if let Err(e) = update_account_cas(&mut tx, account).await {
            warn!(account_id = %account.id, purchase_id = %purchase_id, error = %e, "Rolling back purchase delete");
            return Err(e);
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit purchase removal", e))?;

        info!(
            account_id = %account.id,
            purchase_id = %purchase_id,
            plan_status = %account.plan_status,
            "Purchase removed"
        );
        Ok(())
    }
}
