//! PostgreSQL implementation of AccountRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use crate::domain::foundation::{AccountId, DomainError, ErrorCode, Timestamp};
use crate::domain::membership::{Account, ApprovalStatus, PlanStatus};
use crate::ports::AccountRepository;

use super::db_error;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(super) const ACCOUNT_COLUMNS: &str = "id, name, email, phone, gender, approval, blacklisted, \
     blacklist_reason, plan_status, is_admin, created_at, version";

/// Database row representation of an account.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct AccountRow {
    id: String,
    name: String,
    email: String,
    phone: String,
    gender: Option<String>,
    approval: String,
    blacklisted: bool,
    blacklist_reason: Option<String>,
    plan_status: String,
    is_admin: bool,
    created_at: DateTime<Utc>,
    version: i32,
}

impl TryFrom<AccountRow> for Account {
    type Error = DomainError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let id = AccountId::new(row.id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid account id: {}", e))
        })?;
        let plan_status: PlanStatus = row.plan_status.parse().map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid plan_status value: {}", row.plan_status),
            )
        })?;

        Ok(Account {
            id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            gender: row.gender,
            approval: parse_approval(&row.approval)?,
            blacklisted: row.blacklisted,
            blacklist_reason: row.blacklist_reason,
            plan_status,
            is_admin: row.is_admin,
            created_at: Timestamp::from_datetime(row.created_at),
            version: row.version,
        })
    }
}

fn parse_approval(s: &str) -> Result<ApprovalStatus, DomainError> {
    match s {
        "pending" => Ok(ApprovalStatus::Pending),
        "approved" => Ok(ApprovalStatus::Approved),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid approval value: {}", s),
        )),
    }
}

fn approval_to_string(approval: ApprovalStatus) -> &'static str {
    match approval {
        ApprovalStatus::Pending => "pending",
        ApprovalStatus::Approved => "approved",
    }
}

/// Writes `account` only if its stored version still matches, bumping it.
///
/// Shared with the ledger store so the version check runs inside its transaction.
pub(super) async fn update_account_cas(
    conn: &mut PgConnection,
    account: &Account,
) -> Result<(), DomainError> {
    let result = sqlx::query(
        r#"
        UPDATE accounts SET
            name = $2,
            email = $3,
            phone = $4,
            gender = $5,
            approval = $6,
            blacklisted = $7,
            blacklist_reason = $8,
            plan_status = $9,
            is_admin = $10,
            version = version + 1
        WHERE id = $1 AND version = $11
        "#,
    )
    .bind(account.id.as_str())
    .bind(&account.name)
    .bind(&account.email)
    .bind(&account.phone)
    .bind(&account.gender)
    .bind(approval_to_string(account.approval))
    .bind(account.blacklisted)
    .bind(&account.blacklist_reason)
    .bind(account.plan_status.as_str())
    .bind(account.is_admin)
    .bind(account.version)
    .execute(&mut *conn)
    .await
    .map_err(|e| db_error("Failed to update account", e))?;

    if result.rows_affected() == 1 {
        return Ok(());
    }

    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE id = $1)")
        .bind(account.id.as_str())
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| db_error("Failed to check account", e))?;

    if exists {
        Err(DomainError::new(
            ErrorCode::ConcurrentModification,
            format!(
                "account {} changed since version {} was read",
                account.id, account.version
            ),
        ))
    } else {
        Err(DomainError::new(
            ErrorCode::AccountNotFound,
            format!("Account not found: {}", account.id),
        ))
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn save(&self, account: &Account) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                id, name, email, phone, gender, approval, blacklisted,
                blacklist_reason, plan_status, is_admin, created_at, version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(account.id.as_str())
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.phone)
        .bind(&account.gender)
        .bind(approval_to_string(account.approval))
        .bind(account.blacklisted)
        .bind(&account.blacklist_reason)
        .bind(account.plan_status.as_str())
        .bind(account.is_admin)
        .bind(account.created_at.as_datetime())
        .bind(account.version)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("accounts_pkey") {
                    return DomainError::validation("account_id", "Account already exists");
                }
            }
            db_error("Failed to save account", e)
        })?;

        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<(), DomainError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| db_error("Failed to acquire connection", e))?;
        update_account_cas(&mut conn, account).await
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        let row: Option<AccountRow> = sqlx::query_as(&format!(
            "SELECT {} FROM accounts WHERE id = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find account", e))?;

        row.map(Account::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Account>, DomainError> {
        let rows: Vec<AccountRow> = sqlx::query_as(&format!(
            "SELECT {} FROM accounts ORDER BY created_at DESC",
            ACCOUNT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list accounts", e))?;

        rows.into_iter().map(Account::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> AccountRow {
        AccountRow {
            id: "acc-1".to_string(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: "".to_string(),
            gender: None,
            approval: "approved".to_string(),
            blacklisted: false,
            blacklist_reason: None,
            plan_status: "active".to_string(),
            is_admin: false,
            created_at: Utc::now(),
            version: 4,
        }
    }

    #[test]
    fn row_converts_to_account() {
        let account = Account::try_from(row()).unwrap();
        assert_eq!(account.approval, ApprovalStatus::Approved);
        assert_eq!(account.plan_status, PlanStatus::Active);
        assert_eq!(account.version, 4);
    }

    #[test]
    fn malformed_rows_are_rejected() {
        let bad_status = AccountRow {
            plan_status: "expired".to_string(),
            ..row()
        };
        assert!(Account::try_from(bad_status).is_err());

        let bad_approval = AccountRow {
            approval: "maybe".to_string(),
            ..row()
        };
        assert!(Account::try_from(bad_approval).is_err());

        let blank_id = AccountRow {
            id: " ".to_string(),
            ..row()
        };
        assert!(Account::try_from(blank_id).is_err());
    }

    #[test]
    fn approval_roundtrips() {
        for approval in [ApprovalStatus::Pending, ApprovalStatus::Approved] {
            assert_eq!(parse_approval(approval_to_string(approval)).unwrap(), approval);
        }
    }
}
