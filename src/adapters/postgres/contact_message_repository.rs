//! PostgreSQL implementation of ContactMessageRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::contact::{ContactMessage, MessageStatus};
use crate::domain::foundation::{DomainError, ErrorCode, MessageId, Timestamp};
use crate::ports::ContactMessageRepository;

use super::db_error;

pub struct PostgresContactMessageRepository {
    pool: PgPool,
}

impl PostgresContactMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const MESSAGE_COLUMNS: &str =
    "id, name, email, phone, subject, body, status, admin_reply, replied_at, created_at";

#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    subject: String,
    body: String,
    status: String,
    admin_reply: Option<String>,
    replied_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<MessageRow> for ContactMessage {
    type Error = DomainError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let status: MessageStatus = row.status.parse().map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid status value: {}", row.status),
            )
        })?;

        Ok(ContactMessage {
            id: MessageId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            subject: row.subject,
            body: row.body,
            status,
            admin_reply: row.admin_reply,
            replied_at: row.replied_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl ContactMessageRepository for PostgresContactMessageRepository {
    async fn save(&self, message: &ContactMessage) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO contact_messages (
                id, name, email, phone, subject, body, status, admin_reply, replied_at, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(message.id.as_uuid())
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.phone)
        .bind(&message.subject)
        .bind(&message.body)
        .bind(message.status.as_str())
        .bind(&message.admin_reply)
        .bind(message.replied_at.as_ref().map(|t| *t.as_datetime()))
        .bind(message.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save contact message", e))?;

        Ok(())
    }

    async fn update(&self, message: &ContactMessage) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE contact_messages SET
                status = $2,
                admin_reply = $3,
                replied_at = $4
            WHERE id = $1
            "#,
        )
        .bind(message.id.as_uuid())
        .bind(message.status.as_str())
        .bind(&message.admin_reply)
        .bind(message.replied_at.as_ref().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update contact message", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::MessageNotFound,
                format!("Message not found: {}", message.id),
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &MessageId) -> Result<Option<ContactMessage>, DomainError> {
        let row: Option<MessageRow> = sqlx::query_as(&format!(
            "SELECT {} FROM contact_messages WHERE id = $1",
            MESSAGE_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find contact message", e))?;

        row.map(ContactMessage::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<ContactMessage>, DomainError> {
        let rows: Vec<MessageRow> = sqlx::query_as(&format!(
            "SELECT {} FROM contact_messages ORDER BY created_at DESC",
            MESSAGE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list contact messages", e))?;

        rows.into_iter().map(ContactMessage::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replied_row_keeps_reply_timestamp() {
        let now = Utc::now();
        let row = MessageRow {
            id: Uuid::new_v4(),
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
            phone: String::new(),
            subject: String::new(),
            body: "Hi".to_string(),
            status: "replied".to_string(),
            admin_reply: Some("Hello".to_string()),
            replied_at: Some(now),
            created_at: now,
        };
        let message = ContactMessage::try_from(row).unwrap();
        assert_eq!(message.status, MessageStatus::Replied);
        assert_eq!(message.replied_at.map(|t| *t.as_datetime()), Some(now));
    }
}
