//! PostgreSQL implementation of PackageRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, PackageId, Timestamp};
use crate::domain::membership::Package;
use crate::ports::PackageRepository;

use super::db_error;

pub struct PostgresPackageRepository {
    pool: PgPool,
}

impl PostgresPackageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PACKAGE_COLUMNS: &str =
    "id, name, description, duration_days, price, features, active, popular, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct PackageRow {
    id: Uuid,
    name: String,
    description: String,
    duration_days: i32,
    price: i64,
    features: Vec<String>,
    active: bool,
    popular: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PackageRow> for Package {
    type Error = DomainError;

    fn try_from(row: PackageRow) -> Result<Self, Self::Error> {
        let duration_days = u32::try_from(row.duration_days).map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid duration_days value: {}", row.duration_days),
            )
        })?;

        Ok(Package {
            id: PackageId::from_uuid(row.id),
            name: row.name,
            description: row.description,
            duration_days,
            price: row.price,
            features: row.features,
            active: row.active,
            popular: row.popular,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn duration_param(package: &Package) -> Result<i32, DomainError> {
    i32::try_from(package.duration_days)
        .map_err(|_| DomainError::validation("duration_days", "Duration is too large"))
}

fn not_found(id: &PackageId) -> DomainError {
    DomainError::new(ErrorCode::PackageNotFound, format!("Package not found: {}", id))
}

#[async_trait]
impl PackageRepository for PostgresPackageRepository {
    async fn save(&self, package: &Package) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO packages (
                id, name, description, duration_days, price, features,
                active, popular, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(package.id.as_uuid())
        .bind(&package.name)
        .bind(&package.description)
        .bind(duration_param(package)?)
        .bind(package.price)
        .bind(&package.features)
        .bind(package.active)
        .bind(package.popular)
        .bind(package.created_at.as_datetime())
        .bind(package.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save package", e))?;

        Ok(())
    }

    async fn update(&self, package: &Package) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE packages SET
                name = $2,
                description = $3,
                duration_days = $4,
                price = $5,
                features = $6,
                active = $7,
                popular = $8,
                updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(package.id.as_uuid())
        .bind(&package.name)
        .bind(&package.description)
        .bind(duration_param(package)?)
        .bind(package.price)
        .bind(&package.features)
        .bind(package.active)
        .bind(package.popular)
        .bind(package.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update package", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(&package.id));
        }
        Ok(())
    }

    async fn delete(&self, id: &PackageId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM packages WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete package", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &PackageId) -> Result<Option<Package>, DomainError> {
        let row: Option<PackageRow> = sqlx::query_as(&format!(
            "SELECT {} FROM packages WHERE id = $1",
            PACKAGE_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find package", e))?;

        row.map(Package::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Package>, DomainError> {
        let rows: Vec<PackageRow> = sqlx::query_as(&format!(
            "SELECT {} FROM packages ORDER BY price ASC, created_at ASC",
            PACKAGE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list packages", e))?;

        rows.into_iter().map(Package::try_from).collect()
    }

    async fn list_active(&self) -> Result<Vec<Package>, DomainError> {
        let rows: Vec<PackageRow> = sqlx::query_as(&format!(
            "SELECT {} FROM packages WHERE active ORDER BY duration_days ASC, created_at ASC",
            PACKAGE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list active packages", e))?;

        rows.into_iter().map(Package::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_duration_row_is_rejected() {
        let row = PackageRow {
            id: Uuid::new_v4(),
            name: "Broken".to_string(),
            description: String::new(),
            duration_days: -1,
            price: 100,
            features: vec![],
            active: true,
            popular: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(Package::try_from(row).is_err());
    }

    #[test]
    fn row_keeps_feature_order() {
        let row = PackageRow {
            id: Uuid::new_v4(),
            name: "Monthly".to_string(),
            description: String::new(),
            duration_days: 30,
            price: 3000,
            features: vec!["b".to_string(), "a".to_string()],
            active: true,
            popular: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let package = Package::try_from(row).unwrap();
        assert_eq!(package.features, vec!["b", "a"]);
        assert_eq!(package.duration_days, 30);
    }
}
