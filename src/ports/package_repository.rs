//! Package repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PackageId};
use crate::domain::membership::Package;

#[async_trait]
pub trait PackageRepository: Send + Sync {
    async fn save(&self, package: &Package) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `PackageNotFound` if the package doesn't exist
    async fn update(&self, package: &Package) -> Result<(), DomainError>;

    /// Hard delete. Purchases keep their copied terms.
    ///
    /// # Errors
    ///
    /// - `PackageNotFound` if the package doesn't exist
    async fn delete(&self, id: &PackageId) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &PackageId) -> Result<Option<Package>, DomainError>;

    /// Every package, cheapest first.
    async fn list_all(&self) -> Result<Vec<Package>, DomainError>;

    /// Packages offered for sale, shortest duration first.
    async fn list_active(&self) -> Result<Vec<Package>, DomainError>;
}
