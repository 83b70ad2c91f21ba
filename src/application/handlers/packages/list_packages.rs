//! ListPackagesHandler - Catalogue queries.

use std::sync::Arc;

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::membership::{MembershipError, Package};
use crate::ports::PackageRepository;

#[derive(Debug, Clone)]
pub enum ListPackagesQuery {
    /// Packages on sale, shortest first. Public.
    OnSale,
    /// Every package, cheapest first. Admin only.
    All { actor: AuthenticatedUser },
}

pub struct ListPackagesHandler {
    packages: Arc<dyn PackageRepository>,
}

impl ListPackagesHandler {
    pub fn new(packages: Arc<dyn PackageRepository>) -> Self {
        Self { packages }
    }

    pub async fn handle(&self, query: ListPackagesQuery) -> Result<Vec<Package>, MembershipError> {
        match query {
            ListPackagesQuery::OnSale => Ok(self.packages.list_active().await?),
            ListPackagesQuery::All { actor } => {
                actor.require_admin()?;
                Ok(self.packages.list_all().await?)
            }
        }
    }
}
