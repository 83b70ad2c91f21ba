//! CreatePackageHandler - Adds a membership plan to the catalogue.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, PackageId};
use crate::domain::membership::{MembershipError, Package, PackageDetails};
use crate::ports::PackageRepository;

#[derive(Debug, Clone)]
pub struct CreatePackageCommand {
    pub actor: AuthenticatedUser,
    pub details: PackageDetails,
}

pub struct CreatePackageHandler {
    packages: Arc<dyn PackageRepository>,
}

impl CreatePackageHandler {
    pub fn new(packages: Arc<dyn PackageRepository>) -> Self {
        Self { packages }
    }

    pub async fn handle(&self, cmd: CreatePackageCommand) -> Result<Package, MembershipError> {
        cmd.actor.require_admin()?;

        let package = Package::create(PackageId::new(), cmd.details)?;
        self.packages.save(&package).await?;

        tracing::info!(package_id = %package.id, name = %package.name, "Package created");
        Ok(package)
    }
}
