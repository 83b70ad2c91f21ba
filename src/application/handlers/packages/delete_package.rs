//! DeletePackageHandler - Removes a package from the catalogue.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, PackageId};
use crate::domain::membership::MembershipError;
use crate::ports::PackageRepository;

#[derive(Debug, Clone)]
pub struct DeletePackageCommand {
    pub actor: AuthenticatedUser,
    pub package_id: PackageId,
}

/// Purchases reference packages by copy, so deleting one leaves history intact.
pub struct DeletePackageHandler {
    packages: Arc<dyn PackageRepository>,
}

impl DeletePackageHandler {
    pub fn new(packages: Arc<dyn PackageRepository>) -> Self {
        Self { packages }
    }

    pub async fn handle(&self, cmd: DeletePackageCommand) -> Result<(), MembershipError> {
        cmd.actor.require_admin()?;

        if self.packages.find_by_id(&cmd.package_id).await?.is_none() {
            return Err(MembershipError::PackageNotFound(cmd.package_id));
        }
        self.packages.delete(&cmd.package_id).await?;

        tracing::info!(package_id = %cmd.package_id, admin = %cmd.actor.id, "Package deleted");
        Ok(())
    }
}
