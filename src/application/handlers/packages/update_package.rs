//! UpdatePackageHandler - Edits a package or flips one of its flags.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, PackageId};
use crate::domain::membership::{MembershipError, Package, PackageDetails};
use crate::ports::PackageRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageToggle {
    Active,
    Popular,
}

#[derive(Debug, Clone)]
pub enum PackageChange {
    /// Replace every editable field.
    Revise(PackageDetails),
    Toggle(PackageToggle),
}

#[derive(Debug, Clone)]
pub struct UpdatePackageCommand {
    pub actor: AuthenticatedUser,
    pub package_id: PackageId,
    pub change: PackageChange,
}

/// Existing purchases keep the name and price they were bought at.
pub struct UpdatePackageHandler {
    packages: Arc<dyn PackageRepository>,
}

impl UpdatePackageHandler {
    pub fn new(packages: Arc<dyn PackageRepository>) -> Self {
        Self { packages }
    }

    pub async fn handle(&self, cmd: UpdatePackageCommand) -> Result<Package, MembershipError> {
        cmd.actor.require_admin()?;

        let mut package = self
            .packages
            .find_by_id(&cmd.package_id)
            .await?
            .ok_or(MembershipError::PackageNotFound(cmd.package_id))?;

        match cmd.change {
            PackageChange::Revise(details) => package.revise(details)?,
            PackageChange::Toggle(PackageToggle::Active) => package.toggle_active(),
            PackageChange::Toggle(PackageToggle::Popular) => package.toggle_popular(),
        }
        self.packages.update(&package).await?;

        tracing::info!(
            package_id = %package.id,
            active = package.active,
            popular = package.popular,
            "Package updated"
        );
        Ok(package)
    }
}
