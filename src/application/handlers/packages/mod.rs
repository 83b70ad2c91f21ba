//! Package catalogue handlers.

mod create_package;
mod delete_package;
mod list_packages;
mod update_package;

pub use create_package::{CreatePackageCommand, CreatePackageHandler};
pub use delete_package::{DeletePackageCommand, DeletePackageHandler};
pub use list_packages::{ListPackagesHandler, ListPackagesQuery};
pub use update_package::{PackageChange, PackageToggle, UpdatePackageCommand, UpdatePackageHandler};
