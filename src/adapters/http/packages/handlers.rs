//! HTTP handlers for package endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::packages::{
    CreatePackageCommand, DeletePackageCommand, ListPackagesQuery, PackageChange, PackageToggle,
    UpdatePackageCommand,
};
use crate::domain::foundation::{AuthenticatedUser, PackageId};
use crate::domain::membership::Package;

use super::super::error::MembershipApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{PackageRequest, PackageResponse};

fn to_responses(packages: Vec<Package>) -> Vec<PackageResponse> {
    packages.into_iter().map(PackageResponse::from).collect()
}

/// GET /api/packages - packages on sale, shortest first
pub async fn list_on_sale(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let packages = state
        .list_packages_handler()
        .handle(ListPackagesQuery::OnSale)
        .await?;
    Ok(Json(to_responses(packages)))
}

/// GET /api/admin/packages - every package, cheapest first
pub async fn list_all(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, MembershipApiError> {
    let packages = state
        .list_packages_handler()
        .handle(ListPackagesQuery::All { actor: user })
        .await?;
    Ok(Json(to_responses(packages)))
}

/// POST /api/admin/packages
pub async fn create_package(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<PackageRequest>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let cmd = CreatePackageCommand {
        actor: user,
        details: request.into(),
    };
    let package = state.create_package_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(PackageResponse::from(package))))
}

/// PUT /api/admin/packages/:id
pub async fn update_package(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(package_id): Path<PackageId>,
    Json(request): Json<PackageRequest>,
) -> Result<impl IntoResponse, MembershipApiError> {
    apply_change(&state, user, package_id, PackageChange::Revise(request.into())).await
}

/// POST /api/admin/packages/:id/toggle-active
pub async fn toggle_active(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(package_id): Path<PackageId>,
) -> Result<impl IntoResponse, MembershipApiError> {
    apply_change(&state, user, package_id, PackageChange::Toggle(PackageToggle::Active)).await
}

/// POST /api/admin/packages/:id/toggle-popular
pub async fn toggle_popular(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(package_id): Path<PackageId>,
) -> Result<impl IntoResponse, MembershipApiError> {
    apply_change(&state, user, package_id, PackageChange::Toggle(PackageToggle::Popular)).await
}

async fn apply_change(
    state: &AppState,
    actor: AuthenticatedUser,
    package_id: PackageId,
    change: PackageChange,
) -> Result<Json<PackageResponse>, MembershipApiError> {
    let cmd = UpdatePackageCommand {
        actor,
        package_id,
        change,
    };
    let package = state.update_package_handler().handle(cmd).await?;
    Ok(Json(PackageResponse::from(package)))
}

/// DELETE /api/admin/packages/:id
pub async fn delete_package(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(package_id): Path<PackageId>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let cmd = DeletePackageCommand {
        actor: user,
        package_id,
    };
    state.delete_package_handler().handle(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}
