//! HTTP DTOs for package endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::membership::{Package, PackageDetails};

/// Package form; validation happens in the domain.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub duration_days: u32,
    pub price: i64,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub popular: bool,
}

fn default_active() -> bool {
    true
}

impl From<PackageRequest> for PackageDetails {
    fn from(r: PackageRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            duration_days: r.duration_days,
            price: r.price,
            features: r.features,
            active: r.active,
            popular: r.popular,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PackageResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub duration_days: u32,
    pub price: i64,
    pub features: Vec<String>,
    pub active: bool,
    pub popular: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Package> for PackageResponse {
    fn from(p: Package) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name,
            description: p.description,
            duration_days: p.duration_days,
            price: p.price,
            features: p.features,
            active: p.active,
            popular: p.popular,
            created_at: p.created_at.as_datetime().to_rfc3339(),
            updated_at: p.updated_at.as_datetime().to_rfc3339(),
        }
    }
}
