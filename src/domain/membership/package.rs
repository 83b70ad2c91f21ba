//! Membership package - a purchasable plan template.

use crate::domain::foundation::{PackageId, Timestamp, ValidationError};
use serde::{Deserialize, Serialize};

/// Editable fields of a package, validated as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDetails {
    pub name: String,
    pub description: String,
    pub duration_days: u32,
    /// Price in whole currency units.
    pub price: i64,
    pub features: Vec<String>,
    pub active: bool,
    pub popular: bool,
}

impl PackageDetails {
    /// Trims text fields, drops blank features and checks the admin form rules:
    /// non-blank name, positive price, positive duration, at least one feature.
    pub fn normalized(mut self) -> Result<Self, ValidationError> {
        self.name = self.name.trim().to_string();
        self.description = self.description.trim().to_string();
        self.features = self
            .features
            .into_iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();

        if self.name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if self.price <= 0 {
            return Err(ValidationError::invalid_format(
                "price",
                "Price must be greater than 0",
            ));
        }
        if self.duration_days == 0 {
            return Err(ValidationError::invalid_format(
                "duration_days",
                "Duration must be greater than 0",
            ));
        }
        if self.features.is_empty() {
            return Err(ValidationError::invalid_format(
                "features",
                "Please add at least one feature",
            ));
        }
        Ok(self)
    }
}

/// A membership plan offered for sale.
///
/// Purchases copy name, price and duration at purchase time, so edits here
/// never rewrite purchase history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: PackageId,
    pub name: String,
    pub description: String,
    pub duration_days: u32,
    pub price: i64,
    pub features: Vec<String>,
    pub active: bool,
    pub popular: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Package {
    pub fn create(id: PackageId, details: PackageDetails) -> Result<Self, ValidationError> {
        let details = details.normalized()?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            name: details.name,
            description: details.description,
            duration_days: details.duration_days,
            price: details.price,
            features: details.features,
            active: details.active,
            popular: details.popular,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces every editable field.
    pub fn revise(&mut self, details: PackageDetails) -> Result<(), ValidationError> {
        let details = details.normalized()?;
        self.name = details.name;
        self.description = details.description;
        self.duration_days = details.duration_days;
        self.price = details.price;
        self.features = details.features;
        self.active = details.active;
        self.popular = details.popular;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn toggle_active(&mut self) {
        self.active = !self.active;
        self.updated_at = Timestamp::now();
    }

    pub fn toggle_popular(&mut self) {
        self.popular = !self.popular;
        self.updated_at = Timestamp::now();
    }

    pub fn details(&self) -> PackageDetails {
        PackageDetails {
            name: self.name.clone(),
            description: self.description.clone(),
            duration_days: self.duration_days,
            price: self.price,
            features: self.features.clone(),
            active: self.active,
            popular: self.popular,
        }
    }
}

#[cfg(test)]
pub(crate) fn monthly_details() -> PackageDetails {
    PackageDetails {
        name: "Monthly".to_string(),
        description: "Full gym access".to_string(),
        duration_days: 30,
        price: 3000,
        features: vec!["Gym floor".to_string(), "Locker".to_string()],
        active: true,
        popular: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_trims_and_keeps_feature_order() {
        let details = PackageDetails {
            name: "  Quarterly ".to_string(),
            features: vec![" Sauna".to_string(), "".to_string(), "Trainer ".to_string()],
            ..monthly_details()
        };
        let package = Package::create(PackageId::new(), details).unwrap();
        assert_eq!(package.name, "Quarterly");
        assert_eq!(package.features, vec!["Sauna", "Trainer"]);
    }

    #[test]
    fn blank_name_is_rejected() {
        let details = PackageDetails {
            name: "   ".to_string(),
            ..monthly_details()
        };
        let err = Package::create(PackageId::new(), details).unwrap_err();
        assert_eq!(err.field(), "name");
    }

    #[test]
    fn non_positive_price_is_rejected() {
        let details = PackageDetails {
            price: 0,
            ..monthly_details()
        };
        assert_eq!(
            Package::create(PackageId::new(), details).unwrap_err().field(),
            "price"
        );
    }

    #[test]
    fn zero_duration_is_rejected() {
        let details = PackageDetails {
            duration_days: 0,
            ..monthly_details()
        };
        assert_eq!(
            Package::create(PackageId::new(), details).unwrap_err().field(),
            "duration_days"
        );
    }

    #[test]
    fn package_without_features_is_rejected() {
        let details = PackageDetails {
            features: vec!["  ".to_string()],
            ..monthly_details()
        };
        assert_eq!(
            Package::create(PackageId::new(), details).unwrap_err().field(),
            "features"
        );
    }

    #[test]
    fn revise_replaces_fields() {
        let mut package = Package::create(PackageId::new(), monthly_details()).unwrap();
        let revised = PackageDetails {
            price: 3500,
            popular: true,
            ..monthly_details()
        };
        package.revise(revised).unwrap();
        assert_eq!(package.price, 3500);
        assert!(package.popular);
    }

    #[test]
    fn rejected_revision_leaves_package_untouched() {
        let mut package = Package::create(PackageId::new(), monthly_details()).unwrap();
        let bad = PackageDetails {
            price: -1,
            ..monthly_details()
        };
        assert!(package.revise(bad).is_err());
        assert_eq!(package.price, 3000);
    }

    #[test]
    fn toggles_flip_flags() {
        let mut package = Package::create(PackageId::new(), monthly_details()).unwrap();
        package.toggle_active();
        package.toggle_popular();
        assert!(!package.active);
        assert!(package.popular);
    }
}
