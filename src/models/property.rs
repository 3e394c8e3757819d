// src/models/property.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::casting::{blank_as_none, lenient_date, lenient_f64};
use crate::models::tenant::{Bhk, PropertyType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Furnishing {
    Fully,
    Semi,
    Unfurnished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreferredTenant {
    Student,
    #[serde(rename = "Working Professional")]
    WorkingProfessional,
    Family,
    Anyone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreferredGender {
    Male,
    Female,
    Any,
}

/// Maintenance and water are either part of the rent or billed on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeMode {
    #[default]
    Included,
    Extra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElectricityMode {
    #[default]
    Included,
    Metered,
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListingAmenity {
    Wifi,
    PowerBackup,
    Lift,
    Parking,
    WashingMachine,
    Fridge,
    Ac,
    Geyser,
    Housekeeping,
    Security,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rent: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub deposit: Option<f64>,
    #[serde(default)]
    pub maintenance_charges: ChargeMode,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub maintenance_amount: Option<f64>,
    #[serde(default)]
    pub electricity: ElectricityMode,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub electricity_amount: Option<f64>,
    #[serde(default)]
    pub water_charges: ChargeMode,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseRules {
    #[serde(default)]
    pub smoking_allowed: bool,
    #[serde(default)]
    pub alcohol_allowed: bool,
    #[serde(default)]
    pub pets_allowed: bool,
    #[serde(default)]
    pub visitor_restrictions: bool,
    #[serde(default)]
    pub curfew_restrictions: String,
}

/// Listing payload as assembled by the owner wizard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub property_type: Option<PropertyType>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub bhk_type: Option<Bhk>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub furnishing: Option<Furnishing>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub available_from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub preferred_tenant: Option<PreferredTenant>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub preferred_gender: Option<PreferredGender>,
    #[serde(default)]
    pub pricing: Pricing,
    #[serde(default)]
    pub amenities: Vec<ListingAmenity>,
    #[serde(default)]
    pub rules: HouseRules,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub owner_phone: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl PropertyDetails {
    /// Value rules that hold regardless of wizard stage.
    pub fn validate(&self) -> Result<(), String> {
        if self.property_type == Some(PropertyType::Any) {
            return Err("propertyType must be one of PG, Shared Flat, Rented Apartment".to_string());
        }

        let amounts = [
            ("pricing.rent", self.pricing.rent),
            ("pricing.deposit", self.pricing.deposit),
            ("pricing.maintenanceAmount", self.pricing.maintenance_amount),
            ("pricing.electricityAmount", self.pricing.electricity_amount),
        ];
        if let Some((name, _)) = amounts.iter().find(|(_, v)| v.is_some_and(|v| v < 0.0)) {
            return Err(format!("{} cannot be negative", name));
        }

        if self.images.iter().any(|url| url.trim().is_empty()) {
            return Err("images cannot contain empty references".to_string());
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub owner_id: String,
    #[serde(flatten)]
    pub details: PropertyDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
