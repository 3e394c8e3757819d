// src/models/tenant.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::models::casting::{blank_as_none, lenient_date, lenient_i64, required_f64};

pub const MIN_AGE: i64 = 18;
pub const MAX_AGE: i64 = 100;
pub const MAX_BIO_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
    #[serde(rename = "Prefer not to say")]
    PreferNotToSay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Occupation {
    Student,
    #[serde(rename = "Working Professional")]
    WorkingProfessional,
    #[serde(rename = "Self-Employed")]
    SelfEmployed,
    Other,
}

impl Occupation {
    /// Wire label, also used as the indexed column value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Occupation::Student => "Student",
            Occupation::WorkingProfessional => "Working Professional",
            Occupation::SelfEmployed => "Self-Employed",
            Occupation::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PropertyType {
    #[serde(rename = "PG")]
    Pg,
    #[serde(rename = "Shared Flat")]
    SharedFlat,
    #[serde(rename = "Rented Apartment")]
    RentedApartment,
    #[default]
    Any,
}

/// Room configuration, shared by tenant preferences and listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bhk {
    #[serde(rename = "1rk")]
    OneRk,
    #[serde(rename = "1bhk")]
    OneBhk,
    #[serde(rename = "2bhk")]
    TwoBhk,
    #[serde(rename = "3bhk")]
    ThreeBhk,
    #[serde(rename = "4bhk")]
    FourBhk,
    #[serde(rename = "shared")]
    Shared,
    #[serde(rename = "single")]
    Single,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FurnishingPreference {
    #[serde(rename = "Fully Furnished")]
    FullyFurnished,
    #[serde(rename = "Semi Furnished")]
    SemiFurnished,
    Unfurnished,
    #[default]
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodPreference {
    Vegetarian,
    #[serde(rename = "Non-Vegetarian")]
    NonVegetarian,
    Vegan,
    #[serde(rename = "No Preference")]
    NoPreference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TenantAmenity {
    WiFi,
    #[serde(rename = "Power Backup")]
    PowerBackup,
    Lift,
    Parking,
    #[serde(rename = "Washing Machine")]
    WashingMachine,
    Fridge,
    #[serde(rename = "AC")]
    Ac,
    Geyser,
    Housekeeping,
    #[serde(rename = "Security/CCTV")]
    SecurityCctv,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    #[serde(deserialize_with = "required_f64")]
    pub min: f64,
    #[serde(deserialize_with = "required_f64")]
    pub max: f64,
}

/// Everything a tenant submits about themselves. `userId` and the completeness flag
/// are never read from the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantDetails {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub age: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub gender: Option<Gender>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub phone_number: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub occupation: Option<Occupation>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub current_city: Option<String>,

    #[serde(default)]
    pub budget: Option<Budget>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub preferred_city: Option<String>,
    #[serde(default)]
    pub preferred_locations: Vec<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub property_type: Option<PropertyType>,
    #[serde(default)]
    pub bhk_preference: Vec<Bhk>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub furnishing_preference: Option<FurnishingPreference>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub move_in_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub food_preference: Option<FoodPreference>,
    #[serde(default)]
    pub smoking_habit: bool,
    #[serde(default)]
    pub drinking_habit: bool,
    #[serde(default)]
    pub has_pets: bool,
    #[serde(default)]
    pub pet_details: Option<String>,

    #[serde(default)]
    pub required_amenities: Vec<TenantAmenity>,

    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub occupation_proof: Option<String>,
    #[serde(default)]
    pub id_proof: Option<String>,
}

impl TenantDetails {
    /// Fills in the schema defaults for enum selects left unset.
    pub fn with_defaults(mut self) -> Self {
        self.property_type.get_or_insert(PropertyType::Any);
        self.furnishing_preference
            .get_or_insert(FurnishingPreference::Any);
        self
    }

    /// Lays a submitted body over these stored details. Keys in the body replace the
    /// stored value (an explicit `null` clears it); keys it leaves out keep their value.
    pub fn merge_submission(&self, body: &Map<String, Value>) -> serde_json::Result<Self> {
        let mut doc = match serde_json::to_value(self)? {
            Value::Object(doc) => doc,
            _ => Map::new(),
        };
        doc.extend(body.iter().map(|(k, v)| (k.clone(), v.clone())));
        serde_json::from_value(Value::Object(doc))
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(age) = self.age {
            if !(MIN_AGE..=MAX_AGE).contains(&age) {
                return Err(format!(
                    "age must be between {} and {}, got {}",
                    MIN_AGE, MAX_AGE, age
                ));
            }
        }

        if let Some(budget) = &self.budget {
            if budget.min < 0.0 || budget.max < 0.0 {
                return Err("budget cannot be negative".to_string());
            }
            if budget.min > budget.max {
                return Err(format!(
                    "budget.min ({}) cannot exceed budget.max ({})",
                    budget.min, budget.max
                ));
            }
        }

        if let Some(bio) = &self.bio {
            let chars = bio.chars().count();
            if chars > MAX_BIO_CHARS {
                return Err(format!(
                    "bio must be at most {} characters, got {}",
                    MAX_BIO_CHARS, chars
                ));
            }
        }

        Ok(())
    }

    /// Profile completeness gates visibility in tenant search.
    pub fn is_complete(&self) -> bool {
        self.phone_number.is_some()
            && self.occupation.is_some()
            && self.budget.is_some()
            && self.preferred_city.is_some()
    }
}

/// Stored tenant profile, one per authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantProfile {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: String,
    #[serde(flatten)]
    pub details: TenantDetails,
    pub profile_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete_payload() -> serde_json::Value {
        json!({
            "phoneNumber": "9999999999",
            "occupation": "Student",
            "budget": { "min": 5000, "max": 10000 },
            "preferredCity": "Pune"
        })
    }

    #[test]
    fn complete_when_all_four_present() {
        let details: TenantDetails = serde_json::from_value(complete_payload()).unwrap();
        assert!(details.is_complete());
        assert!(details.validate().is_ok());
    }

    #[test]
    fn incomplete_when_any_one_missing() {
        for key in ["phoneNumber", "occupation", "budget", "preferredCity"] {
            let mut payload = complete_payload();
            payload.as_object_mut().unwrap().remove(key);
            let details: TenantDetails = serde_json::from_value(payload).unwrap();
            assert!(!details.is_complete(), "{} missing should be incomplete", key);
        }
    }

    #[test]
    fn blank_phone_counts_as_missing() {
        let mut payload = complete_payload();
        payload["phoneNumber"] = json!("");
        let details: TenantDetails = serde_json::from_value(payload).unwrap();
        assert!(!details.is_complete());
    }

    #[test]
    fn budget_needs_both_bounds() {
        let mut payload = complete_payload();
        payload["budget"] = json!({ "min": 5000 });
        assert!(serde_json::from_value::<TenantDetails>(payload).is_err());
    }

    #[test]
    fn client_form_shapes_are_accepted() {
        let details: TenantDetails = serde_json::from_value(json!({
            "age": "24",
            "gender": "",
            "occupation": "Working Professional",
            "budget": { "min": "8000", "max": "15000" },
            "bhkPreference": ["1bhk", "shared"],
            "furnishingPreference": "Semi Furnished",
            "moveInDate": "",
            "foodPreference": "No Preference",
            "requiredAmenities": ["WiFi", "Security/CCTV", "WiFi"]
        }))
        .unwrap();

        assert_eq!(details.age, Some(24));
        assert_eq!(details.gender, None);
        assert_eq!(details.budget, Some(Budget { min: 8000.0, max: 15000.0 }));
        assert_eq!(details.required_amenities.len(), 3);
    }

    #[test]
    fn budget_keeps_decimals() {
        let mut payload = complete_payload();
        payload["budget"] = json!({ "min": 5000.5, "max": "10000.25" });
        let details: TenantDetails = serde_json::from_value(payload).unwrap();
        assert_eq!(details.budget, Some(Budget { min: 5000.5, max: 10000.25 }));
        assert!(details.is_complete());
    }

    #[test]
    fn unknown_enum_values_are_rejected() {
        let err = serde_json::from_value::<TenantDetails>(json!({ "occupation": "Astronaut" }))
            .unwrap_err();
        assert!(err.to_string().contains("Astronaut"));
    }

    #[test]
    fn validation_limits() {
        let details = TenantDetails { age: Some(17), ..Default::default() };
        assert!(details.validate().unwrap_err().contains("between 18 and 100"));

        let details = TenantDetails { bio: Some("x".repeat(501)), ..Default::default() };
        assert!(details.validate().is_err());

        let details = TenantDetails {
            budget: Some(Budget { min: 12000.0, max: 10000.0 }),
            ..Default::default()
        };
        assert!(details.validate().unwrap_err().contains("cannot exceed"));
    }

    #[test]
    fn merge_keeps_keys_the_body_leaves_out() {
        let stored: TenantDetails = serde_json::from_value(json!({
            "age": 24,
            "phoneNumber": "9999999999",
            "occupation": "Student",
            "budget": { "min": 5000, "max": 10000 },
            "preferredCity": "Pune",
            "moveInDate": "2025-07-01",
            "bio": "first"
        }))
        .unwrap();

        let body = json!({ "bio": "updated", "organization": null, "age": "25" });
        let merged = stored.merge_submission(body.as_object().unwrap()).unwrap();

        assert_eq!(merged.bio.as_deref(), Some("updated"));
        assert_eq!(merged.age, Some(25));
        assert_eq!(merged.phone_number.as_deref(), Some("9999999999"));
        assert_eq!(merged.budget, stored.budget);
        assert_eq!(merged.move_in_date, stored.move_in_date);
        assert!(merged.is_complete());

        let cleared = stored
            .merge_submission(json!({ "preferredCity": "" }).as_object().unwrap())
            .unwrap();
        assert_eq!(cleared.preferred_city, None);
    }

    #[test]
    fn defaults_fill_unset_selects() {
        let details = TenantDetails::default().with_defaults();
        assert_eq!(details.property_type, Some(PropertyType::Any));
        assert_eq!(details.furnishing_preference, Some(FurnishingPreference::Any));
    }
}
