use serde::{Deserialize, Serialize};

use crate::models::tenant::TenantProfile;
use crate::repositories::TenantFilter;

/// Query string of `GET /api/tenant/all`. Kept as raw strings so empty values can be
/// ignored and bad numbers reported with the offending parameter.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantSearchQuery {
    pub city: Option<String>,
    pub min_budget: Option<String>,
    pub max_budget: Option<String>,
    pub occupation: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_amount(name: &str, value: Option<String>) -> Result<Option<f64>, String> {
    non_blank(value)
        .map(|v| match v.parse::<f64>() {
            Ok(amount) if amount.is_finite() => Ok(amount),
            _ => Err(format!("{} must be a number, got \"{}\"", name, v)),
        })
        .transpose()
}

impl TenantSearchQuery {
    pub fn into_filter(self) -> Result<TenantFilter, String> {
        Ok(TenantFilter {
            city: non_blank(self.city),
            occupation: non_blank(self.occupation),
            min_budget: parse_amount("minBudget", self.min_budget)?,
            max_budget: parse_amount("maxBudget", self.max_budget)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct TenantSavedOut {
    pub message: String,
    pub tenant: TenantProfile,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantProfileOut {
    pub profile_exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<TenantProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TenantListOut {
    pub count: usize,
    pub tenants: Vec<TenantProfile>,
}
