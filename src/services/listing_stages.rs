// src/services/listing_stages.rs
//
// The owner wizard collects a listing in six linear stages and only advances when the
// current stage's required fields are filled. The same presence checks run here on the
// final submission, walking the stages in order.

use thiserror::Error;

use crate::models::property::{ChargeMode, ElectricityMode, PropertyDetails};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStage {
    Verification,
    Details,
    Pricing,
    Amenities,
    Rules,
    Images,
}

impl ListingStage {
    pub const ALL: [ListingStage; 6] = [
        ListingStage::Verification,
        ListingStage::Details,
        ListingStage::Pricing,
        ListingStage::Amenities,
        ListingStage::Rules,
        ListingStage::Images,
    ];

    /// 1-based position in the wizard.
    pub fn number(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0) + 1
    }

    pub fn title(self) -> &'static str {
        match self {
            ListingStage::Verification => "Owner Verification",
            ListingStage::Details => "Property Details",
            ListingStage::Pricing => "Pricing Details",
            ListingStage::Amenities => "Amenities",
            ListingStage::Rules => "Rules & Preferences",
            ListingStage::Images => "Property Images",
        }
    }

    /// First required field of this stage that is still empty.
    pub fn missing_field(self, listing: &PropertyDetails) -> Option<&'static str> {
        match self {
            ListingStage::Verification => listing.owner_phone.is_none().then_some("ownerPhone"),
            ListingStage::Details => [
                ("title", listing.title.is_some()),
                ("propertyType", listing.property_type.is_some()),
                ("city", listing.city.is_some()),
                ("address", listing.address.is_some()),
                ("bhkType", listing.bhk_type.is_some()),
                ("furnishing", listing.furnishing.is_some()),
                ("availableFrom", listing.available_from.is_some()),
                ("preferredTenant", listing.preferred_tenant.is_some()),
            ]
            .into_iter()
            .find_map(|(name, present)| (!present).then_some(name)),
            ListingStage::Pricing => {
                let p = &listing.pricing;
                let positive = |v: Option<f64>| v.is_some_and(|v| v > 0.0);
                if !positive(p.rent) {
                    Some("pricing.rent")
                } else if p.deposit.is_none() {
                    Some("pricing.deposit")
                } else if p.maintenance_charges == ChargeMode::Extra
                    && !positive(p.maintenance_amount)
                {
                    Some("pricing.maintenanceAmount")
                } else if p.electricity == ElectricityMode::Fixed
                    && !positive(p.electricity_amount)
                {
                    Some("pricing.electricityAmount")
                } else {
                    None
                }
            }
            // selections and toggles; nothing is mandatory
            ListingStage::Amenities | ListingStage::Rules | ListingStage::Images => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Error)]
#[error("Stage {} ({}) is incomplete: {field} is required", .stage.number(), .stage.title())]
pub struct IncompleteStage {
    pub stage: ListingStage,
    pub field: &'static str,
}

/// Fails at the first stage whose required fields are not all present.
pub fn check_listing(listing: &PropertyDetails) -> Result<(), IncompleteStage> {
    match ListingStage::ALL
        .into_iter()
        .find_map(|stage| stage.missing_field(listing).map(|field| (stage, field)))
    {
        Some((stage, field)) => Err(IncompleteStage { stage, field }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::property::{Furnishing, Pricing, PreferredTenant};
    use crate::models::tenant::{Bhk, PropertyType};
    use chrono::NaiveDate;

    fn full_listing() -> PropertyDetails {
        PropertyDetails {
            title: Some("Room near campus".into()),
            property_type: Some(PropertyType::Pg),
            city: Some("Pune".into()),
            address: Some("Kothrud".into()),
            bhk_type: Some(Bhk::Single),
            furnishing: Some(Furnishing::Fully),
            available_from: NaiveDate::from_ymd_opt(2025, 9, 1),
            preferred_tenant: Some(PreferredTenant::Student),
            pricing: Pricing {
                rent: Some(9000.0),
                deposit: Some(0.0),
                ..Default::default()
            },
            owner_phone: Some("9876543210".into()),
            ..Default::default()
        }
    }

    #[test]
    fn complete_listing_passes_every_stage() {
        assert_eq!(check_listing(&full_listing()), Ok(()));
    }

    #[test]
    fn stages_are_checked_in_order() {
        let mut listing = full_listing();
        listing.owner_phone = None;
        listing.city = None;

        let err = check_listing(&listing).unwrap_err();
        assert_eq!(err.stage, ListingStage::Verification);
        assert_eq!(
            err.to_string(),
            "Stage 1 (Owner Verification) is incomplete: ownerPhone is required"
        );

        listing.owner_phone = Some("9876543210".into());
        let err = check_listing(&listing).unwrap_err();
        assert_eq!((err.stage, err.field), (ListingStage::Details, "city"));
    }

    #[test]
    fn zero_rent_counts_as_missing() {
        let mut listing = full_listing();
        listing.pricing.rent = Some(0.0);
        let err = check_listing(&listing).unwrap_err();
        assert_eq!(err.stage.number(), 3);
        assert_eq!(err.field, "pricing.rent");
    }

    #[test]
    fn extra_and_fixed_charges_need_amounts() {
        let mut listing = full_listing();
        listing.pricing.maintenance_charges = ChargeMode::Extra;
        listing.pricing.maintenance_amount = Some(0.0);
        assert_eq!(
            check_listing(&listing).unwrap_err().field,
            "pricing.maintenanceAmount"
        );

        listing.pricing.maintenance_amount = Some(1200.5);
        listing.pricing.electricity = ElectricityMode::Fixed;
        assert_eq!(
            check_listing(&listing).unwrap_err().field,
            "pricing.electricityAmount"
        );

        listing.pricing.electricity = ElectricityMode::Metered;
        assert!(check_listing(&listing).is_ok());
    }
}
