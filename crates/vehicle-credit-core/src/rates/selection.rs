//! Named selection rules: tier derivation, category mapping, default
//! insurance choice and the special-scenario predicate.

use rust_decimal_macros::dec;

use crate::policy::SpecialScenarioScope;
use crate::rates::tables::InsuranceRateEntry;
use crate::types::*;

const PASSENGER_TENORS: [u32; 5] = [12, 24, 36, 48, 60];
const COMMERCIAL_TENORS: [u32; 4] = [12, 24, 36, 48];

/// Star level from the down-payment percentage. Each band is inclusive on
/// its lower bound: >=30 -> 7, >=25 -> 6, >=20 -> 5, >=15 -> 4, >=10 -> 3,
/// >=5 -> 2, otherwise 1.
pub fn star_level(down_payment_percent: Percent) -> u8 {
    if down_payment_percent >= dec!(30) {
        7
    } else if down_payment_percent >= dec!(25) {
        6
    } else if down_payment_percent >= dec!(20) {
        5
    } else if down_payment_percent >= dec!(15) {
        4
    } else if down_payment_percent >= dec!(10) {
        3
    } else if down_payment_percent >= dec!(5) {
        2
    } else {
        1
    }
}

/// Map the vehicle classification onto the insurance schedule's category.
pub fn insurance_category(
    category: VehicleCategory,
    sub_category: SubCategory,
    is_loading_unit: bool,
) -> InsuranceCategory {
    match (category, sub_category, is_loading_unit) {
        (VehicleCategory::Passenger, _, _) => InsuranceCategory::Passenger,
        (VehicleCategory::Commercial, SubCategory::Passenger, false) => {
            InsuranceCategory::CommercialUsed
        }
        (VehicleCategory::Commercial, SubCategory::Passenger, true) => {
            InsuranceCategory::CommercialLoading
        }
        (VehicleCategory::Commercial, SubCategory::Truck, false) => {
            InsuranceCategory::CommercialUsedTruck
        }
        (VehicleCategory::Commercial, SubCategory::Truck, true) => {
            InsuranceCategory::CommercialLoadingTruck
        }
        (VehicleCategory::Commercial, SubCategory::Bus, false) => InsuranceCategory::CommercialUsedBus,
        (VehicleCategory::Commercial, SubCategory::Bus, true) => {
            InsuranceCategory::CommercialLoadingBus
        }
    }
}

/// Default insurance choice: the lowest rate, the earliest entry on ties.
pub fn default_insurance_selection<'a>(
    candidates: &[&'a InsuranceRateEntry],
) -> Option<&'a InsuranceRateEntry> {
    candidates
        .iter()
        .copied()
        .reduce(|best, e| if e.rate < best.rate { e } else { best })
}

/// Whether a request takes the special-scenario computation path.
pub fn is_special_scenario(
    scope: SpecialScenarioScope,
    category: VehicleCategory,
    payment_type: PaymentType,
    star_level: u8,
) -> bool {
    if star_level != 1 {
        return false;
    }
    match scope {
        SpecialScenarioScope::PassengerAddb => {
            category == VehicleCategory::Passenger && payment_type == PaymentType::Addb
        }
        SpecialScenarioScope::AnyTierOne => true,
    }
}

/// Tenors offered for a category, in months.
pub fn offered_tenors(category: VehicleCategory) -> &'static [u32] {
    match category {
        VehicleCategory::Passenger => &PASSENGER_TENORS,
        VehicleCategory::Commercial => &COMMERCIAL_TENORS,
    }
}
