use serde::{Deserialize, Serialize};

use crate::types::*;

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

/// One row of the interest-rate schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestRateEntry {
    pub category: VehicleCategory,
    pub payment_type: PaymentType,
    /// Discount tier, 1 through 7.
    pub star_level: u8,
    pub tenor_months: u32,
    /// Flat rate per year.
    pub rate: Rate,
}

/// One row of the insurance-rate schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceRateEntry {
    pub category: InsuranceCategory,
    pub tenor_years: u32,
    /// Unique among entries sharing category and tenor.
    pub label: String,
    pub min_price: Money,
    pub max_price: Money,
    /// Fraction of the vehicle price.
    pub rate: Rate,
}

/// Price-banded insurance schedule of a single region, used by the
/// regional-override special scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalInsuranceTable {
    pub region: String,
    pub bands: Vec<RegionalInsuranceBand>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalInsuranceBand {
    /// Inclusive upper bound of the insured base covered by this band.
    pub max_price: Money,
    /// Rate per tenor year: index 0 is year 1.
    pub rates_by_year: Vec<Rate>,
}

/// Snapshot of every table a calculation reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateTables {
    #[serde(default)]
    pub interest_rates: Vec<InterestRateEntry>,
    #[serde(default)]
    pub insurance_rates: Vec<InsuranceRateEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regional_insurance: Option<RegionalInsuranceTable>,
}

impl RateTables {
    /// Exact match on (category, payment type, star level, tenor).
    pub fn find_interest_rate(
        &self,
        category: VehicleCategory,
        payment_type: PaymentType,
        star_level: u8,
        tenor_months: u32,
    ) -> Option<&InterestRateEntry> {
        self.interest_rates.iter().find(|e| {
            e.category == category
                && e.payment_type == payment_type
                && e.star_level == star_level
                && e.tenor_months == tenor_months
        })
    }

    /// Every insurance entry for the category whose tenor equals
    /// `tenor_months / 12` exactly and whose price range contains the price.
    pub fn insurance_candidates(
        &self,
        category: InsuranceCategory,
        tenor_months: u32,
        vehicle_price: Money,
    ) -> Vec<&InsuranceRateEntry> {
        if tenor_months % 12 != 0 {
            return Vec::new();
        }
        let tenor_years = tenor_months / 12;
        self.insurance_rates
            .iter()
            .filter(|e| {
                e.category == category
                    && e.tenor_years == tenor_years
                    && vehicle_price >= e.min_price
                    && vehicle_price <= e.max_price
            })
            .collect()
    }
}

impl RegionalInsuranceTable {
    /// Rate of the first band (ascending by `max_price`) covering `insured_base`,
    /// for the year count ceil(tenor / 12).
    pub fn rate_for(&self, insured_base: Money, tenor_months: u32) -> Option<Rate> {
        let tenor_years = tenor_months.div_ceil(12);
        if tenor_years == 0 {
            return None;
        }
        let mut bands: Vec<&RegionalInsuranceBand> = self.bands.iter().collect();
        bands.sort_by(|a, b| a.max_price.cmp(&b.max_price));
        bands
            .into_iter()
            .find(|b| insured_base <= b.max_price)
            .and_then(|b| b.rates_by_year.get(tenor_years as usize - 1).copied())
    }
}
