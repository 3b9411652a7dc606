use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::calculator::input::SimulationInput;
use crate::policy::{MissingInsurancePolicy, PricingPolicy, SpecialScenarioMode};
use crate::rates::selection::{
    default_insurance_selection, insurance_category, is_special_scenario, offered_tenors,
    star_level,
};
use crate::rates::tables::{InsuranceRateEntry, RateTables};
use crate::{types::*, CreditSimError, CreditSimResult};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Where the interest rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    Table,
    /// No schedule entry matched; `PricingPolicy::interest_fallback_rate` applies.
    Fallback,
    /// Forced to zero by the interest-suppressed special scenario.
    Suppressed,
}

/// Where the insurance rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceSource {
    Selected,
    Regional,
    /// Empty candidate set under `MissingInsurancePolicy::ZeroRate`.
    MissingZeroRate,
}

/// Rates and tier for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRates {
    pub star_level: u8,
    pub interest_rate: Rate,
    pub interest_rate_source: RateSource,
    pub insurance_category: InsuranceCategory,
    pub insurance_rate: Rate,
    pub insurance_label: Option<String>,
    pub insurance_source: InsuranceSource,
    pub is_special_scenario: bool,
    /// Set only when `is_special_scenario` is true.
    pub special_scenario_mode: Option<SpecialScenarioMode>,
}

impl ResolvedRates {
    /// Rates for the standard path, bypassing table lookup.
    pub fn standard(star_level: u8, interest_rate: Rate, insurance_rate: Rate) -> Self {
        Self {
            star_level,
            interest_rate,
            interest_rate_source: RateSource::Table,
            insurance_category: InsuranceCategory::Passenger,
            insurance_rate,
            insurance_label: None,
            insurance_source: InsuranceSource::Selected,
            is_special_scenario: false,
            special_scenario_mode: None,
        }
    }

    /// Soft warnings a caller may want to surface.
    pub fn warnings(&self, input: &SimulationInput) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.interest_rate_source == RateSource::Fallback {
            warnings.push(format!(
                "No interest rate for {} / {} / star {} / {} months; fallback rate {} applied",
                input.category,
                input.payment_type,
                self.star_level,
                input.tenor_months,
                self.interest_rate
            ));
        }
        if self.insurance_source == InsuranceSource::MissingZeroRate {
            warnings.push(format!(
                "No insurance rate for {} at {} months and price {}; insurance rate set to 0",
                self.insurance_category, input.tenor_months, input.vehicle_price
            ));
        }
        if !offered_tenors(input.category).contains(&input.tenor_months) {
            warnings.push(format!(
                "Tenor of {} months is not offered for {}",
                input.tenor_months, input.category
            ));
        }
        if let Some(mode) = self.special_scenario_mode {
            warnings.push(format!("Special scenario active ({mode:?})"));
        }
        warnings
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Pick the tier, interest rate and insurance rate for `input`.
///
/// The selected insurance label must be one of the candidates: call
/// [`apply_default_insurance`] first when the caller has not chosen one.
pub fn resolve_rates(
    input: &SimulationInput,
    tables: &RateTables,
    policy: &PricingPolicy,
) -> CreditSimResult<ResolvedRates> {
    input.validate()?;

    let star = star_level(input.down_payment_percent);
    let special = is_special_scenario(
        policy.special_scenario.scope,
        input.category,
        input.payment_type,
        star,
    );
    let mode = special.then_some(policy.special_scenario.mode);

    let (interest_rate, interest_rate_source) =
        match tables.find_interest_rate(input.category, input.payment_type, star, input.tenor_months)
        {
            Some(entry) => (entry.rate, RateSource::Table),
            None => {
                debug!(
                    category = %input.category,
                    payment_type = %input.payment_type,
                    star_level = star,
                    tenor_months = input.tenor_months,
                    fallback = %policy.interest_fallback_rate,
                    "interest rate not found, using fallback"
                );
                (policy.interest_fallback_rate, RateSource::Fallback)
            }
        };
    let (interest_rate, interest_rate_source) = match mode {
        Some(SpecialScenarioMode::InterestSuppressed) => (Decimal::ZERO, RateSource::Suppressed),
        _ => (interest_rate, interest_rate_source),
    };

    let ins_category = insurance_category(input.category, input.sub_category, input.is_loading_unit);
    let (insurance_rate, insurance_label, insurance_source) = match mode {
        Some(SpecialScenarioMode::RegionalOverride) => {
            resolve_regional_insurance(input, tables, policy, ins_category)?
        }
        _ => resolve_selected_insurance(input, tables, policy, ins_category)?,
    };

    Ok(ResolvedRates {
        star_level: star,
        interest_rate,
        interest_rate_source,
        insurance_category: ins_category,
        insurance_rate,
        insurance_label,
        insurance_source,
        is_special_scenario: special,
        special_scenario_mode: mode,
    })
}

/// Candidate set for the input's category, tenor and price.
pub fn insurance_candidates<'a>(
    input: &SimulationInput,
    tables: &'a RateTables,
) -> Vec<&'a InsuranceRateEntry> {
    let category = insurance_category(input.category, input.sub_category, input.is_loading_unit);
    tables.insurance_candidates(category, input.tenor_months, input.vehicle_price)
}

/// Copy of `input` whose insurance label is valid for its candidate set:
/// an absent or stale label is replaced by the default selection, and the
/// label is cleared when there are no candidates.
pub fn apply_default_insurance(input: &SimulationInput, tables: &RateTables) -> SimulationInput {
    let candidates = insurance_candidates(input, tables);
    let current_is_valid = input
        .selected_insurance_label
        .as_deref()
        .is_some_and(|label| candidates.iter().any(|c| c.label == label));

    let mut out = input.clone();
    if !current_is_valid {
        out.selected_insurance_label =
            default_insurance_selection(&candidates).map(|e| e.label.clone());
    }
    out
}

// ---------------------------------------------------------------------------
// Insurance options listing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsuranceOptionsRequest {
    pub input: SimulationInput,
    pub rate_tables: RateTables,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsuranceOptions {
    pub insurance_category: InsuranceCategory,
    pub tenor_years: Option<u32>,
    pub candidates: Vec<InsuranceRateEntry>,
    pub default_label: Option<String>,
    pub offered_tenors: Vec<u32>,
}

/// List the insurance products available to a request, with the default pick.
pub fn list_insurance_options(
    request: &InsuranceOptionsRequest,
) -> CreditSimResult<ComputationOutput<InsuranceOptions>> {
    let start = Instant::now();
    let input = &request.input;
    input.validate()?;

    let mut warnings = Vec::new();
    let candidates = insurance_candidates(input, &request.rate_tables);
    if candidates.is_empty() {
        warnings.push("No insurance product covers this category, tenor and price".to_string());
    }
    let default_label = default_insurance_selection(&candidates).map(|e| e.label.clone());

    let output = InsuranceOptions {
        insurance_category: insurance_category(
            input.category,
            input.sub_category,
            input.is_loading_unit,
        ),
        tenor_years: (input.tenor_months % 12 == 0).then_some(input.tenor_months / 12),
        candidates: candidates.into_iter().cloned().collect(),
        default_label,
        offered_tenors: offered_tenors(input.category).to_vec(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "tenor_match": "exact tenor_months / 12",
        "price_match": "inclusive [min_price, max_price]",
        "default_selection": "lowest rate, first on ties",
    });

    Ok(with_metadata(
        "Insurance candidate filter",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

type InsurancePick = (Rate, Option<String>, InsuranceSource);

fn resolve_selected_insurance(
    input: &SimulationInput,
    tables: &RateTables,
    policy: &PricingPolicy,
    category: InsuranceCategory,
) -> CreditSimResult<InsurancePick> {
    let candidates = tables.insurance_candidates(category, input.tenor_months, input.vehicle_price);
    if candidates.is_empty() {
        return missing_insurance(input, policy, category);
    }

    let label = input.selected_insurance_label.as_deref().ok_or_else(|| {
        CreditSimError::invalid(
            "selected_insurance_label",
            "No insurance product selected; apply the default selection first",
        )
    })?;
    let entry = candidates.iter().find(|c| c.label == label).ok_or_else(|| {
        CreditSimError::invalid(
            "selected_insurance_label",
            format!("'{label}' is not offered for {category} at {} months", input.tenor_months),
        )
    })?;

    Ok((entry.rate, Some(entry.label.clone()), InsuranceSource::Selected))
}

fn resolve_regional_insurance(
    input: &SimulationInput,
    tables: &RateTables,
    policy: &PricingPolicy,
    category: InsuranceCategory,
) -> CreditSimResult<InsurancePick> {
    let insured_base = input
        .vehicle_price
        .checked_add(policy.special_scenario.insurance_base_surcharge)
        .ok_or_else(|| CreditSimError::overflow("vehicle_price"))?;
    let pick = tables.regional_insurance.as_ref().and_then(|table| {
        table
            .rate_for(insured_base, input.tenor_months)
            .map(|rate| (rate, table.region.clone()))
    });
    match pick {
        Some((rate, region)) => Ok((rate, Some(region), InsuranceSource::Regional)),
        None => missing_insurance(input, policy, category),
    }
}

fn missing_insurance(
    input: &SimulationInput,
    policy: &PricingPolicy,
    category: InsuranceCategory,
) -> CreditSimResult<InsurancePick> {
    match policy.missing_insurance {
        MissingInsurancePolicy::ZeroRate => {
            debug!(%category, tenor_months = input.tenor_months, "no insurance candidates, using zero rate");
            Ok((Decimal::ZERO, None, InsuranceSource::MissingZeroRate))
        }
        MissingInsurancePolicy::Reject => Err(CreditSimError::NoInsuranceCandidates {
            category: category.to_string(),
            tenor_months: input.tenor_months,
            vehicle_price: input.vehicle_price,
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
