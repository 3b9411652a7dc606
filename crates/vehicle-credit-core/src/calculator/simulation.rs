use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::calculator::financials::{calculate, CalculationResult};
use crate::calculator::input::SimulationInput;
use crate::policy::PricingPolicy;
use crate::rates::resolver::{apply_default_insurance, resolve_rates};
use crate::rates::tables::RateTables;
use crate::{types::*, CreditSimResult};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// A single forward calculation with the tables and policy it runs against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditSimulationRequest {
    pub input: SimulationInput,
    pub rate_tables: RateTables,
    #[serde(default)]
    pub policy: PricingPolicy,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Default the insurance choice, resolve rates and run the calculator.
pub fn simulate_credit(
    request: &CreditSimulationRequest,
) -> CreditSimResult<ComputationOutput<CalculationResult>> {
    let start = Instant::now();

    request.policy.validate()?;
    let (result, warnings) = run_simulation(&request.input, &request.rate_tables, &request.policy)?;

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = assumptions(&request.policy);

    Ok(with_metadata(
        "Flat-rate vehicle credit simulation",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

/// Resolve and calculate without the envelope. Returns the soft warnings
/// alongside the result.
pub fn run_simulation(
    input: &SimulationInput,
    tables: &RateTables,
    policy: &PricingPolicy,
) -> CreditSimResult<(CalculationResult, Vec<String>)> {
    let input = apply_default_insurance(input, tables);
    let rates = resolve_rates(&input, tables, policy)?;
    let warnings = rates.warnings(&input);
    let result = calculate(&input, &rates, policy)?;
    Ok((result, warnings))
}

pub(crate) fn assumptions(policy: &PricingPolicy) -> serde_json::Value {
    serde_json::json!({
        "policy_fee": policy.policy_fee.to_string(),
        "policy_fee_at_first_payment": policy.policy_fee_at_first_payment.to_string(),
        "interest_fallback_rate": policy.interest_fallback_rate.to_string(),
        "interest_rounding": "half-up to 100",
        "installment_rounding": "ceiling to 10,000",
        "special_scenario": policy.special_scenario,
        "missing_insurance": policy.missing_insurance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::tables::{InsuranceRateEntry, InterestRateEntry};
    use rust_decimal_macros::dec;

    fn request() -> CreditSimulationRequest {
        CreditSimulationRequest {
            input: SimulationInput {
                vehicle_price: dec!(150_000_000),
                down_payment_percent: dec!(20),
                tenor_months: 12,
                category: VehicleCategory::Passenger,
                sub_category: SubCategory::Passenger,
                is_loading_unit: false,
                payment_type: PaymentType::Addb,
                admin_fee: dec!(3_000_000),
                selected_insurance_label: None,
            },
            rate_tables: RateTables {
                interest_rates: vec![InterestRateEntry {
                    category: VehicleCategory::Passenger,
                    payment_type: PaymentType::Addb,
                    star_level: 5,
                    tenor_months: 12,
                    rate: dec!(0.06),
                }],
                insurance_rates: vec![InsuranceRateEntry {
                    category: InsuranceCategory::Passenger,
                    tenor_years: 1,
                    label: "ALL RISK".into(),
                    min_price: dec!(100_000_000),
                    max_price: dec!(200_000_000),
                    rate: dec!(0.02),
                }],
                regional_insurance: None,
            },
            policy: PricingPolicy::default(),
        }
    }

    #[test]
    fn test_simulate_defaults_insurance_and_calculates() {
        let out = simulate_credit(&request()).unwrap();
        assert_eq!(out.result.insurance_label.as_deref(), Some("ALL RISK"));
        assert_eq!(out.result.monthly_installment, dec!(10_880_000));
        assert!(out.warnings.is_empty());
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
        assert!(!out.methodology.is_empty());
    }

    #[test]
    fn test_simulate_reports_fallback_warning() {
        let mut req = request();
        req.input.down_payment_percent = dec!(25);
        let out = simulate_credit(&req).unwrap();
        assert_eq!(out.result.star_level, 6);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("fallback"));
    }

    #[test]
    fn test_request_json_without_policy() {
        let json = serde_json::json!({
            "input": { "vehicle_price": "150000000", "down_payment_percent": "20", "tenor_months": 12,
                       "admin_fee": "3000000" },
            "rate_tables": {}
        });
        let req: CreditSimulationRequest = serde_json::from_value(json).unwrap();
        assert_eq!(req.policy, PricingPolicy::default());
        let out = simulate_credit(&req).unwrap();
        // No tables at all: fallback interest of 0 and zero insurance
        assert_eq!(out.result.total_interest, rust_decimal::Decimal::ZERO);
        assert_eq!(out.warnings.len(), 2);
    }
}
