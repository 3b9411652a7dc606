//! Pricing policy: the fixed fees and the policy choices the calculator and
//! rate resolver apply. Every field has a serde default, so an empty JSON or
//! YAML document deserialises to the baseline policy.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CreditSimError;
use crate::types::{Money, Rate};
use crate::CreditSimResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPolicy {
    /// Policy fee financed together with the principal (part of AR).
    pub policy_fee: Money,
    /// Policy fee collected in cash at signing (part of TDP).
    pub policy_fee_at_first_payment: Money,
    /// Interest rate applied when the schedule has no matching entry.
    pub interest_fallback_rate: Rate,
    pub missing_insurance: MissingInsurancePolicy,
    pub special_scenario: SpecialScenarioPolicy,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            policy_fee: dec!(100_000),
            policy_fee_at_first_payment: dec!(50_000),
            interest_fallback_rate: Decimal::ZERO,
            missing_insurance: MissingInsurancePolicy::default(),
            special_scenario: SpecialScenarioPolicy::default(),
        }
    }
}

/// What to do when no insurance entry covers (category, tenor, price).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingInsurancePolicy {
    /// Proceed with a 0% insurance rate and emit a warning.
    #[default]
    ZeroRate,
    /// Fail with `NoInsuranceCandidates`.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialScenarioPolicy {
    pub mode: SpecialScenarioMode,
    pub scope: SpecialScenarioScope,
    /// Interest-suppressed mode: installments waived from the divisor.
    pub waived_installments: u32,
    /// Regional-override mode: amount added to the price before insuring.
    pub insurance_base_surcharge: Money,
    /// Regional-override mode: installments collected at signing.
    pub upfront_installments: u32,
}

impl Default for SpecialScenarioPolicy {
    fn default() -> Self {
        Self {
            mode: SpecialScenarioMode::default(),
            scope: SpecialScenarioScope::default(),
            waived_installments: 2,
            insurance_base_surcharge: dec!(2_000_000),
            upfront_installments: 2,
        }
    }
}

/// Computation path taken when the special scenario is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialScenarioMode {
    /// Interest forced to zero, divisor = tenor - waived installments.
    #[default]
    InterestSuppressed,
    /// No down payment, insurance on an inflated base from the regional
    /// table, upfront installments collected instead.
    RegionalOverride,
}

/// Which tier-1 requests activate the special scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialScenarioScope {
    /// PASSENGER + ADDB + star level 1.
    #[default]
    PassengerAddb,
    /// Any request at star level 1.
    AnyTierOne,
}

impl PricingPolicy {
    pub fn validate(&self) -> CreditSimResult<()> {
        if self.policy_fee < Decimal::ZERO {
            return Err(CreditSimError::invalid(
                "policy_fee",
                "Policy fee cannot be negative",
            ));
        }
        if self.policy_fee_at_first_payment < Decimal::ZERO {
            return Err(CreditSimError::invalid(
                "policy_fee_at_first_payment",
                "Policy fee at first payment cannot be negative",
            ));
        }
        if self.interest_fallback_rate < Decimal::ZERO {
            return Err(CreditSimError::invalid(
                "interest_fallback_rate",
                "Fallback interest rate cannot be negative",
            ));
        }
        if self.special_scenario.insurance_base_surcharge < Decimal::ZERO {
            return Err(CreditSimError::invalid(
                "special_scenario.insurance_base_surcharge",
                "Insurance base surcharge cannot be negative",
            ));
        }
        if self.special_scenario.upfront_installments == 0 {
            return Err(CreditSimError::invalid(
                "special_scenario.upfront_installments",
                "At least one upfront installment is required",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_baseline() {
        let policy: PricingPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy, PricingPolicy::default());
        assert_eq!(policy.policy_fee, dec!(100_000));
        assert_eq!(policy.policy_fee_at_first_payment, dec!(50_000));
        assert_eq!(policy.interest_fallback_rate, Decimal::ZERO);
        assert_eq!(policy.special_scenario.mode, SpecialScenarioMode::InterestSuppressed);
        assert_eq!(policy.special_scenario.scope, SpecialScenarioScope::PassengerAddb);
    }

    #[test]
    fn test_partial_override() {
        let policy: PricingPolicy = serde_json::from_str(
            r#"{"interest_fallback_rate": "0.085", "special_scenario": {"mode": "regional_override"}}"#,
        )
        .unwrap();
        assert_eq!(policy.interest_fallback_rate, dec!(0.085));
        assert_eq!(policy.special_scenario.mode, SpecialScenarioMode::RegionalOverride);
        assert_eq!(policy.special_scenario.upfront_installments, 2);
        assert_eq!(policy.missing_insurance, MissingInsurancePolicy::ZeroRate);
    }

    #[test]
    fn test_negative_fallback_rejected() {
        let policy = PricingPolicy {
            interest_fallback_rate: dec!(-0.01),
            ..PricingPolicy::default()
        };
        match policy.validate().unwrap_err() {
            CreditSimError::InvalidInput { field, .. } => {
                assert_eq!(field, "interest_fallback_rate")
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_upfront_installments_rejected() {
        let mut policy = PricingPolicy::default();
        policy.special_scenario.upfront_installments = 0;
        assert!(policy.validate().is_err());
    }
}
