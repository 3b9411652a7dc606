use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculator::input::SimulationInput;
use crate::policy::{PricingPolicy, SpecialScenarioMode};
use crate::rates::resolver::{RateSource, ResolvedRates};
use crate::rounding::{ceil_to, round_half_up, INSTALLMENT_ROUNDING, INTEREST_ROUNDING};
use crate::{types::*, CreditSimError, CreditSimResult};

const MONTHS_PER_YEAR: Decimal = dec!(12);
const HUNDRED: Decimal = dec!(100);

/// Full financial breakdown of one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub star_level: u8,
    pub interest_rate: Rate,
    pub interest_rate_source: RateSource,
    pub insurance_rate: Rate,
    pub insurance_label: Option<String>,
    pub category: VehicleCategory,
    pub payment_type: PaymentType,
    pub tenor_months: u32,

    pub vehicle_price: Money,
    pub down_payment_amount: Money,
    pub down_payment_percent_actual: Percent,
    pub pure_loan_principal: Money,
    pub insurance_amount: Money,
    pub policy_fee: Money,
    /// AR: principal + insurance + policy fee.
    pub total_financed_amount: Money,
    pub total_interest: Money,
    pub total_loan_amount: Money,
    pub installment_divisor: u32,
    pub monthly_installment: Money,

    pub admin_fee: Money,
    pub policy_fee_at_first_payment: Money,
    pub first_installment_due_now: Money,
    /// TDP: cash due at signing.
    pub total_first_payment: Money,
    /// Nilai AP: price minus TDP.
    pub residual_asset_value: Money,

    pub is_special_scenario: bool,
    pub special_scenario_mode: Option<SpecialScenarioMode>,
}

/// Run the arithmetic pipeline for already-resolved rates.
///
/// Pure: no table access, no I/O. Interest is rounded half-up to 100 and
/// the installment ceiled to 10,000, each exactly once.
pub fn calculate(
    input: &SimulationInput,
    rates: &ResolvedRates,
    policy: &PricingPolicy,
) -> CreditSimResult<CalculationResult> {
    input.validate()?;
    policy.validate()?;

    let mode = if rates.is_special_scenario {
        rates.special_scenario_mode
    } else {
        None
    };
    let regional = mode == Some(SpecialScenarioMode::RegionalOverride);
    let price = input.vehicle_price;

    // -- Principal ------------------------------------------------------------
    let (down_payment_percent, insured_base) = if regional {
        (
            Decimal::ZERO,
            add(price, policy.special_scenario.insurance_base_surcharge, "vehicle_price")?,
        )
    } else {
        (input.down_payment_percent, price)
    };
    let down_payment_amount = mul(price, down_payment_percent / HUNDRED, "vehicle_price")?;
    let pure_loan_principal = price - down_payment_amount;
    let insurance_amount = mul(insured_base, rates.insurance_rate, "vehicle_price")?;
    let policy_fee = policy.policy_fee;
    let total_financed_amount = add(
        add(pure_loan_principal, insurance_amount, "vehicle_price")?,
        policy_fee,
        "vehicle_price",
    )?;

    // -- Interest ---------------------------------------------------------------
    let interest_rate = match mode {
        Some(SpecialScenarioMode::InterestSuppressed) => Decimal::ZERO,
        _ => rates.interest_rate,
    };
    let tenor_years = Decimal::from(input.tenor_months) / MONTHS_PER_YEAR;
    let raw_interest = mul(
        mul(total_financed_amount, interest_rate, "vehicle_price")?,
        tenor_years,
        "tenor_months",
    )?;
    let total_interest = round_half_up(raw_interest, INTEREST_ROUNDING)?;
    let total_loan_amount = add(total_financed_amount, total_interest, "vehicle_price")?;

    // -- Installment ------------------------------------------------------------
    let installment_divisor = installment_divisor(input.tenor_months, mode, policy)?;
    let monthly_installment = ceil_to(
        total_loan_amount / Decimal::from(installment_divisor),
        INSTALLMENT_ROUNDING,
    )?;

    // -- First payment ----------------------------------------------------------
    let first_installment_due_now = if regional {
        mul(
            monthly_installment,
            Decimal::from(policy.special_scenario.upfront_installments),
            "vehicle_price",
        )?
    } else if input.payment_type == PaymentType::Addm {
        monthly_installment
    } else {
        Decimal::ZERO
    };
    let policy_fee_at_first_payment = policy.policy_fee_at_first_payment;
    let total_first_payment = add(
        add(down_payment_amount, input.admin_fee, "admin_fee")?,
        add(policy_fee_at_first_payment, first_installment_due_now, "vehicle_price")?,
        "admin_fee",
    )?;
    let residual_asset_value = price - total_first_payment;

    Ok(CalculationResult {
        star_level: rates.star_level,
        interest_rate,
        interest_rate_source: rates.interest_rate_source,
        insurance_rate: rates.insurance_rate,
        insurance_label: rates.insurance_label.clone(),
        category: input.category,
        payment_type: input.payment_type,
        tenor_months: input.tenor_months,
        vehicle_price: price,
        down_payment_amount,
        down_payment_percent_actual: down_payment_percent,
        pure_loan_principal,
        insurance_amount,
        policy_fee,
        total_financed_amount,
        total_interest,
        total_loan_amount,
        installment_divisor,
        monthly_installment,
        admin_fee: input.admin_fee,
        policy_fee_at_first_payment,
        first_installment_due_now,
        total_first_payment,
        residual_asset_value,
        is_special_scenario: rates.is_special_scenario,
        special_scenario_mode: mode,
    })
}

fn add(a: Money, b: Money, field: &str) -> CreditSimResult<Money> {
    a.checked_add(b).ok_or_else(|| CreditSimError::overflow(field))
}

fn mul(a: Decimal, b: Decimal, field: &str) -> CreditSimResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| CreditSimError::overflow(field))
}

fn installment_divisor(
    tenor_months: u32,
    mode: Option<SpecialScenarioMode>,
    policy: &PricingPolicy,
) -> CreditSimResult<u32> {
    let waived = match mode {
        Some(SpecialScenarioMode::InterestSuppressed) => policy.special_scenario.waived_installments,
        _ => 0,
    };
    match tenor_months.checked_sub(waived) {
        Some(divisor) if divisor > 0 => Ok(divisor),
        _ => Err(CreditSimError::invalid(
            "tenor_months",
            format!(
                "Tenor of {tenor_months} months leaves no installments after waiving {waived}"
            ),
        )),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::resolver::InsuranceSource;

    fn base_input() -> SimulationInput {
        SimulationInput {
            vehicle_price: dec!(150_000_000),
            down_payment_percent: dec!(20),
            tenor_months: 12,
            category: VehicleCategory::Passenger,
            sub_category: SubCategory::Passenger,
            is_loading_unit: false,
            payment_type: PaymentType::Addb,
            admin_fee: dec!(3_000_000),
            selected_insurance_label: None,
        }
    }

    fn special_rates(mode: SpecialScenarioMode, interest: Rate, insurance: Rate) -> ResolvedRates {
        ResolvedRates {
            is_special_scenario: true,
            special_scenario_mode: Some(mode),
            ..ResolvedRates::standard(1, interest, insurance)
        }
    }

    #[test]
    fn test_reference_breakdown() {
        let rates = ResolvedRates::standard(5, dec!(0.06), dec!(0.02));
        let r = calculate(&base_input(), &rates, &PricingPolicy::default()).unwrap();

        assert_eq!(r.down_payment_amount, dec!(30_000_000));
        assert_eq!(r.pure_loan_principal, dec!(120_000_000));
        assert_eq!(r.insurance_amount, dec!(3_000_000));
        assert_eq!(r.policy_fee, dec!(100_000));
        assert_eq!(r.total_financed_amount, dec!(123_100_000));
        assert_eq!(r.total_interest, dec!(7_386_000));
        assert_eq!(r.total_loan_amount, dec!(130_486_000));
        assert_eq!(r.installment_divisor, 12);
        assert_eq!(r.monthly_installment, dec!(10_880_000));
        assert_eq!(r.first_installment_due_now, Decimal::ZERO);
        // 30M + 3M + 50k
        assert_eq!(r.total_first_payment, dec!(33_050_000));
        assert_eq!(r.residual_asset_value, dec!(116_950_000));
    }

    #[test]
    fn test_addm_collects_first_installment() {
        let mut input = base_input();
        input.payment_type = PaymentType::Addm;
        let rates = ResolvedRates::standard(5, dec!(0.06), dec!(0.02));
        let r = calculate(&input, &rates, &PricingPolicy::default()).unwrap();
        assert_eq!(r.first_installment_due_now, dec!(10_880_000));
        assert_eq!(r.total_first_payment, dec!(43_930_000));
    }

    #[test]
    fn test_interest_rounds_half_up_to_hundred() {
        let mut input = base_input();
        input.vehicle_price = dec!(100_000_000);
        input.down_payment_percent = dec!(10);
        input.tenor_months = 24;
        let rates = ResolvedRates::standard(3, dec!(0.0333333), Decimal::ZERO);
        let r = calculate(&input, &rates, &PricingPolicy::default()).unwrap();
        // 90.1M * 0.0333333 * 2 = 6_006_660.66 -> 6_006_700
        assert_eq!(r.total_financed_amount, dec!(90_100_000));
        assert_eq!(r.total_interest, dec!(6_006_700));
    }

    #[test]
    fn test_interest_suppressed_variant() {
        let mut input = base_input();
        input.down_payment_percent = dec!(3);
        let rates = special_rates(SpecialScenarioMode::InterestSuppressed, dec!(0.09), dec!(0.02));
        let r = calculate(&input, &rates, &PricingPolicy::default()).unwrap();

        assert_eq!(r.interest_rate, Decimal::ZERO);
        assert_eq!(r.total_interest, Decimal::ZERO);
        assert_eq!(r.installment_divisor, 10);
        // AR = 145.5M + 3M + 100k = 148.6M; / 10 = 14.86M
        assert_eq!(r.total_financed_amount, dec!(148_600_000));
        assert_eq!(r.monthly_installment, dec!(14_860_000));
        assert_eq!(r.down_payment_amount, dec!(4_500_000));
    }

    #[test]
    fn test_regional_override_variant() {
        let mut input = base_input();
        input.down_payment_percent = dec!(3);
        let rates = special_rates(SpecialScenarioMode::RegionalOverride, dec!(0.06), dec!(0.03));
        let r = calculate(&input, &rates, &PricingPolicy::default()).unwrap();

        assert_eq!(r.down_payment_amount, Decimal::ZERO);
        assert_eq!(r.down_payment_percent_actual, Decimal::ZERO);
        assert_eq!(r.pure_loan_principal, dec!(150_000_000));
        // (150M + 2M) * 0.03
        assert_eq!(r.insurance_amount, dec!(4_560_000));
        assert_eq!(r.total_financed_amount, dec!(154_660_000));
        // 154.66M * 0.06 = 9_279_600
        assert_eq!(r.total_interest, dec!(9_279_600));
        assert_eq!(r.installment_divisor, 12);
        // 163_939_600 / 12 = 13_661_633.3 -> 13_670_000
        assert_eq!(r.monthly_installment, dec!(13_670_000));
        assert_eq!(r.first_installment_due_now, dec!(27_340_000));
        assert_eq!(r.total_first_payment, dec!(30_390_000));
    }

    #[test]
    fn test_non_positive_divisor_rejected() {
        let mut input = base_input();
        input.tenor_months = 2;
        let rates = special_rates(SpecialScenarioMode::InterestSuppressed, Decimal::ZERO, Decimal::ZERO);
        match calculate(&input, &rates, &PricingPolicy::default()).unwrap_err() {
            CreditSimError::InvalidInput { field, .. } => assert_eq!(field, "tenor_months"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_insurance_source_carried() {
        let rates = ResolvedRates {
            insurance_source: InsuranceSource::MissingZeroRate,
            ..ResolvedRates::standard(5, dec!(0.06), Decimal::ZERO)
        };
        let r = calculate(&base_input(), &rates, &PricingPolicy::default()).unwrap();
        assert_eq!(r.insurance_amount, Decimal::ZERO);
        assert_eq!(r.total_financed_amount, dec!(120_100_000));
    }

    #[test]
    fn test_invalid_input_fails_fast() {
        let mut input = base_input();
        input.vehicle_price = dec!(-1);
        let rates = ResolvedRates::standard(5, dec!(0.06), dec!(0.02));
        assert!(calculate(&input, &rates, &PricingPolicy::default()).is_err());
    }

    #[test]
    fn test_price_beyond_decimal_range_rejected() {
        let mut input = base_input();
        input.vehicle_price = dec!(79_000_000_000_000_000_000_000_000_000);
        input.down_payment_percent = Decimal::ZERO;
        let rates = ResolvedRates::standard(5, dec!(0.06), dec!(0.02));
        match calculate(&input, &rates, &PricingPolicy::default()).unwrap_err() {
            CreditSimError::InvalidInput { field, .. } => assert_eq!(field, "vehicle_price"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_admin_fee_beyond_decimal_range_rejected() {
        let mut input = base_input();
        input.admin_fee = Decimal::MAX;
        let rates = ResolvedRates::standard(5, dec!(0.06), dec!(0.02));
        match calculate(&input, &rates, &PricingPolicy::default()).unwrap_err() {
            CreditSimError::InvalidInput { field, .. } => assert_eq!(field, "admin_fee"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }
}
