use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::CreditSimError;
use crate::types::Money;
use crate::CreditSimResult;

/// Grid for the flat-interest figure.
pub const INTEREST_ROUNDING: Money = dec!(100);

/// Grid for the monthly installment.
pub const INSTALLMENT_ROUNDING: Money = dec!(10_000);

/// Round to the nearest multiple, halves going up: floor(x/m + 0.5) * m.
pub fn round_half_up(value: Money, multiple: Money) -> CreditSimResult<Money> {
    check_multiple(multiple)?;
    value
        .checked_div(multiple)
        .and_then(|steps| steps.checked_add(dec!(0.5)))
        .and_then(|steps| steps.floor().checked_mul(multiple))
        .ok_or_else(|| CreditSimError::overflow("value"))
}

/// Round up to the next multiple: ceil(x/m) * m.
pub fn ceil_to(value: Money, multiple: Money) -> CreditSimResult<Money> {
    check_multiple(multiple)?;
    value
        .checked_div(multiple)
        .and_then(|steps| steps.ceil().checked_mul(multiple))
        .ok_or_else(|| CreditSimError::overflow("value"))
}

fn check_multiple(multiple: Money) -> CreditSimResult<()> {
    if multiple <= Decimal::ZERO {
        return Err(CreditSimError::invalid(
            "multiple",
            "Rounding multiple must be positive",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up_to_hundred() {
        assert_eq!(round_half_up(dec!(7_386_049), dec!(100)).unwrap(), dec!(7_386_000));
        assert_eq!(round_half_up(dec!(7_386_050), dec!(100)).unwrap(), dec!(7_386_100));
        assert_eq!(round_half_up(dec!(7_386_000), dec!(100)).unwrap(), dec!(7_386_000));
    }

    #[test]
    fn test_round_half_up_fractional_input() {
        assert_eq!(round_half_up(dec!(1_249.99), dec!(100)).unwrap(), dec!(1_200));
        assert_eq!(round_half_up(dec!(1_250.00), dec!(100)).unwrap(), dec!(1_300));
    }

    #[test]
    fn test_ceil_to_ten_thousand() {
        let raw = dec!(130_486_000) / dec!(12);
        assert_eq!(ceil_to(raw, dec!(10_000)).unwrap(), dec!(10_880_000));
        assert_eq!(ceil_to(dec!(10_000_001), dec!(10_000)).unwrap(), dec!(10_010_000));
    }

    #[test]
    fn test_rounding_is_idempotent() {
        let once = round_half_up(dec!(123_456.78), INTEREST_ROUNDING).unwrap();
        assert_eq!(round_half_up(once, INTEREST_ROUNDING).unwrap(), once);

        let once = ceil_to(dec!(8_700_001), INSTALLMENT_ROUNDING).unwrap();
        assert_eq!(ceil_to(once, INSTALLMENT_ROUNDING).unwrap(), once);
    }

    #[test]
    fn test_zero_multiple_rejected() {
        let err = ceil_to(dec!(1), Decimal::ZERO).unwrap_err();
        match err {
            CreditSimError::InvalidInput { field, .. } => assert_eq!(field, "multiple"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_step_count_rejected() {
        match ceil_to(Decimal::MAX, dec!(0.001)).unwrap_err() {
            CreditSimError::InvalidInput { field, .. } => assert_eq!(field, "value"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }
}
