//! Significant-digit rounding and minor-unit quantization.

use precise_money_shared::{MoneyError, MoneyResult, Rounding};
use rust_decimal::Decimal;

/// Digits in the mantissa of `value`, ignoring sign.
fn mantissa_digits(value: Decimal) -> u32 {
    value
        .mantissa()
        .unsigned_abs()
        .checked_ilog10()
        .map_or(1, |log| log + 1)
}

/// Digits left of the decimal point, zero for values below one.
pub(crate) fn integer_digits(value: Decimal) -> u32 {
    if value.is_zero() {
        return 0;
    }
    mantissa_digits(value).saturating_sub(value.scale())
}

/// Rounds `value` to `digits` significant digits.
///
/// Integer digits are never rounded away: a value whose integer part is
/// wider than `digits` is a precision overflow.
pub(crate) fn round_significant(
    value: Decimal,
    digits: u32,
    rounding: Rounding,
) -> MoneyResult<Decimal> {
    if value.is_zero() {
        return Ok(value);
    }

    let integer = integer_digits(value);
    if integer > digits {
        return Err(MoneyError::PrecisionOverflow(format!(
            "{value} needs {integer} integer digits, precision allows {digits}"
        )));
    }

    let scale = value.scale();
    let keep = if integer > 0 {
        digits - integer
    } else {
        // Leading zeros after the point are not significant.
        scale.saturating_sub(mantissa_digits(value)) + digits
    };
    if keep >= scale {
        return Ok(value);
    }
    Ok(value.round_dp_with_strategy(keep, rounding.strategy()))
}

/// Rounds and pads `value` to exactly `minor_unit_digits` fractional digits.
///
/// The result always carries that scale, and zero is never negative.
pub fn quantize(value: Decimal, minor_unit_digits: u32, rounding: Rounding) -> MoneyResult<Decimal> {
    let mut quantized = value.round_dp_with_strategy(minor_unit_digits, rounding.strategy());
    quantized.rescale(minor_unit_digits);
    if quantized.scale() != minor_unit_digits {
        return Err(MoneyError::PrecisionOverflow(format!(
            "{value} cannot carry {minor_unit_digits} fractional digits"
        )));
    }
    if quantized.is_zero() {
        quantized.set_sign_positive(true);
    }
    Ok(quantized)
}
