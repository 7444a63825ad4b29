//! Locale-ambiguous amount string parsing.
//!
//! Written amounts use `.` and `,` both as decimal marks and as thousands
//! groupings depending on where they come from. The parser decides which is
//! which from the string's shape first and the currency's declared convention
//! second:
//!
//! - No separator: whole major units.
//! - One glyph kind: a lone separator followed by exactly the currency's
//!   minor-unit digit count is a decimal point whatever the convention says.
//!   Otherwise the glyph is a decimal point only if the currency declares it
//!   so, and is grouping in every other case.
//! - Both glyph kinds: the rightmost glyph is the decimal point and the other
//!   one must group on 3-digit boundaries.
//!
//! A currency without a grouping glyph, such as JPY, rejects grouping.
//!
//! Anything the parser can detect as inconsistent is rejected rather than
//! guessed at; callers that ingest messy feeds must correct them first.

mod strip;

#[cfg(test)]
mod tests;

use precise_money_shared::{CurrencyInfo, ParseError, Separator};
use rust_decimal::Decimal;
use tracing::trace;

/// Parses `raw` into an exact decimal with exactly the currency's minor-unit
/// digit count as scale.
///
/// # Example
///
/// ```
/// use precise_money_core::parser::parse;
/// use precise_money_shared::Currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse("1.234,56 €", &Currency::Eur.info()).unwrap(), dec!(1234.56));
/// assert_eq!(parse("$1,234.56", &Currency::Usd.info()).unwrap(), dec!(1234.56));
/// ```
pub fn parse(raw: &str, info: &CurrencyInfo) -> Result<Decimal, ParseError> {
    let stripped = strip::strip(raw, info)?;
    check_shape(raw, stripped.body)?;

    let split = resolve(raw, stripped.body, info)?;
    let allowed = info.minor_unit_digits();
    let found = u32::try_from(split.fraction.len()).unwrap_or(u32::MAX);
    if found > allowed {
        return Err(ParseError::ExcessPrecision {
            input: raw.to_string(),
            found,
            allowed,
        });
    }

    let canonical = canonical_string(stripped.negative, &split.integer, split.fraction, allowed);
    let mut value = Decimal::from_str_exact(&canonical)
        .map_err(|err| ParseError::malformed(raw, err.to_string()))?;
    if value.is_zero() {
        value.set_sign_positive(true);
    }

    trace!(input = raw, currency = %info.currency, %value, "Parsed amount");
    Ok(value)
}

/// Integer digits (grouping removed) and fractional digits of an amount.
#[derive(Debug, PartialEq, Eq)]
struct Split<'a> {
    integer: String,
    fraction: &'a str,
}

fn check_shape(raw: &str, body: &str) -> Result<(), ParseError> {
    if body.is_empty() {
        return Err(ParseError::malformed(raw, "no digits"));
    }

    let is_separator = |c: char| Separator::from_char(c).is_some();
    if body.starts_with(is_separator) || body.ends_with(is_separator) {
        return Err(ParseError::malformed(raw, "separator without digits on both sides"));
    }

    let bytes = body.as_bytes();
    if bytes
        .windows(2)
        .any(|pair| is_separator(char::from(pair[0])) && is_separator(char::from(pair[1])))
    {
        return Err(ParseError::malformed(raw, "adjacent separators"));
    }

    Ok(())
}

fn resolve<'a>(raw: &str, body: &'a str, info: &CurrencyInfo) -> Result<Split<'a>, ParseError> {
    let has_dot = body.contains('.');
    let has_comma = body.contains(',');

    match (has_dot, has_comma) {
        (false, false) => Ok(Split {
            integer: body.to_string(),
            fraction: "",
        }),
        (true, false) => resolve_single(raw, body, Separator::Dot, info),
        (false, true) => resolve_single(raw, body, Separator::Comma, info),
        (true, true) => resolve_both(raw, body, info),
    }
}

fn resolve_single<'a>(
    raw: &str,
    body: &'a str,
    glyph: Separator,
    info: &CurrencyInfo,
) -> Result<Split<'a>, ParseError> {
    let mark = glyph.as_char();
    let occurrences = body.matches(mark).count();
    let Some((head, tail)) = body.rsplit_once(mark) else {
        return Ok(Split {
            integer: body.to_string(),
            fraction: "",
        });
    };

    let digits = info.minor_unit_digits() as usize;
    if occurrences == 1 && digits > 0 && tail.len() == digits {
        trace!(input = raw, separator = %mark, "Lone separator before minor-unit run read as decimal");
        return Ok(Split {
            integer: head.to_string(),
            fraction: tail,
        });
    }

    if info.decimal_separator() == glyph {
        if occurrences > 1 {
            return Err(ParseError::AmbiguousSeparators {
                input: raw.to_string(),
                glyph: mark,
            });
        }
        trace!(input = raw, separator = %mark, "Separator read as decimal by currency convention");
        return Ok(Split {
            integer: head.to_string(),
            fraction: tail,
        });
    }

    trace!(input = raw, separator = %mark, "Separator read as grouping");
    Ok(Split {
        integer: ungroup(raw, body, mark, info)?,
        fraction: "",
    })
}

fn resolve_both<'a>(
    raw: &str,
    body: &'a str,
    info: &CurrencyInfo,
) -> Result<Split<'a>, ParseError> {
    let Some(position) = body.rfind(['.', ',']) else {
        return Err(ParseError::malformed(raw, "no separator"));
    };
    let decimal = char::from(body.as_bytes()[position]);
    if body.matches(decimal).count() > 1 {
        return Err(ParseError::AmbiguousSeparators {
            input: raw.to_string(),
            glyph: decimal,
        });
    }

    let grouping = if decimal == '.' { ',' } else { '.' };
    trace!(input = raw, %decimal, %grouping, "Rightmost separator read as decimal");
    Ok(Split {
        integer: ungroup(raw, &body[..position], grouping, info)?,
        fraction: &body[position + 1..],
    })
}

/// Removes grouping marks, requiring a leading group of 1-3 digits followed by
/// groups of exactly 3.
fn ungroup(raw: &str, integer: &str, mark: char, info: &CurrencyInfo) -> Result<String, ParseError> {
    if info.thousands_separator().is_none() {
        trace!(input = raw, currency = %info.currency, "Grouping rejected for ungrouped currency");
        return Err(ParseError::InconsistentGrouping {
            input: raw.to_string(),
        });
    }

    let mut groups = integer.split(mark);
    let leading_ok = groups.next().is_some_and(|g| (1..=3).contains(&g.len()));
    if !leading_ok || !groups.all(|g| g.len() == 3) {
        return Err(ParseError::InconsistentGrouping {
            input: raw.to_string(),
        });
    }
    Ok(integer.replace(mark, ""))
}

fn canonical_string(negative: bool, integer: &str, fraction: &str, digits: u32) -> String {
    let mut canonical = String::with_capacity(integer.len() + digits as usize + 2);
    if negative {
        canonical.push('-');
    }
    canonical.push_str(integer);
    if digits > 0 {
        canonical.push('.');
        canonical.push_str(fraction);
        for _ in fraction.len()..digits as usize {
            canonical.push('0');
        }
    }
    canonical
}
