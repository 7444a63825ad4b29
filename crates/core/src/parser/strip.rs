//! Sign and currency-token stripping.

use precise_money_shared::{CurrencyInfo, ParseError};

/// Amount body left after stripping, holding only digits and separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Stripped<'a> {
    pub negative: bool,
    pub body: &'a str,
}

/// Removes surrounding whitespace, one sign, and the currency's symbol or code.
///
/// The sign may lead (`-$5`, `$-5`) or trail (`5-`, `5 USD-`), but only once.
pub(super) fn strip<'a>(raw: &'a str, info: &CurrencyInfo) -> Result<Stripped<'a>, ParseError> {
    let symbols = info.symbols();
    let mut rest = raw.trim();
    let mut sign = None;

    if let Some((negative, tail)) = take_leading_sign(rest) {
        sign = Some(negative);
        rest = tail.trim_start();
    }
    if let Some(tail) = strip_prefix_token(rest, &symbols) {
        rest = tail.trim_start();
    }
    if sign.is_none() {
        if let Some((negative, tail)) = take_leading_sign(rest) {
            sign = Some(negative);
            rest = tail.trim_start();
        }
    }

    if sign.is_none() {
        if let Some((negative, head)) = take_trailing_sign(rest) {
            sign = Some(negative);
            rest = head.trim_end();
        }
    }
    if let Some(head) = strip_suffix_token(rest, &symbols) {
        rest = head.trim_end();
    }
    if sign.is_none() {
        if let Some((negative, head)) = take_trailing_sign(rest) {
            sign = Some(negative);
            rest = head.trim_end();
        }
    }

    if let Some(found) = rest
        .chars()
        .find(|c| !(c.is_ascii_digit() || *c == '.' || *c == ','))
    {
        if found.is_whitespace() {
            return Err(ParseError::malformed(raw, "embedded whitespace"));
        }
        return Err(ParseError::UnrecognizedSymbol {
            input: raw.to_string(),
            found,
        });
    }

    Ok(Stripped {
        negative: sign.unwrap_or(false),
        body: rest,
    })
}

fn take_leading_sign(s: &str) -> Option<(bool, &str)> {
    if let Some(tail) = s.strip_prefix('-') {
        Some((true, tail))
    } else {
        s.strip_prefix('+').map(|tail| (false, tail))
    }
}

fn take_trailing_sign(s: &str) -> Option<(bool, &str)> {
    if let Some(head) = s.strip_suffix('-') {
        Some((true, head))
    } else {
        s.strip_suffix('+').map(|head| (false, head))
    }
}

fn strip_prefix_token<'a>(s: &'a str, tokens: &[&str]) -> Option<&'a str> {
    tokens.iter().find_map(|token| {
        let head = s.get(..token.len())?;
        head.eq_ignore_ascii_case(token).then(|| &s[token.len()..])
    })
}

fn strip_suffix_token<'a>(s: &'a str, tokens: &[&str]) -> Option<&'a str> {
    tokens.iter().find_map(|token| {
        let start = s.len().checked_sub(token.len())?;
        let tail = s.get(start..)?;
        tail.eq_ignore_ascii_case(token).then(|| &s[..start])
    })
}
