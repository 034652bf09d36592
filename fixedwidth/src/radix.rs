//! Conversion between raw magnitudes and decimal, hexadecimal and
//! binary text.
//!
//! Digits are produced by explicit positional arithmetic (repeated
//! division by the base) and binary text is expanded from the
//! hexadecimal digits one nibble at a time.  Fixed-width padding is
//! applied by the caller, which knows the width of the value.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::Serialize;
use tracing::{event, Level};

use super::error::Error;

/// The notations in which a value can be written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Radix {
    Decimal,
    Hexadecimal,
    Binary,
}

impl Radix {
    pub const ALL: [Radix; 3] = [Radix::Decimal, Radix::Hexadecimal, Radix::Binary];

    /// The numeric base, e.g. 16 for `Hexadecimal`.
    pub const fn base(&self) -> u32 {
        match self {
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
            Radix::Binary => 2,
        }
    }

    /// The single-letter format code ("D", "X" or "B").
    pub const fn code(&self) -> char {
        match self {
            Radix::Decimal => 'D',
            Radix::Hexadecimal => 'X',
            Radix::Binary => 'B',
        }
    }

    /// Number of characters needed to write every value of `width`
    /// bits at a fixed width.  Decimal output is never padded, so
    /// there is no such number for it.
    pub const fn fixed_digits(&self, width: u32) -> Option<usize> {
        match self {
            Radix::Decimal => None,
            Radix::Hexadecimal => Some(width.div_ceil(4) as usize),
            Radix::Binary => Some(width as usize),
        }
    }
}

impl Display for Radix {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            Radix::Decimal => "decimal",
            Radix::Hexadecimal => "hexadecimal",
            Radix::Binary => "binary",
        })
    }
}

impl FromStr for Radix {
    type Err = Error;

    fn from_str(s: &str) -> Result<Radix, Error> {
        match s.to_ascii_lowercase().as_str() {
            "d" | "dec" | "decimal" | "10" => Ok(Radix::Decimal),
            "x" | "hex" | "hexadecimal" | "16" => Ok(Radix::Hexadecimal),
            "b" | "bin" | "binary" | "2" => Ok(Radix::Binary),
            _ => Err(Error::UnknownRadix(s.to_string())),
        }
    }
}

impl TryFrom<u32> for Radix {
    type Error = Error;

    fn try_from(base: u32) -> Result<Radix, Error> {
        Radix::ALL
            .into_iter()
            .find(|radix| radix.base() == base)
            .ok_or_else(|| Error::UnknownRadix(base.to_string()))
    }
}

const HEX_DIGITS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
];

/// The binary expansion of each hex digit, indexed by digit value.
const NIBBLES: [&str; 16] = [
    "0000", "0001", "0010", "0011", "0100", "0101", "0110", "0111", "1000", "1001", "1010",
    "1011", "1100", "1101", "1110", "1111",
];

/// Writes `n` in decimal or hexadecimal (not binary) with no
/// leading zeros.  Zero is written as "0".
fn digits(mut n: u64, radix: Radix) -> String {
    let base = u64::from(radix.base());
    if n == 0 {
        return "0".to_string();
    }
    let mut reversed: Vec<char> = Vec::with_capacity(20);
    while n != 0 {
        // The remainder is always < 16, so the index is in range.
        reversed.push(HEX_DIGITS[(n % base) as usize]);
        n /= base;
    }
    reversed.iter().rev().collect()
}

/// Decimal digits of `n`, unpadded.
pub(crate) fn to_decimal(n: u64) -> String {
    digits(n, Radix::Decimal)
}

/// Uppercase hexadecimal digits of `n`, unpadded.
pub(crate) fn to_hex(n: u64) -> String {
    digits(n, Radix::Hexadecimal)
}

/// Binary digits of `n`, produced by expanding each hex digit into a
/// nibble.  The result is a multiple of four characters long.
pub(crate) fn to_binary(n: u64) -> String {
    to_hex(n)
        .chars()
        .filter_map(|ch| ch.to_digit(16))
        .map(|d| NIBBLES[d as usize])
        .collect()
}

/// Returns exactly `len` characters: `digits` padded on the left with
/// zeros, or with surplus leading characters removed.  Callers only
/// remove characters they know to be zero.
pub(crate) fn fit_to(digits: &str, len: usize) -> String {
    if digits.len() >= len {
        digits[digits.len() - len..].to_string()
    } else {
        let mut result = "0".repeat(len - digits.len());
        result.push_str(digits);
        result
    }
}

/// Value of a single hexadecimal digit, in either case.
fn hex_digit_value(ch: char) -> Result<u64, Error> {
    match ch {
        '0'..='9' => Ok(u64::from(ch) - u64::from('0')),
        'a'..='f' => Ok(u64::from(ch) - u64::from('a') + 10),
        'A'..='F' => Ok(u64::from(ch) - u64::from('A') + 10),
        _ => Err(Error::InvalidHexDigit(ch)),
    }
}

/// Converts hexadecimal text to its value.  Each digit contributes
/// its value times the power of 16 given by its position from the
/// right; this is accumulated most-significant digit first.  Letters
/// may be in either case.
pub fn hex_to_dec(text: &str) -> Result<u64, Error> {
    if text.is_empty() {
        return Err(Error::EmptyText);
    }
    let mut total: u64 = 0;
    for ch in text.chars() {
        let digit = hex_digit_value(ch).inspect_err(|e| {
            event!(Level::DEBUG, "rejecting hex text {text:?}: {e}");
        })?;
        total = total
            .checked_mul(16)
            .and_then(|t| t.checked_add(digit))
            .ok_or_else(|| Error::TooLarge(text.to_string()))?;
    }
    Ok(total)
}

/// Converts decimal text to its value.
pub fn parse_decimal(text: &str) -> Result<u64, Error> {
    if text.is_empty() {
        return Err(Error::EmptyText);
    }
    match text.parse::<u64>() {
        Ok(n) => Ok(n),
        Err(_) if text.bytes().all(|b| b.is_ascii_digit()) => {
            Err(Error::TooLarge(text.to_string()))
        }
        Err(e) => {
            event!(Level::DEBUG, "rejecting decimal text {text:?}: {e}");
            Err(Error::InvalidDecimal(text.to_string()))
        }
    }
}

/// Converts binary text to its value.
pub fn parse_binary(text: &str) -> Result<u64, Error> {
    if text.is_empty() {
        return Err(Error::EmptyText);
    }
    let mut total: u64 = 0;
    for ch in text.chars() {
        let bit: u64 = match ch {
            '0' => 0,
            '1' => 1,
            _ => {
                event!(Level::DEBUG, "rejecting binary text {text:?}");
                return Err(Error::InvalidBinaryDigit(ch));
            }
        };
        total = total
            .checked_mul(2)
            .map(|t| t | bit)
            .ok_or_else(|| Error::TooLarge(text.to_string()))?;
    }
    Ok(total)
}

/// Converts text in the given radix to its value.
pub fn parse(text: &str, radix: Radix) -> Result<u64, Error> {
    match radix {
        Radix::Decimal => parse_decimal(text),
        Radix::Hexadecimal => hex_to_dec(text),
        Radix::Binary => parse_binary(text),
    }
}
