//! Alphabets, the positional integer codec over them, and the share string format.
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::{Point, Result, SssError};

/// Separates the x and y halves of a share string.
pub const SHARE_DELIMITER: char = '-';

pub const HEX_CHARS: &str = "0123456789abcdef";

/// Digits, ASCII letters, ASCII punctuation, then whitespace.
pub const PRINTABLE_CHARS: &str = concat!(
    "0123456789",
    "abcdefghijklmnopqrstuvwxyz",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~",
    " \t\n\r\x0b\x0c",
);

pub const BASE58_CHARS: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

pub const BASE32_CHARS: &str = "abcdefghijklmnopqrstuvwxyz234567";

pub const ZBASE32_CHARS: &str = "ybndrfg8ejkmcpqxot1uwisza345h769";

/// An ordered set of unique symbols. A symbol's position is its digit value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Charset {
    symbols: Vec<char>,
    digits: HashMap<char, u32>,
}

impl Charset {
    pub fn new(symbols: &str) -> Result<Self> {
        let symbols: Vec<char> = symbols.chars().collect();
        if symbols.len() < 2 {
            return Err(SssError::CharsetTooSmall(symbols.len()));
        }

        let mut digits = HashMap::with_capacity(symbols.len());
        for (digit, &symbol) in (0u32..).zip(symbols.iter()) {
            if digits.insert(symbol, digit).is_some() {
                return Err(SssError::DuplicateSymbol(symbol));
            }
        }

        Ok(Charset { symbols, digits })
    }

    /// Number of symbols, i.e. the numeral base.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.digits.contains_key(&symbol)
    }

    pub fn digit_of(&self, symbol: char) -> Option<u32> {
        self.digits.get(&symbol).copied()
    }

    fn base(&self) -> BigUint {
        BigUint::from(self.symbols.len())
    }

    fn symbol_of(&self, digit: &BigUint) -> char {
        // digit < base, so it fits in one u32 limb; zero has no limbs
        let index = digit.to_u32_digits().first().copied().unwrap_or(0) as usize;
        self.symbols[index]
    }
}

impl FromStr for Charset {
    type Err = SssError;

    fn from_str(s: &str) -> Result<Self> {
        Charset::new(s)
    }
}

impl TryFrom<String> for Charset {
    type Error = SssError;

    fn try_from(value: String) -> Result<Self> {
        Charset::new(&value)
    }
}

impl From<Charset> for String {
    fn from(charset: Charset) -> Self {
        charset.to_string()
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbols.iter().try_for_each(|symbol| write!(f, "{symbol}"))
    }
}

impl fmt::Debug for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Charset").field(&self.to_string()).finish()
    }
}

/// Writes `value` big-endian in base `charset.len()`. Zero is the first symbol.
pub fn int_to_charset(value: &BigUint, charset: &Charset) -> String {
    let base = charset.base();
    let mut symbols = Vec::new();
    let mut rest = value.clone();

    loop {
        let (quotient, digit) = rest.div_rem(&base);
        symbols.push(charset.symbol_of(&digit));
        rest = quotient;
        if rest.is_zero() {
            break;
        }
    }

    symbols.iter().rev().collect()
}

/// Reads `s` as a big-endian number in base `charset.len()`. The empty string is 0.
pub fn charset_to_int(s: &str, charset: &Charset) -> Result<BigUint> {
    let base = charset.base();
    s.chars().try_fold(BigUint::zero(), |acc, symbol| {
        let digit = charset
            .digit_of(symbol)
            .ok_or(SssError::SymbolNotInCharset(symbol))?;
        Ok(acc * &base + digit)
    })
}

/// Converts a point into a share string: `"<x>-<y>"` with both halves written in
/// `charset`.
pub fn point_to_share_string(point: &Point, charset: &Charset) -> Result<String> {
    if charset.contains(SHARE_DELIMITER) {
        return Err(SssError::DelimiterInCharset);
    }

    let x_string = int_to_charset(&point.x, charset);
    let y_string = int_to_charset(&point.y, charset);
    Ok(format!("{x_string}{SHARE_DELIMITER}{y_string}"))
}

/// Parses a `"<x>-<y>"` share string back into a point.
pub fn share_string_to_point(share_string: &str, charset: &Charset) -> Result<Point> {
    if charset.contains(SHARE_DELIMITER) {
        return Err(SssError::DelimiterInCharset);
    }

    let (x_string, y_string) = match share_string.split_once(SHARE_DELIMITER) {
        Some((x, y)) if !y.contains(SHARE_DELIMITER) => (x, y),
        _ => {
            let found = share_string.matches(SHARE_DELIMITER).count();
            return Err(SssError::MalformedShare(format!(
                "expected exactly one \"{SHARE_DELIMITER}\", found {found}"
            )));
        }
    };

    Ok(Point {
        x: charset_to_int(x_string, charset)?,
        y: charset_to_int(y_string, charset)?,
    })
}
