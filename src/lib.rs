//! Implementation of Shamir's (t,n) threshold secret sharing over prime fields.
//!
//! A secret string is read as a big integer in the base of its alphabet, split into
//! n points on a random polynomial of degree t-1 whose intercept is the secret, and
//! each point is written back out as a `"<x>-<y>"` share string. Any t shares
//! recover the secret by Lagrange interpolation at the origin.
//!
//! Recovery is deliberately permissive: fewer than t shares, or duplicated shares,
//! produce a wrong secret rather than an error.
//!
//! # Example
//! ```
//! use shamir_charset::Preset;
//!
//! let sharer = Preset::PlaintextToHex.sharer();
//! let shares = sharer.split_secret("correct horse", 3, 5).unwrap();
//! let recovered = sharer.recover_secret(&shares[1..4]).unwrap();
//! assert_eq!(recovered, "correct horse");
//! ```

use num_bigint::BigUint;
use thiserror::Error;

pub mod charset;
pub mod field;
pub mod interpolate;
pub mod polynomial;
pub mod primes;
pub mod sharer;

pub use charset::{
    charset_to_int, int_to_charset, point_to_share_string, share_string_to_point, Charset,
    BASE32_CHARS, BASE58_CHARS, HEX_CHARS, PRINTABLE_CHARS, SHARE_DELIMITER, ZBASE32_CHARS,
};
pub use interpolate::{modular_lagrange_interpolation, points_to_secret_int};
pub use polynomial::{get_polynomial_points, random_polynomial, secret_int_to_points};
pub use primes::{get_large_enough_prime, standard_primes};
pub use sharer::{Preset, SecretSharer};

/// These are errors that can occur during secret sharing operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SssError {
    #[error("threshold must be in this range: 2 ≤ t ≤ n (got t = {threshold}, n = {share_count})")]
    InvalidThreshold {
        /// Requested number of shares needed to reconstruct (t)
        threshold: usize,
        /// Requested number of shares to generate (n)
        share_count: usize,
    },

    #[error("the character \"-\" cannot be in the share charset")]
    DelimiterInCharset,

    #[error("charset must contain at least two symbols (got {0})")]
    CharsetTooSmall(usize),

    #[error("charset contains the symbol {0:?} more than once")]
    DuplicateSymbol(char),

    #[error("symbol {0:?} is not in the charset")]
    SymbolNotInCharset(char),

    #[error("share format is invalid: {0}")]
    MalformedShare(String),

    #[error("at least one point is needed to recover a secret")]
    NoPoints,

    #[error("field modulus must be at least 2 (got {0})")]
    InvalidPrime(BigUint),

    /// No tabulated prime exceeds the secret (or the share count)
    #[error("secret too large for share calculation")]
    SecretTooLarge,
}

impl SssError {
    /// Malformed input: bad parameters, alphabets or share strings.
    pub fn is_validation(&self) -> bool {
        !self.is_capacity()
    }

    /// The built-in prime table cannot hold the values involved.
    pub fn is_capacity(&self) -> bool {
        matches!(self, SssError::SecretTooLarge)
    }
}

pub type Result<T> = std::result::Result<T, SssError>;

/// A single share of a split secret, representing a point on the polynomial
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    /// The x-coordinate of the polynomial point (sample index, 1..=n)
    pub x: BigUint,
    /// The y-coordinate of the polynomial point (value mod p)
    pub y: BigUint,
}

impl Point {
    pub fn new(x: impl Into<BigUint>, y: impl Into<BigUint>) -> Self {
        Point {
            x: x.into(),
            y: y.into(),
        }
    }
}

impl From<(u32, BigUint)> for Point {
    fn from((x, y): (u32, BigUint)) -> Self {
        Point::new(x, y)
    }
}
