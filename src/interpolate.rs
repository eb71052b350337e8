//! Recovering a polynomial's intercept from its points.
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use tracing::debug;

use crate::field::{mod_inverse, to_field};
use crate::primes::get_large_enough_prime;
use crate::{Point, Result, SssError};

/// Evaluates the polynomial through `points` at `x`, modulo `prime`:
///
/// ```text
/// f(x) = Σᵢ yᵢ · ∏(j≠i) (x - xⱼ) / (xᵢ - xⱼ)
/// ```
///
/// Points with a repeated x-coordinate make a denominator vanish; the result is
/// then wrong but no error is raised.
///
/// Panics if `prime` is zero.
pub fn modular_lagrange_interpolation(x: &BigInt, points: &[Point], prime: &BigUint) -> BigUint {
    let x_values: Vec<BigInt> = points.iter().map(|point| BigInt::from(point.x.clone())).collect();

    let mut f_x = BigUint::zero();
    for (i, point) in points.iter().enumerate() {
        let mut numerator = BigInt::one();
        let mut denominator = BigInt::one();
        for (j, x_j) in x_values.iter().enumerate() {
            if i == j {
                continue;
            }
            numerator = BigInt::from(to_field(&(numerator * (x - x_j)), prime));
            denominator = BigInt::from(to_field(&(denominator * (&x_values[i] - x_j)), prime));
        }

        let basis = to_field(&numerator, prime) * mod_inverse(&denominator, prime);
        f_x = (prime + f_x + &point.y * basis) % prime;
    }

    f_x
}

/// Recovers the secret integer: the intercept of the polynomial through `points`.
///
/// Without an explicit `prime` the field is inferred as the smallest standard prime
/// above every y-value. That only reproduces the split-time prime when the
/// shares were made with a standard prime and one of the y-values is large enough;
/// otherwise, as with too few points, the result is silently wrong.
pub fn points_to_secret_int(points: &[Point], prime: Option<&BigUint>) -> Result<BigUint> {
    if points.is_empty() {
        return Err(SssError::NoPoints);
    }

    let prime = match prime {
        Some(p) if *p < BigUint::from(2u32) => return Err(SssError::InvalidPrime(p.clone())),
        Some(p) => p,
        None => get_large_enough_prime(points.iter().map(|point| &point.y))
            .ok_or(SssError::SecretTooLarge)?,
    };
    debug!(points = points.len(), prime_bits = prime.bits(), "recovering secret");

    Ok(modular_lagrange_interpolation(&BigInt::zero(), points, prime))
}
