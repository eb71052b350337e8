//! Splitting a secret integer into points on a random polynomial.
use num_bigint::{BigUint, RandBigInt};
use rand::{CryptoRng, RngCore};
use tracing::debug;

use crate::field::evaluate_polynomial;
use crate::primes::get_large_enough_prime;
use crate::{Point, Result, SssError};

/// Creates a random polynomial of the given degree where:
/// - a₀ is the intercept
/// - a₁ through a_degree are uniform in `[0, upper_bound)`
///
/// Coefficients come from the thread-local CSPRNG.
pub fn random_polynomial(degree: usize, intercept: &BigUint, upper_bound: &BigUint) -> Vec<BigUint> {
    random_polynomial_with_rng(degree, intercept, upper_bound, &mut rand::thread_rng())
}

/// Same as [`random_polynomial`], drawing coefficients from `rng`.
///
/// Panics if `upper_bound` is zero.
pub fn random_polynomial_with_rng<R>(
    degree: usize,
    intercept: &BigUint,
    upper_bound: &BigUint,
    rng: &mut R,
) -> Vec<BigUint>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut coefficients = Vec::with_capacity(degree + 1);
    coefficients.push(intercept.clone());
    coefficients.extend((0..degree).map(|_| rng.gen_biguint_below(upper_bound)));
    coefficients
}

/// Calculates the first n polynomial points:
/// `[(1, f(1)), (2, f(2)), ... (n, f(n))]`
pub fn get_polynomial_points(coefficients: &[BigUint], num_points: usize, prime: &BigUint) -> Vec<Point> {
    (1..=num_points)
        .map(|x| {
            let x = BigUint::from(x);
            let y = evaluate_polynomial(coefficients, &x, prime);
            Point { x, y }
        })
        .collect()
}

/// Splits a secret integer into `num_points` points, any `threshold` of which
/// determine it.
///
/// Without an explicit `prime` the field is the smallest standard prime above
/// both the secret and `num_points`. An explicit prime must be at least 2 and
/// exceed both.
pub fn secret_int_to_points(
    secret_int: &BigUint,
    threshold: usize,
    num_points: usize,
    prime: Option<&BigUint>,
) -> Result<Vec<Point>> {
    secret_int_to_points_with_rng(secret_int, threshold, num_points, prime, &mut rand::thread_rng())
}

/// Same as [`secret_int_to_points`], drawing coefficients from `rng`.
pub fn secret_int_to_points_with_rng<R>(
    secret_int: &BigUint,
    threshold: usize,
    num_points: usize,
    prime: Option<&BigUint>,
    rng: &mut R,
) -> Result<Vec<Point>>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if threshold < 2 || threshold > num_points {
        return Err(SssError::InvalidThreshold {
            threshold,
            share_count: num_points,
        });
    }

    let share_count = BigUint::from(num_points);
    let prime = match prime {
        Some(p) if *p < BigUint::from(2u32) => return Err(SssError::InvalidPrime(p.clone())),
        Some(p) if secret_int < p && &share_count < p => p,
        Some(_) => return Err(SssError::SecretTooLarge),
        None => get_large_enough_prime([secret_int, &share_count])
            .ok_or(SssError::SecretTooLarge)?,
    };
    debug!(threshold, num_points, prime_bits = prime.bits(), "splitting secret");

    let coefficients = random_polynomial_with_rng(threshold - 1, secret_int, prime, rng);
    Ok(get_polynomial_points(&coefficients, num_points, prime))
}
