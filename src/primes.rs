//! The fixed table of field moduli used when no prime is supplied.
use num_bigint::BigUint;
use num_traits::One;
use once_cell::sync::Lazy;
use tracing::trace;

/// Exponents k for which 2^k - 1 is prime, up to 1279 bits.
const MERSENNE_PRIME_EXPONENTS: [u32; 15] =
    [2, 3, 5, 7, 13, 17, 19, 31, 61, 89, 107, 127, 521, 607, 1279];

/// (k, c) such that 2^k + c is the smallest prime with k + 1 bits.
const SMALLEST_PRIMES_ABOVE_POWER_OF_TWO: [(u32, u32); 3] = [(256, 297), (320, 27), (384, 231)];

static STANDARD_PRIMES: Lazy<Vec<BigUint>> = Lazy::new(|| {
    let mersenne = MERSENNE_PRIME_EXPONENTS
        .iter()
        .map(|&exp| (BigUint::one() << exp) - 1u32);
    let fixed_form = SMALLEST_PRIMES_ABOVE_POWER_OF_TWO
        .iter()
        .map(|&(exp, offset)| (BigUint::one() << exp) + offset);

    let mut primes: Vec<BigUint> = mersenne.chain(fixed_form).collect();
    primes.sort();
    primes
});

/// The registry's primes in ascending order.
pub fn standard_primes() -> &'static [BigUint] {
    &STANDARD_PRIMES
}

/// Returns the smallest tabulated prime strictly greater than every number in
/// `batch`, or `None` when the batch holds a value of 2^1279 - 1 or more.
/// An empty batch is satisfied by the smallest prime.
///
/// A value equal to the modulus would reduce to 0 in the field, so equality is
/// not enough.
pub fn get_large_enough_prime<'a, I>(batch: I) -> Option<&'static BigUint>
where
    I: IntoIterator<Item = &'a BigUint>,
{
    let largest = batch.into_iter().max();
    let prime = standard_primes()
        .iter()
        .find(|&prime| largest.map_or(true, |value| value < prime));
    match (prime, largest) {
        (Some(p), _) => trace!(bits = p.bits(), "selected standard prime"),
        (None, Some(value)) => trace!(bits = value.bits(), "no standard prime is large enough"),
        (None, None) => {}
    }
    prime
}
