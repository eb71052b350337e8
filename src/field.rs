//! Arithmetic in the prime field ℤ/pℤ.
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Extended Euclidean algorithm: returns `(g, x, y)` with `a·x + b·y = g`.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let quotient = old_r.div_floor(&r);

        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);

        let next_t = &old_t - &quotient * &t;
        old_t = std::mem::replace(&mut t, next_t);
    }

    (old_r, old_s, old_t)
}

/// Calculates `k⁻¹ mod p` for any (possibly negative) `k`.
///
/// `k` is reduced into `[0, p)` first. The result is only meaningful when
/// `gcd(k, p) = 1`, which holds for prime `p` and `k ≢ 0`. There is no check:
/// `k ≡ 0` yields 0.
pub fn mod_inverse(k: &BigInt, prime: &BigUint) -> BigUint {
    let p = BigInt::from_biguint(Sign::Plus, prime.clone());
    let k = k.mod_floor(&p);
    let (_, _, inverse) = extended_gcd(&p, &k);
    to_field(&inverse, prime)
}

/// Evaluates `Σ coefficients[i]·xⁱ mod p`.
pub fn evaluate_polynomial(coefficients: &[BigUint], x: &BigUint, prime: &BigUint) -> BigUint {
    let mut result = BigUint::zero();
    let mut x_power = BigUint::one();

    for coeff in coefficients {
        result = (result + coeff * &x_power) % prime;
        x_power = (x_power * x) % prime;
    }

    result
}

/// Reduces a signed value into `[0, p)`.
pub(crate) fn to_field(value: &BigInt, prime: &BigUint) -> BigUint {
    let p = BigInt::from_biguint(Sign::Plus, prime.clone());
    // mod_floor with a positive modulus never yields a negative value
    value.mod_floor(&p).magnitude().clone()
}
