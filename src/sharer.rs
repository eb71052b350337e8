//! Secret sharers: a secret alphabet and a share alphabet composed with the field
//! machinery into `split_secret` / `recover_secret`.
use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::debug;

use crate::charset::{
    charset_to_int, int_to_charset, point_to_share_string, share_string_to_point, Charset,
    BASE32_CHARS, BASE58_CHARS, HEX_CHARS, PRINTABLE_CHARS, SHARE_DELIMITER, ZBASE32_CHARS,
};
use crate::interpolate::points_to_secret_int;
use crate::polynomial::secret_int_to_points_with_rng;
use crate::{Point, Result, SssError};

/// Converts secret strings to share strings and back.
///
/// Secrets are read in `secret_charset`, shares are written in `share_charset`.
/// The field prime is taken from the standard table unless one is set with
/// [`SecretSharer::with_prime`].
///
/// Serializes as `{ "secret_charset": .., "share_charset": .., "prime": .. }`;
/// deserializing applies the same checks as [`SecretSharer::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SharerConfig", into = "SharerConfig")]
pub struct SecretSharer {
    secret_charset: Charset,
    share_charset: Charset,
    prime: Option<BigUint>,
}

impl SecretSharer {
    /// Fails if `share_charset` contains the share delimiter.
    pub fn new(secret_charset: Charset, share_charset: Charset) -> Result<Self> {
        if share_charset.contains(SHARE_DELIMITER) {
            return Err(SssError::DelimiterInCharset);
        }

        Ok(SecretSharer {
            secret_charset,
            share_charset,
            prime: None,
        })
    }

    pub fn from_symbols(secret_symbols: &str, share_symbols: &str) -> Result<Self> {
        SecretSharer::new(Charset::new(secret_symbols)?, Charset::new(share_symbols)?)
    }

    /// Uses `prime` as the field modulus for both splitting and recovering.
    pub fn with_prime(mut self, prime: BigUint) -> Self {
        self.prime = Some(prime);
        self
    }

    pub fn secret_charset(&self) -> &Charset {
        &self.secret_charset
    }

    pub fn share_charset(&self) -> &Charset {
        &self.share_charset
    }

    pub fn prime(&self) -> Option<&BigUint> {
        self.prime.as_ref()
    }

    /// Splits `secret` into `num_shares` share strings, any `threshold` of which
    /// recover it.
    pub fn split_secret(&self, secret: &str, threshold: usize, num_shares: usize) -> Result<Vec<String>> {
        self.split_secret_with_rng(secret, threshold, num_shares, &mut rand::thread_rng())
    }

    /// Same as [`SecretSharer::split_secret`], drawing coefficients from `rng`.
    pub fn split_secret_with_rng<R>(
        &self,
        secret: &str,
        threshold: usize,
        num_shares: usize,
        rng: &mut R,
    ) -> Result<Vec<String>>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let secret_int = charset_to_int(secret, &self.secret_charset)?;
        let points =
            secret_int_to_points_with_rng(&secret_int, threshold, num_shares, self.prime(), rng)?;

        points
            .iter()
            .map(|point| point_to_share_string(point, &self.share_charset))
            .collect()
    }

    /// Recovers the secret from share strings.
    ///
    /// Any number of shares is accepted. Fewer than the split threshold, or
    /// shares from different splits, recover a wrong secret without an error.
    pub fn recover_secret<S: AsRef<str>>(&self, shares: &[S]) -> Result<String> {
        let points = shares
            .iter()
            .map(|share| share_string_to_point(share.as_ref(), &self.share_charset))
            .collect::<Result<Vec<Point>>>()?;
        debug!(shares = points.len(), "decoded shares");

        let secret_int = points_to_secret_int(&points, self.prime())?;
        Ok(int_to_charset(&secret_int, &self.secret_charset))
    }
}

#[derive(Serialize, Deserialize)]
struct SharerConfig {
    secret_charset: Charset,
    share_charset: Charset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prime: Option<BigUint>,
}

impl TryFrom<SharerConfig> for SecretSharer {
    type Error = SssError;

    fn try_from(config: SharerConfig) -> Result<Self> {
        let sharer = SecretSharer::new(config.secret_charset, config.share_charset)?;
        match config.prime {
            Some(p) if p < BigUint::from(2u32) => Err(SssError::InvalidPrime(p)),
            Some(p) => Ok(sharer.with_prime(p)),
            None => Ok(sharer),
        }
    }
}

impl From<SecretSharer> for SharerConfig {
    fn from(sharer: SecretSharer) -> Self {
        SharerConfig {
            secret_charset: sharer.secret_charset,
            share_charset: sharer.share_charset,
            prime: sharer.prime,
        }
    }
}

impl Default for SecretSharer {
    fn default() -> Self {
        Preset::default().sharer()
    }
}

/// The named alphabet pairings.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Hex secrets to hex shares.
    #[default]
    HexToHex,
    /// Printable text secrets to hex shares.
    PlaintextToHex,
    /// Base58 secrets (e.g. Bitcoin private keys) to base58 shares, which print
    /// unambiguously in any font.
    #[strum(serialize = "bitcoin-to-b58")]
    #[serde(rename = "bitcoin-to-b58")]
    BitcoinToB58,
    /// Base58 secrets to base32 shares, which are easy to transcribe.
    #[strum(serialize = "bitcoin-to-b32")]
    #[serde(rename = "bitcoin-to-b32")]
    BitcoinToB32,
    /// Base58 secrets to z-base-32 shares, which are easy to transcribe.
    #[strum(serialize = "bitcoin-to-zb32")]
    #[serde(rename = "bitcoin-to-zb32")]
    BitcoinToZb32,
}

impl Preset {
    pub fn secret_symbols(self) -> &'static str {
        match self {
            Preset::HexToHex => HEX_CHARS,
            Preset::PlaintextToHex => PRINTABLE_CHARS,
            Preset::BitcoinToB58 | Preset::BitcoinToB32 | Preset::BitcoinToZb32 => BASE58_CHARS,
        }
    }

    pub fn share_symbols(self) -> &'static str {
        match self {
            Preset::HexToHex | Preset::PlaintextToHex => HEX_CHARS,
            Preset::BitcoinToB58 => BASE58_CHARS,
            Preset::BitcoinToB32 => BASE32_CHARS,
            Preset::BitcoinToZb32 => ZBASE32_CHARS,
        }
    }

    pub fn sharer(self) -> SecretSharer {
        SecretSharer::from_symbols(self.secret_symbols(), self.share_symbols())
            .expect("standard charsets are unique and free of the share delimiter")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_preset_round_trips() {
        let secrets = [
            (Preset::HexToHex, "c4bbcb1fbec99d65bf59d85c8cb62ee2db963f0fe106f483d9afa73bd4e39a8a"),
            (Preset::PlaintextToHex, "correct horse battery staple"),
            (Preset::BitcoinToB58, "5KJvsngHeMpm884wtkJNzQGaCErckhHJBGFsvd3VyK5qMZXj3hS"),
            (Preset::BitcoinToB32, "5KJvsngHeMpm884wtkJNzQGaCErckhHJBGFsvd3VyK5qMZXj3hS"),
            (Preset::BitcoinToZb32, "5KJvsngHeMpm884wtkJNzQGaCErckhHJBGFsvd3VyK5qMZXj3hS"),
        ];

        for (preset, secret) in secrets {
            let sharer = preset.sharer();
            let shares = sharer.split_secret(secret, 3, 5).unwrap();
            assert_eq!(shares.len(), 5);
            assert_eq!(sharer.recover_secret(&shares[2..5]).unwrap(), secret, "{preset}");
        }
    }

    #[test]
    fn test_shares_use_share_charset() {
        for preset in Preset::iter() {
            let sharer = preset.sharer();
            let secret = &preset.secret_symbols()[1..4];
            for share in sharer.split_secret(secret, 2, 4).unwrap() {
                let (x, y) = share.split_once('-').unwrap();
                assert!(x.chars().chain(y.chars()).all(|c| sharer.share_charset().contains(c)));
            }
        }
    }

    #[test]
    fn test_subset_invariance() {
        let sharer = Preset::PlaintextToHex.sharer();
        let shares = sharer.split_secret("hello", 3, 5).unwrap();

        let first = sharer.recover_secret(&[&shares[0], &shares[2], &shares[4]]).unwrap();
        let second = sharer.recover_secret(&[&shares[1], &shares[3], &shares[4]]).unwrap();
        assert_eq!(first, "hello");
        assert_eq!(first, second);
    }

    #[test]
    fn test_shuffled_shares() {
        let mut rng = rand::thread_rng();
        let sharer = Preset::HexToHex.sharer();
        let mut shares = sharer.split_secret("deadbeef", 4, 7).unwrap();

        shares.shuffle(&mut rng);

        assert_eq!(sharer.recover_secret(&shares[..4]).unwrap(), "deadbeef");
    }

    #[test]
    fn test_seeded_split_is_reproducible() {
        let sharer = Preset::HexToHex.sharer();
        let first = sharer
            .split_secret_with_rng("abc123", 3, 5, &mut ChaCha20Rng::seed_from_u64(42))
            .unwrap();
        let second = sharer
            .split_secret_with_rng("abc123", 3, 5, &mut ChaCha20Rng::seed_from_u64(42))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_delimiter_in_share_charset() {
        assert_eq!(
            SecretSharer::from_symbols(HEX_CHARS, "0123456789-"),
            Err(SssError::DelimiterInCharset)
        );

        // the printable secret alphabet contains the delimiter, which is fine
        assert!(Charset::new(PRINTABLE_CHARS).unwrap().contains('-'));
        let sharer = Preset::PlaintextToHex.sharer();
        let shares = sharer.split_secret("well-known", 2, 3).unwrap();
        assert_eq!(sharer.recover_secret(&shares[..2]).unwrap(), "well-known");
    }

    #[test]
    fn test_secret_outside_charset() {
        let sharer = Preset::HexToHex.sharer();
        assert_eq!(
            sharer.split_secret("not hex", 2, 3),
            Err(SssError::SymbolNotInCharset('n'))
        );
    }

    #[test]
    fn test_invalid_threshold() {
        let sharer = Preset::HexToHex.sharer();
        assert!(matches!(
            sharer.split_secret("ff", 1, 3),
            Err(SssError::InvalidThreshold { .. })
        ));
        assert!(matches!(
            sharer.split_secret("ff", 4, 3),
            Err(SssError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn test_explicit_prime() {
        let prime = BigUint::from(2u32).pow(89) - 1u32;
        let sharer = Preset::HexToHex.sharer().with_prime(prime.clone());
        assert_eq!(sharer.prime(), Some(&prime));

        let shares = sharer.split_secret("1234", 2, 3).unwrap();
        assert_eq!(sharer.recover_secret(&shares[1..]).unwrap(), "1234");
    }

    #[test]
    fn test_secrets_equal_to_table_primes() {
        let sharer = Preset::HexToHex.sharer();

        // 0x7f = 2^7 - 1 and 0x1fff = 2^13 - 1
        for secret in ["7f", "1fff"] {
            let shares = sharer.split_secret(secret, 2, 5).unwrap();
            assert_eq!(sharer.recover_secret(&shares).unwrap(), secret);
        }
    }

    #[test]
    fn test_share_count_equal_to_table_prime() {
        // the table picks 31 for n = 7; 7 itself would put x = 7 on x = 0
        let shares = Preset::HexToHex.sharer().split_secret("5", 2, 7).unwrap();
        assert_eq!(shares.len(), 7);

        let sharer = Preset::HexToHex.sharer().with_prime(BigUint::from(31u32));
        assert_eq!(sharer.recover_secret(&shares).unwrap(), "5");
        assert_eq!(sharer.recover_secret(&shares[5..]).unwrap(), "5");
    }

    #[test]
    fn test_degenerate_explicit_prime() {
        for p in [0u32, 1] {
            let sharer = Preset::PlaintextToHex.sharer().with_prime(BigUint::from(p));
            let expected = Err(SssError::InvalidPrime(BigUint::from(p)));
            assert_eq!(sharer.recover_secret(&["1-1", "2-2"]), expected);
            assert_eq!(sharer.split_secret("abc", 2, 3).map(|_| String::new()), expected);
        }
    }

    #[test]
    fn test_sharer_serde_round_trip() {
        let sharer = Preset::BitcoinToZb32.sharer();
        let json = serde_json::to_string(&sharer).unwrap();
        assert!(!json.contains("prime"));
        assert_eq!(serde_json::from_str::<SecretSharer>(&json).unwrap(), sharer);

        let with_prime = sharer.with_prime(BigUint::from(8191u32));
        let json = serde_json::to_string(&with_prime).unwrap();
        let restored: SecretSharer = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.prime(), Some(&BigUint::from(8191u32)));
        assert_eq!(restored, with_prime);
    }

    #[test]
    fn test_sharer_deserialize_validates() {
        let delimiter = r#"{"secret_charset":"0123456789abcdef","share_charset":"01-"}"#;
        assert!(serde_json::from_str::<SecretSharer>(delimiter).is_err());

        let duplicate = r#"{"secret_charset":"0123456789abcdef","share_charset":"0011"}"#;
        assert!(serde_json::from_str::<SecretSharer>(duplicate).is_err());

        let zero_prime = r#"{"secret_charset":"01","share_charset":"ab","prime":[]}"#;
        assert!(serde_json::from_str::<SecretSharer>(zero_prime).is_err());

        let plain = r#"{"secret_charset":"0123456789abcdef","share_charset":"0123456789abcdef"}"#;
        assert_eq!(
            serde_json::from_str::<SecretSharer>(plain).unwrap(),
            Preset::HexToHex.sharer()
        );
    }

    #[test]
    fn test_preset_serde_names() {
        for preset in Preset::iter() {
            let json = serde_json::to_string(&preset).unwrap();
            assert_eq!(json, format!("\"{preset}\""));
            assert_eq!(serde_json::from_str::<Preset>(&json).unwrap(), preset);
        }
        assert!(serde_json::from_str::<Preset>("\"hex\"").is_err());
    }

    #[test]
    fn test_recover_nothing() {
        let sharer = SecretSharer::default();
        let no_shares: [&str; 0] = [];
        assert_eq!(sharer.recover_secret(&no_shares), Err(SssError::NoPoints));
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(Preset::PlaintextToHex.to_string(), "plaintext-to-hex");
        assert_eq!("bitcoin-to-zb32".parse::<Preset>().unwrap(), Preset::BitcoinToZb32);
        assert_eq!(Preset::iter().count(), 5);
        assert_eq!(Preset::default(), Preset::HexToHex);
    }
}
