use crate::error::PhcGenError;
use crate::lexer::TokenizedHash;

use argon2::{Algorithm, Argon2, Params, Version};
use base64::engine::general_purpose::STANDARD_NO_PAD as b64_stdnopad;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use std::str::FromStr;

/// The Argon2 version rendered into every PHC string this crate produces
/// (0x13, printed as the decimal 19).
const VERSION: u32 = Version::V0x13 as u32;

/// A builder holding the parameters for an Argon2id derivation.
///
/// The builder is an explicit configuration value: the caller constructs it,
/// optionally adjusts parameters, and passes it to [`hash()`](Self::hash).
/// There is no global or implicit configuration state anywhere in the crate.
///
/// The defaults are as follows:
///
/// * Memory Cost: 19456 kibibytes (equal to 19 mebibytes)
/// * Iterations: 2
/// * Parallelism: 1 thread
/// * Hash Length: 32 bytes
/// * Salt Length: 16 bytes (when no custom salt is supplied)
///
/// These match the OWASP-recommended minimum Argon2id configuration. Raise
/// the memory cost as high as your application can afford before raising the
/// iteration count.
#[derive(Clone, Debug)]
pub struct Hasher<'a> {
    custom_salt: Option<&'a [u8]>,
    salt_len: u32,
    hash_len: u32,
    iterations: u32,
    mem_cost_kib: u32,
    threads: u32,
}

impl Default for Hasher<'_> {
    fn default() -> Self {
        Self {
            custom_salt: None,
            salt_len: 16,
            hash_len: 32,
            iterations: 2,
            mem_cost_kib: 19456,
            threads: 1,
        }
    }
}

impl<'a> Hasher<'a> {
    /// Create a new `Hasher` with the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// When left unspecified, a salt is generated using a
    /// cryptographically-secure random number generator. Only supply a salt
    /// manually when a hash must be reproduced deterministically; a reused
    /// salt weakens the hash.
    pub fn custom_salt<SLT>(mut self, salt: &'a SLT) -> Self
    where
        SLT: AsRef<[u8]> + ?Sized,
    {
        self.custom_salt = Some(salt.as_ref());
        self
    }

    /// The length, in bytes, of the randomly generated salt. Ignored when a
    /// custom salt is supplied; the custom salt's own length wins.
    pub fn salt_length(mut self, salt_len: u32) -> Self {
        self.salt_len = salt_len;
        self
    }

    /// The length of the derived key, in bytes. The PHC string will be longer
    /// than this; it carries the parameters and the salt alongside the
    /// base64-encoded key.
    pub fn hash_length(mut self, hash_len: u32) -> Self {
        self.hash_len = hash_len;
        self
    }

    /// The number of passes over memory (the `t` parameter).
    pub fn iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// The amount of memory, in kibibytes, the derivation must allocate (the
    /// `m` parameter). This is where the resistance to hardware-accelerated
    /// cracking comes from; set it as high as you can afford.
    pub fn memory_cost_kib(mut self, cost: u32) -> Self {
        self.mem_cost_kib = cost;
        self
    }

    /// The number of parallel lanes (the `p` parameter). The memory cost must
    /// be at least eight times this value.
    pub fn threads(mut self, threads: u32) -> Self {
        self.threads = threads;
        self
    }

    /// Consumes the `Hasher` and derives a key from `password`.
    ///
    /// The derivation is RFC 9106 Argon2id, version 0x13, performed by the
    /// RustCrypto `argon2` crate. Parameter validation belongs to that crate;
    /// out-of-range values (a salt below the minimum length, a memory cost
    /// too small for the parallelism) surface as
    /// [`PhcGenError::Derivation`].
    ///
    /// This is an expensive, memory-hard operation by design.
    pub fn hash<P>(self, password: &P) -> Result<Hash, PhcGenError>
    where
        P: AsRef<[u8]> + ?Sized,
    {
        let hash_len = match usize::try_from(self.hash_len) {
            Ok(l) => l,
            Err(_) => return Err(PhcGenError::InvalidParameter("hash length is too big")),
        };

        let generated_salt;
        let salt: &[u8] = if let Some(s) = self.custom_salt {
            s
        } else {
            let salt_len = match usize::try_from(self.salt_len) {
                Ok(l) => l,
                Err(_) => return Err(PhcGenError::InvalidParameter("salt length is too big")),
            };

            let mut buf = vec![0u8; salt_len];
            OsRng.try_fill_bytes(&mut buf)?;

            generated_salt = buf;
            &generated_salt
        };

        let params = Params::new(
            self.mem_cost_kib,
            self.iterations,
            self.threads,
            Some(hash_len),
        )?;

        let mut key = vec![0u8; hash_len];
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params).hash_password_into(
            password.as_ref(),
            salt,
            &mut key,
        )?;

        Ok(Hash {
            mem_cost_kib: self.mem_cost_kib,
            iterations: self.iterations,
            threads: self.threads,
            salt: Vec::from(salt),
            hash: key,
        })
    }
}

/// A derived Argon2id key together with the salt and parameters that
/// produced it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hash {
    mem_cost_kib: u32,
    iterations: u32,
    threads: u32,
    salt: Vec<u8>,
    hash: Vec<u8>,
}

impl fmt::Display for Hash {
    /// Renders the PHC string. Both the salt and the key are the raw bytes
    /// encoded as unpadded standard base64; the version is always 19.
    ///
    /// A PHC string looks something like this:
    ///
    /// _$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$GsorJgzkom9CX+5gltbpDyUKhzfT5cKw2Z+cQfhmTZ8_
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "$argon2id$v={}$m={},t={},p={}${}${}",
            VERSION,
            self.mem_cost_kib,
            self.iterations,
            self.threads,
            b64_stdnopad.encode(&self.salt),
            b64_stdnopad.encode(&self.hash),
        )
    }
}

impl FromStr for Hash {
    type Err = PhcGenError;

    /// Splits a PHC string back into its parts (the key, the salt, the
    /// parameters). Only argon2id strings with version 19 are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokenized = TokenizedHash::from_str(s)?;

        if tokenized.version != VERSION {
            return Err(PhcGenError::InvalidHash("hash version is unsupported"));
        }

        let salt = b64_stdnopad
            .decode(tokenized.b64_salt)
            .map_err(|_| PhcGenError::InvalidHash("invalid character in base64-encoded salt"))?;

        let hash = b64_stdnopad
            .decode(tokenized.b64_hash)
            .map_err(|_| PhcGenError::InvalidHash("invalid character in base64-encoded hash"))?;

        Ok(Self {
            mem_cost_kib: tokenized.mem_cost_kib,
            iterations: tokenized.iterations,
            threads: tokenized.threads,
            salt,
            hash,
        })
    }
}

impl Hash {
    /// Returns the derived key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.hash
    }

    /// Returns the salt bytes the key was derived with.
    pub fn salt_bytes(&self) -> &[u8] {
        &self.salt
    }

    /// The memory cost, in kibibytes, the key was derived with.
    pub fn memory_cost_kib(&self) -> u32 {
        self.mem_cost_kib
    }

    /// The number of passes the key was derived with.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// The number of parallel lanes the key was derived with.
    pub fn threads(&self) -> u32 {
        self.threads
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_hash_into_phc_string() {
        let hash = Hash {
            mem_cost_kib: 128,
            iterations: 3,
            threads: 2,
            salt: vec![1, 2, 3, 4, 5, 6, 7, 8],
            hash: b64_stdnopad
                .decode("ypJ3pKxN4aWGkwMv0TOb08OIzwrfK1SZWy64vyTLKo8")
                .unwrap(),
        };

        assert_eq!(
            hash.to_string(),
            "$argon2id$v=19$m=128,t=3,p=2$AQIDBAUGBwg$ypJ3pKxN4aWGkwMv0TOb08OIzwrfK1SZWy64vyTLKo8"
        );
    }

    #[test]
    fn test_hash_from_str() {
        let hash = Hash::from_str(
            "$argon2id$v=19$m=128,t=3,p=2$AQIDBAUGBwg$7OU7S/azjYpnXXySR52cFWeisxk1VVjNeXqtQ8ZM/Oc",
        )
        .unwrap();

        assert_eq!(hash.mem_cost_kib, 128);
        assert_eq!(hash.iterations, 3);
        assert_eq!(hash.threads, 2);
        assert_eq!(hash.salt, b64_stdnopad.decode("AQIDBAUGBwg").unwrap());
        assert_eq!(
            hash.hash,
            b64_stdnopad
                .decode("7OU7S/azjYpnXXySR52cFWeisxk1VVjNeXqtQ8ZM/Oc")
                .unwrap()
        );
    }

    #[test]
    fn test_hash_from_str_rejects_wrong_version() {
        let hash = Hash::from_str(
            "$argon2id$v=18$m=128,t=3,p=2$AQIDBAUGBwg$7OU7S/azjYpnXXySR52cFWeisxk1VVjNeXqtQ8ZM/Oc",
        );

        assert!(hash.is_err());
    }

    #[test]
    fn test_hash_from_str_rejects_padded_base64() {
        let hash = Hash::from_str("$argon2id$v=19$m=128,t=3,p=2$AQIDBAUGBwg=$7OU7S/azjYpnXXyc");

        assert!(hash.is_err());
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let phc_strings: Vec<String> = (0..2)
            .map(|_| {
                Hasher::new()
                    .memory_cost_kib(64)
                    .iterations(2)
                    .threads(1)
                    .hash_length(32)
                    .custom_salt(b"saltsalt")
                    .hash(b"test")
                    .unwrap()
                    .to_string()
            })
            .collect();

        assert_eq!(phc_strings[0], phc_strings[1]);
    }

    #[test]
    fn test_known_value_small_params() {
        let hash = Hasher::new()
            .memory_cost_kib(64)
            .iterations(2)
            .threads(1)
            .hash_length(32)
            .custom_salt(b"saltsalt")
            .hash(b"test")
            .unwrap();

        assert_eq!(
            hash.to_string(),
            "$argon2id$v=19$m=64,t=2,p=1$c2FsdHNhbHQ$ZK0UTx52VW1qum/bbVSDVCwGlXXIM9lBaGLv0AirCyY"
        );
    }

    #[test]
    fn test_known_value_two_lanes() {
        let hash = Hasher::new()
            .memory_cost_kib(64)
            .iterations(3)
            .threads(2)
            .hash_length(24)
            .custom_salt(b"somesalt")
            .hash(b"password")
            .unwrap();

        assert_eq!(
            hash.to_string(),
            "$argon2id$v=19$m=64,t=3,p=2$c29tZXNhbHQ$AiN7UXayTFhQfjoNnBfWfLPVye2dvnAR"
        );
    }

    // Regression pin for the tool's default parameters. Slower than the
    // other tests because it allocates the full 19 MiB.
    #[test]
    fn test_known_value_default_params() {
        let hash = Hasher::new().custom_salt(b"saltsalt").hash(b"test").unwrap();

        assert_eq!(
            hash.to_string(),
            "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$GsorJgzkom9CX+5gltbpDyUKhzfT5cKw2Z+cQfhmTZ8"
        );
    }

    #[test]
    fn test_produced_string_parses_back() {
        let hash = Hasher::new()
            .memory_cost_kib(64)
            .iterations(2)
            .threads(1)
            .hash_length(32)
            .custom_salt(b"saltsalt")
            .hash(b"test")
            .unwrap();

        let phc_string = hash.to_string();
        assert!(!phc_string.contains('='));

        let reparsed = Hash::from_str(&phc_string).unwrap();

        assert_eq!(reparsed, hash);
        assert_eq!(reparsed.salt_bytes(), b"saltsalt");
        assert_eq!(reparsed.as_bytes().len(), 32);
    }

    #[test]
    fn test_generated_salt_has_requested_length() {
        let hash = Hasher::new()
            .memory_cost_kib(64)
            .salt_length(16)
            .hash(b"test")
            .unwrap();

        assert_eq!(hash.salt_bytes().len(), 16);
    }

    #[test]
    fn test_generated_salts_differ_across_runs() {
        let first = Hasher::new().memory_cost_kib(64).hash(b"test").unwrap();
        let second = Hasher::new().memory_cost_kib(64).hash(b"test").unwrap();

        assert_ne!(first.salt_bytes(), second.salt_bytes());
        assert_ne!(first.to_string(), second.to_string());
    }

    #[test]
    fn test_empty_salt_is_rejected_by_primitive() {
        let result = Hasher::new()
            .memory_cost_kib(64)
            .custom_salt(b"")
            .hash(b"test");

        assert!(matches!(result, Err(PhcGenError::Derivation(_))));
    }

    #[test]
    fn test_short_salt_is_rejected_by_primitive() {
        let result = Hasher::new()
            .memory_cost_kib(64)
            .custom_salt(b"ab")
            .hash(b"test");

        assert!(matches!(result, Err(PhcGenError::Derivation(_))));
    }

    #[test]
    fn test_zero_memory_cost_is_rejected_by_primitive() {
        let result = Hasher::new()
            .memory_cost_kib(0)
            .custom_salt(b"saltsalt")
            .hash(b"test");

        assert!(matches!(result, Err(PhcGenError::Derivation(_))));
    }

    #[test]
    fn test_zero_parallelism_is_rejected_by_primitive() {
        let result = Hasher::new()
            .memory_cost_kib(64)
            .threads(0)
            .custom_salt(b"saltsalt")
            .hash(b"test");

        assert!(matches!(result, Err(PhcGenError::Derivation(_))));
    }
}
