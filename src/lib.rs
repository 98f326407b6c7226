#![deny(missing_docs)]

//! A small library (and command-line tool) for generating
//! [PHC-formatted](https://github.com/P-H-C/phc-string-format) hash strings
//! with [Argon2id](https://en.wikipedia.org/wiki/Argon2), the hybrid variant
//! of the memory-hard key derivation function that won the
//! [Password Hashing Competition](https://www.password-hashing.net).
//!
//! The Argon2id primitive itself is provided by the
//! [argon2 crate](https://docs.rs/argon2/latest/argon2/) (RFC 9106, version
//! 0x13); this crate only resolves parameters, synthesizes random credential
//! material when none is supplied, and renders the result as a PHC string.
//!
//! # Examples
//!
//! Derive a key with a known salt and render the PHC string:
//!
//! ```rust
//! use phc_gen::Hasher;
//!
//! let hash = Hasher::new()
//!     .memory_cost_kib(64)
//!     .iterations(2)
//!     .threads(1)
//!     .hash_length(32)
//!     .custom_salt(b"saltsalt")
//!     .hash(b"test")
//!     .unwrap();
//!
//! assert_eq!(
//!     hash.to_string(),
//!     "$argon2id$v=19$m=64,t=2,p=1$c2FsdHNhbHQ$ZK0UTx52VW1qum/bbVSDVCwGlXXIM9lBaGLv0AirCyY",
//! );
//! ```
//!
//! Let the hasher generate a random salt (the default):
//!
//! ```rust
//! use phc_gen::Hasher;
//!
//! let hash = Hasher::new().memory_cost_kib(64).hash(b"test").unwrap();
//!
//! assert_eq!(hash.salt_bytes().len(), 16);
//! assert_eq!(hash.as_bytes().len(), 32);
//! ```
//!
//! Split a PHC string back into its parts:
//!
//! ```rust
//! use phc_gen::Hash;
//! use std::str::FromStr;
//!
//! let hash = Hash::from_str(
//!     "$argon2id$v=19$m=64,t=2,p=1$c2FsdHNhbHQ$ZK0UTx52VW1qum/bbVSDVCwGlXXIM9lBaGLv0AirCyY",
//! )
//! .unwrap();
//!
//! assert_eq!(hash.memory_cost_kib(), 64);
//! assert_eq!(hash.salt_bytes(), b"saltsalt");
//! ```
//!
//! Generate credential material the way the command-line tool does. The
//! base64 text itself is the credential; feed its bytes to the hasher:
//!
//! ```rust
//! use phc_gen::{credential, Hasher};
//!
//! let password = credential::random_base64(64).unwrap();
//! let salt = credential::random_base64(16).unwrap();
//!
//! let hash = Hasher::new()
//!     .memory_cost_kib(64)
//!     .custom_salt(salt.as_bytes())
//!     .hash(password.as_bytes())
//!     .unwrap();
//!
//! assert_eq!(hash.salt_bytes(), salt.as_bytes());
//! ```

pub mod credential;
mod error;
mod hasher;
mod lexer;

pub use error::PhcGenError;
pub use hasher::{Hash, Hasher};
