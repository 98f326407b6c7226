//! Random credential material.
//!
//! When the user does not supply a password or a salt, the tool synthesizes
//! one from the operating system's cryptographically secure random source and
//! hands it around as unpadded standard base64 text. The text itself is the
//! credential: the string that gets displayed is byte-for-byte the material
//! fed into the key derivation, not a display encoding of some other value.

use base64::engine::general_purpose::STANDARD_NO_PAD as b64_stdnopad;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::PhcGenError;

/// Draws `byte_len` bytes from the OS random source and encodes them as
/// unpadded standard base64.
///
/// Fails with [`PhcGenError::RandomSource`] if the random source is
/// unavailable or exhausted. There is no retry; callers treat this as fatal.
///
/// ```
/// use phc_gen::credential::random_base64;
///
/// let a = random_base64(16).unwrap();
/// let b = random_base64(16).unwrap();
/// assert_ne!(a, b);
/// ```
pub fn random_base64(byte_len: usize) -> Result<String, PhcGenError> {
    let mut bytes = vec![0u8; byte_len];
    OsRng.try_fill_bytes(&mut bytes)?;

    Ok(b64_stdnopad.encode(bytes))
}
