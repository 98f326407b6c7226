use crate::error::PhcGenError;

use std::str::FromStr;

/// The fields of a PHC hash string, split apart but not yet decoded. The salt
/// and hash are kept as base64 text; decoding belongs to the caller.
pub struct TokenizedHash {
    pub version: u32,
    pub mem_cost_kib: u32,
    pub iterations: u32,
    pub threads: u32,
    pub b64_salt: String,
    pub b64_hash: String,
}

impl FromStr for TokenizedHash {
    type Err = PhcGenError;

    /// Splits a PHC string of the form
    /// `$argon2id$v=19$m=19456,t=2,p=1$<b64 salt>$<b64 hash>` into its
    /// fields. The `m`, `t`, and `p` parameters may appear in any order, but
    /// each must appear exactly once. Only the argon2id algorithm identifier
    /// is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix("$argon2id$")
            .ok_or(PhcGenError::InvalidHash("must begin with $argon2id"))?;

        let rest = rest
            .strip_prefix("v=")
            .ok_or(PhcGenError::InvalidHash("missing algorithm version"))?;
        let (version, rest) = rest
            .split_once('$')
            .ok_or(PhcGenError::InvalidHash("missing '$' after version"))?;
        let version: u32 = version
            .parse()
            .map_err(|_| PhcGenError::InvalidHash("invalid version"))?;

        let (params, rest) = rest
            .split_once('$')
            .ok_or(PhcGenError::InvalidHash("missing '$' after parameters"))?;

        let mut mem_cost_kib = None;
        let mut iterations = None;
        let mut threads = None;

        for piece in params.split(',') {
            let (key, value) = piece
                .split_once('=')
                .ok_or(PhcGenError::InvalidHash("malformed parameter"))?;

            let slot = match key {
                "m" => &mut mem_cost_kib,
                "t" => &mut iterations,
                "p" => &mut threads,
                _ => {
                    return Err(PhcGenError::InvalidHash("unrecognized parameter"));
                }
            };

            if slot.is_some() {
                return Err(PhcGenError::InvalidHash("duplicate parameter"));
            }

            *slot = Some(
                value
                    .parse::<u32>()
                    .map_err(|_| PhcGenError::InvalidHash("invalid parameter value"))?,
            );
        }

        let mem_cost_kib =
            mem_cost_kib.ok_or(PhcGenError::InvalidHash("missing 'm' parameter"))?;
        let iterations = iterations.ok_or(PhcGenError::InvalidHash("missing 't' parameter"))?;
        let threads = threads.ok_or(PhcGenError::InvalidHash("missing 'p' parameter"))?;

        let (b64_salt, b64_hash) = rest
            .split_once('$')
            .ok_or(PhcGenError::InvalidHash("missing '$' between salt and hash"))?;

        if b64_salt.is_empty() {
            return Err(PhcGenError::InvalidHash("empty salt"));
        }

        if b64_hash.is_empty() {
            return Err(PhcGenError::InvalidHash("missing hash after salt"));
        }

        if b64_hash.contains('$') {
            return Err(PhcGenError::InvalidHash("trailing '$' after hash"));
        }

        Ok(Self {
            version,
            mem_cost_kib,
            iterations,
            threads,
            b64_salt: String::from(b64_salt),
            b64_hash: String::from(b64_hash),
        })
    }
}
