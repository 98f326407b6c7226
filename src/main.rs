use anyhow::Context;
use clap::Parser;
use uuid::Uuid;

use phc_gen::{credential, Hasher};

/// Byte length of an auto-generated salt, before base64 encoding.
const GENERATED_SALT_LEN: usize = 16;

/// Byte length of an auto-generated password, before base64 encoding. 64
/// bytes gives the encoded text 512 bits of entropy, enough for use as raw
/// key material.
const GENERATED_PASSWORD_LEN: usize = 64;

/// Generates a PHC-formatted Argon2id hash string for a password and salt,
/// creating random values for either when not supplied.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Memory cost in kibibytes
    #[arg(short = 'm', long = "memory", default_value_t = 19456)]
    memory_cost_kib: u32,

    /// Time cost (number of passes)
    #[arg(short = 't', long = "time", default_value_t = 2)]
    iterations: u32,

    /// Degree of parallelism
    #[arg(short = 'p', long = "parallelism", default_value_t = 1)]
    threads: u32,

    /// Output length of the derived key, in bytes
    #[arg(short = 'l', long = "length", default_value_t = 32)]
    hash_length: u32,

    /// Password material (generated when omitted)
    #[arg(long)]
    password: Option<String>,

    /// Salt material (generated when omitted)
    #[arg(long)]
    salt: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let password = match args.password {
        Some(password) => password,
        None => credential::random_base64(GENERATED_PASSWORD_LEN)
            .context("failed to generate a random password")?,
    };

    let salt = match args.salt {
        Some(salt) => salt,
        None => credential::random_base64(GENERATED_SALT_LEN)
            .context("failed to generate a random salt")?,
    };

    let hash = Hasher::new()
        .memory_cost_kib(args.memory_cost_kib)
        .iterations(args.iterations)
        .threads(args.threads)
        .hash_length(args.hash_length)
        .custom_salt(salt.as_bytes())
        .hash(password.as_bytes())
        .context("failed to derive the Argon2id hash")?;

    println!("uuid       : {}", Uuid::new_v4());
    println!("password   : {password}");
    println!("salt       : {salt}");
    println!("PHC string : {hash}");

    Ok(())
}
