//! # Secret Hasher
//!
//! Hashes a secret and prints the PHC string, for pasting into the
//! `LABSTOCK_ADMIN_PASSWORD_HASH` / `LABSTOCK_MASTER_PIN_HASH`
//! environment variables.
//!
//! ## Usage
//! ```bash
//! cargo run -p labstock-service --bin hash-secret -- "my admin password"
//! ```
//!
//! The secret is taken from the command line only; it is never logged.

use std::env;
use std::process::ExitCode;

use labstock_service::hash_password;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    let secret = match args.get(1) {
        Some(s) if !s.is_empty() => s,
        _ => {
            eprintln!("Usage: hash-secret <SECRET>");
            eprintln!();
            eprintln!("Prints the PHC hash of SECRET for use in configuration.");
            return ExitCode::FAILURE;
        }
    };

    match hash_password(secret) {
        Ok(hash) => {
            println!("{}", hash);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to hash secret: {}", e);
            ExitCode::FAILURE
        }
    }
}
