//! # Registrar CLI
//!
//! Administrative helpers behind the `registrar-cli` binary: creating admin
//! accounts and seeding a demo catalog for local development.
//!
//! ```ignore
//! use registrar_cli::seeder::{seed_catalog, SeedConfig};
//!
//! let summary = seed_catalog(&pool, SeedConfig::new(20)).await?;
//! ```

pub mod admin;
pub mod seeder;

pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;
