//! # SchoolHub CLI
//!
//! Database seeding and account bootstrap used by the `schoolhub-cli` binary.
//!
//! ```ignore
//! use schoolhub_cli::seeder::{seed_all, SeedConfig};
//!
//! seed_all(&pool, SeedConfig::new(3)).await?;
//! ```

pub mod seeder;
