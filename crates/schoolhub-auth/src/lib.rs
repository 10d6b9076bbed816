//! # SchoolHub Auth
//!
//! Identity claims and the token codec.
//!
//! - [`claims`]: The [`Role`] enum and the canonical [`Claims`] carried by every token
//! - [`jwt`]: Issuing and verifying HS256 tokens
//!
//! ```ignore
//! use schoolhub_auth::{issue_token, verify_token, Role, TokenSubject};
//!
//! let token = issue_token(&TokenSubject { id, school_id, role: Role::Teacher, name: "Ada", image_url: None }, &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{Claims, Role};
pub use jwt::{TokenSubject, issue_token, verify_token};
