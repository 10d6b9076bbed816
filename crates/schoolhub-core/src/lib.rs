//! # SchoolHub Core
//!
//! Core types, errors, and utilities for the SchoolHub API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`response`]: The `{ success, message, data }` response envelope
//! - [`password`]: Password hashing and verification
//! - [`asset_store`]: Image asset storage abstraction
//! - [`serde`]: Custom serde deserialization helpers
//! - [`search`]: Literal substring patterns for `ILIKE`
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_core::{AppError, ApiResponse};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Class not found"));
//! let ok = ApiResponse::with_data("Successfully created the class", class);
//! ```

pub mod asset_store;
pub mod errors;
pub mod password;
pub mod response;
pub mod search;
pub mod serde;

pub use asset_store::{AssetStore, LocalAssetStore, StorageError, StoredAsset};
pub use errors::AppError;
pub use password::{hash_password, hash_password_blocking, verify_password};
pub use response::ApiResponse;
