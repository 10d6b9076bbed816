//! Authentication and role gates.
//!
//! - [`auth`]: The [`auth::AuthUser`] extractor
//! - [`role`]: Router-level gates built on `require_roles`
//!
//! 1. Client sends `Authorization: Bearer <token>` (the bare token also works)
//! 2. The gate verifies it and attaches the caller to the request
//! 3. The caller's role is checked against the gate's allowed roles
//! 4. Handlers read the caller through `AuthUser` and scope queries to its school

pub mod auth;
pub mod role;
