//! # SchoolHub Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: Token signing and login behavior
//! - [`cors`]: Allowed browser origins
//! - [`storage`]: Image asset storage
//! - [`server`]: Listen address and database pool sizing
//!
//! Every loader falls back to a development default when a variable is
//! missing or unparsable.
//!
//! ```ignore
//! use schoolhub_config::{JwtConfig, CorsConfig, StorageConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod server;
pub mod storage;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;
