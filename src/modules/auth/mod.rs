pub mod controller;
pub mod service;

pub use schoolhub_models::auth::*;
