pub use schoolhub_models::notices::*;
