pub use schoolhub_models::subjects::*;
