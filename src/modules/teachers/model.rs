pub use schoolhub_models::teachers::*;
