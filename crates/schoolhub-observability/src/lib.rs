//! SchoolHub Observability
//!
//! - Structured logging through `tracing` (console, rolling error log, JSON log)
//! - Prometheus metrics: HTTP traffic plus account, login and integrity counters
//! - Per-request logging middleware
//!
//! The `observability` feature (default) compiles metrics and file logging in.
//! At runtime `OBSERVABILITY_ENABLED=false` turns metrics off. Without the
//! feature every entry point is a no-op except console logging.
//!
//! ```no_run
//! use schoolhub_observability::{init_metrics, init_tracing};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_tracing();
//!     let _handle = init_metrics();
//! }
//! ```

pub mod basic_logging;

#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub use logging::{init_tracing, logging_middleware};
#[cfg(feature = "observability")]
pub use metrics::{
    init_metrics, is_observability_enabled, metrics_middleware, render_metrics,
    track_account_registered, track_delete_blocked, track_login_failure, track_login_success,
    track_token_issued,
};

#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{extract::Request, middleware::Next, response::Response};

    /// Placeholder so `init_metrics` keeps one signature across builds.
    #[derive(Clone)]
    pub struct PrometheusHandle;

    pub fn is_observability_enabled() -> bool {
        false
    }

    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub fn init_tracing() {
        super::basic_logging::init_basic_console_logging();
    }

    pub fn init_metrics() -> Option<PrometheusHandle> {
        None
    }

    pub fn render_metrics(_handle: &PrometheusHandle) -> String {
        String::new()
    }

    pub fn track_account_registered(_role: &str) {}
    pub fn track_login_success(_role: &str) {}
    pub fn track_login_failure(_role: &str, _reason: &str) {}
    pub fn track_token_issued(_role: &str) {}
    pub fn track_delete_blocked(_target: &str) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
