//! Shared logging utilities for consistent tracing across services

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::OnceLock;
use tracing::{error, info};

/// Global service identity - set once at startup
static SERVICE_ID: OnceLock<ServiceId> = OnceLock::new();

/// Identity of the running binary, used to pick log filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    Generator,
    WebServer,
}

impl ServiceId {
    /// Initialize the global service id (first call wins)
    pub fn init(service: ServiceId) -> &'static ServiceId {
        SERVICE_ID.get_or_init(|| service)
    }

    /// Get the global service id, defaulting to the generator when unset
    pub fn current() -> ServiceId {
        SERVICE_ID.get().copied().unwrap_or(ServiceId::Generator)
    }

    /// Per-service filter directives
    pub fn filter_directives(self, base_level: &str) -> String {
        match self {
            ServiceId::Generator => {
                format!("generator={base_level},shared={base_level},reqwest=warn")
            }
            ServiceId::WebServer => format!(
                "webserver={base_level},generator={base_level},shared={base_level},tower_http=debug,axum={base_level}"
            ),
        }
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceId::Generator => write!(f, "generator"),
            ServiceId::WebServer => write!(f, "webserver"),
        }
    }
}

/// Initialize the tracing subscriber for a service with an optional log level
///
/// `RUST_LOG` overrides the computed directives when set.
pub fn init_tracing(service: ServiceId, log_level: Option<&str>) {
    use tracing_subscriber::{EnvFilter, fmt};

    let service = *ServiceId::init(service);
    let base_level = log_level.unwrap_or("info");
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(service.filter_directives(base_level)));

    // try_init so repeated calls (tests) do not panic
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init();
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for store-scoped info logging
#[macro_export]
macro_rules! store_info {
    ($store_id:expr, $($arg:tt)*) => {
        tracing::info!(
            store = %$store_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for store-scoped warning logging
#[macro_export]
macro_rules! store_warn {
    ($store_id:expr, $($arg:tt)*) => {
        tracing::warn!(
            store = %$store_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for store-scoped error logging
#[macro_export]
macro_rules! store_error {
    ($store_id:expr, $($arg:tt)*) => {
        tracing::error!(
            store = %$store_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for store-scoped debug logging
#[macro_export]
macro_rules! store_debug {
    ($store_id:expr, $($arg:tt)*) => {
        tracing::debug!(
            store = %$store_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for startup messages
pub fn log_startup(service: ServiceId, details: &str) {
    info!(
        service = %service,
        timestamp = format_timestamp(),
        "🚀 Starting {}",
        details
    );
}

/// Contextual logging helper for shutdown messages
pub fn log_shutdown(service: ServiceId, reason: &str) {
    info!(
        service = %service,
        timestamp = format_timestamp(),
        "🛑 Shutting down: {}",
        reason
    );
}

/// Contextual logging helper for error conditions
pub fn log_error(service: ServiceId, context: &str, error: &dyn std::fmt::Display) {
    error!(
        service = %service,
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_id_display() {
        assert_eq!(ServiceId::Generator.to_string(), "generator");
        assert_eq!(ServiceId::WebServer.to_string(), "webserver");
    }

    #[test]
    fn test_filter_directives_carry_level() {
        let directives = ServiceId::WebServer.filter_directives("debug");
        assert!(directives.contains("webserver=debug"));
        assert!(directives.contains("generator=debug"));
        assert!(ServiceId::Generator.filter_directives("warn").starts_with("generator=warn"));
    }

    #[test]
    fn test_timestamp_format() {
        let ts = format_timestamp();
        // HH:MM:SS.mmm
        assert_eq!(ts.len(), 12);
        assert_eq!(&ts[2..3], ":");
    }
}
