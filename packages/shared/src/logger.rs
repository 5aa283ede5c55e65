//! Logging setup shared by all binaries.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence when set; otherwise the application's own
/// targets and `tower_http` log at `default_level`.
///
/// # Arguments
///
/// * `app_name` - The binary name (hyphens are mapped to the module-path form)
/// * `default_level` - Level directive used when `RUST_LOG` is absent
pub fn setup_logger(app_name: &str, default_level: &str) {
    let target = app_name.replace('-', "_");
    let directives = format!("{target}={default_level},tower_http={default_level}");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives.clone()));

    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::debug!("logger initialized (default directives: {})", directives);
}
