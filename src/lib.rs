pub mod advisor;
pub mod assistant;
pub mod dashboard;
pub mod errors;
pub mod filters;
pub mod models;
pub mod session;
pub mod store;
pub mod transcription;
pub mod views;

pub use crate::dashboard::DashboardCore;
pub use crate::errors::{AppError, AppResult};
pub use crate::store::DataStore;

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;

static LOG_GUARD: std::sync::OnceLock<WorkerGuard> = std::sync::OnceLock::new();

/// Installs the process-wide JSON log subscriber writing into `log_dir`.
/// Safe to call more than once; later calls keep the first subscriber.
pub fn init_tracing(log_dir: &Path) -> Result<(), String> {
    std::fs::create_dir_all(log_dir).map_err(|error| error.to_string())?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "command-center.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(guard);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .with_writer(non_blocking)
        .try_init()
        .map_err(|error| error.to_string())
}
