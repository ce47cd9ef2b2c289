use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingSettings};
use crate::error::AppError;

/// Install the global tracing subscriber. `RUST_LOG` wins over the configured
/// level. Output goes to stderr so stdout stays free for results.
pub fn init_tracing(settings: &LoggingSettings) -> Result<(), AppError> {
    let level = settings.level.parse::<Level>().unwrap_or(Level::INFO);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("defi_risk_assessor={}", level).into());

    let result = match settings.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .pretty()
            .try_init(),
        LogFormat::Compact => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .compact()
            .try_init(),
    };

    result.map_err(|e| AppError::InternalError(format!("Failed to initialize logging: {}", e)))?;

    info!("Logging initialized with level: {}", settings.level);
    Ok(())
}
