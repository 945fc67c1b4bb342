//! Tracing subscriber bootstrap shared by every service binary.

use anyhow::Context;
use bookshelf_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured level.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = build_filter(settings)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let installed = match settings.log_format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().flatten_event(true).try_init(),
    };

    // A subscriber installed earlier (tests, embedding) is left in place.
    if installed.is_ok() {
        tracing::debug!(target: "bookshelf-telemetry", format = ?settings.log_format, "tracing initialized");
    }
    Ok(())
}

fn build_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&settings.level)
            .with_context(|| format!("invalid log level directive '{}'", settings.level)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_must_parse() {
        let settings = TelemetrySettings {
            level: "info,bookshelf_db=debug".to_string(),
            log_format: LogFormat::Json,
        };
        assert!(EnvFilter::try_new(&settings.level).is_ok());
        assert!(EnvFilter::try_new("bookshelf=loud").is_err());
    }

    #[test]
    fn init_tolerates_existing_subscriber() {
        let settings = TelemetrySettings::default();
        init(&settings).unwrap();
        init(&settings).unwrap();
    }
}
