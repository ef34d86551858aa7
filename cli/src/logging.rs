//! Logging initialization
//!
//! The subscriber filter comes from, in order: the optional log-config
//! JSON file, the RUST_LOG environment variable, then "info". A missing
//! or unreadable log-config file is reported but never fatal.

use std::path::Path;

use serde::Deserialize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct LogConfig {
    /// EnvFilter directive, e.g. "info" or "examgen=debug"
    filter: String,
}

/// Install the global subscriber
pub fn init(log_config: Option<&Path>) {
    let mut warning = None;
    let file_filter = log_config.and_then(|path| match read_filter(path) {
        Ok(filter) => Some(filter),
        Err(error) => {
            warning = Some(format!(
                "ignoring log configuration {}: {}",
                path.display(),
                error
            ));
            None
        }
    });

    let filter = match file_filter {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(warning) = warning {
        tracing::warn!("{}", warning);
    }
}

fn read_filter(path: &Path) -> anyhow::Result<String> {
    let text = std::fs::read_to_string(path)?;
    let config: LogConfig = serde_json::from_str(&text)?;
    Ok(config.filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_filter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.json");
        std::fs::write(&path, r#"{"filter": "examgen=debug"}"#).unwrap();
        assert_eq!(read_filter(&path).unwrap(), "examgen=debug");
    }

    #[test]
    fn test_read_filter_missing_file() {
        assert!(read_filter(Path::new("no/such/log.json")).is_err());
    }
}
