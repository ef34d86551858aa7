//! Layered application configuration
//!
//! Settings come from three layers with increasing precedence: built-in
//! defaults, an optional JSON configuration file, then command line
//! arguments. The configuration file is looked up at the explicitly
//! given path, next to the executable, then in the home directory; a
//! missing or unreadable file keeps the defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::args::Cli;

const CONFIG_FILE: &str = "examgen.conf.json";

/// Resolved application settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Number of exam copies
    pub number: u32,
    /// File name prefix of exams
    pub exam_prefix: String,
    /// File name prefix of correction keys
    pub correction_prefix: String,
    /// Whether questions and answers are shuffled
    pub shuffle: bool,
    /// Per-page heading
    pub page_heading: Option<String>,
    /// Input file encoding
    pub encoding: String,
    /// Symbolic delimiter name
    pub delimiter: String,
    /// Output directory
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            number: 1,
            exam_prefix: "Exam".to_string(),
            correction_prefix: "Correction".to_string(),
            shuffle: true,
            page_heading: None,
            encoding: "utf-8".to_string(),
            delimiter: "comma".to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Load settings from the first configuration file found
pub fn load(explicit: Option<&Path>) -> Settings {
    for path in candidates(explicit) {
        if !path.is_file() {
            continue;
        }
        match read_settings(&path) {
            Ok(settings) => {
                tracing::info!(path = %path.display(), "loaded configuration");
                return settings;
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "skipping unreadable configuration");
            }
        }
    }
    tracing::warn!("no configuration file found, using defaults");
    Settings::default()
}

/// Apply command line overrides on top of the settings
pub fn merge(settings: &mut Settings, cli: &Cli) {
    if let Some(number) = cli.number {
        settings.number = number;
    }
    if let Some(ref prefix) = cli.exam_prefix {
        settings.exam_prefix = prefix.clone();
    }
    if let Some(ref prefix) = cli.correction_prefix {
        settings.correction_prefix = prefix.clone();
    }
    if let Some(shuffle) = cli.shuffle {
        settings.shuffle = shuffle;
    }
    if let Some(ref heading) = cli.page_heading {
        settings.page_heading = Some(heading.clone());
    }
    if let Some(ref encoding) = cli.encoding {
        settings.encoding = encoding.clone();
    }
    if let Some(ref delimiter) = cli.delimiter {
        settings.delimiter = delimiter.clone();
    }
    if let Some(ref dir) = cli.output_dir {
        settings.output_dir = dir.clone();
    }
}

fn candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
    }
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        paths.push(exe_dir.join(CONFIG_FILE));
    }
    if let Some(home) = std::env::var_os("HOME") {
        paths.push(PathBuf::from(home).join(CONFIG_FILE));
    }
    paths
}

fn read_settings(path: &Path) -> anyhow::Result<Settings> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.number, 1);
        assert_eq!(settings.exam_prefix, "Exam");
        assert!(settings.shuffle);
        assert_eq!(settings.delimiter, "comma");
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("examgen.conf.json");
        std::fs::write(&path, r#"{"number": 4, "delimiter": "semicolon"}"#).unwrap();

        let settings = load(Some(&path));
        assert_eq!(settings.number, 4);
        assert_eq!(settings.delimiter, "semicolon");
        // Unset keys keep their defaults
        assert_eq!(settings.exam_prefix, "Exam");
    }

    #[test]
    fn test_load_invalid_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("examgen.conf.json");
        std::fs::write(&path, "not json").unwrap();

        // Falls through to the defaults (no other candidate exists in
        // the test environment's executable directory)
        let settings = load(Some(&path));
        assert_eq!(settings.number, Settings::default().number);
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let mut settings = Settings {
            number: 4,
            ..Settings::default()
        };
        let cli = Cli::try_parse_from(["examgen", "bank.csv", "-n", "9", "-s", "false"]).unwrap();
        merge(&mut settings, &cli);

        assert_eq!(settings.number, 9);
        assert!(!settings.shuffle);
        // Arguments not given leave the layer below untouched
        assert_eq!(settings.exam_prefix, "Exam");
    }
}
