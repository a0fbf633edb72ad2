use std::env;

use crate::error::{CliError, Result};
use crate::Args;

/// How selections are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text table
    #[default]
    Text,
    /// One JSON document per line
    Json,
}

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// CSV field delimiter
    pub delimiter: u8,
    /// Whether the first CSV record or worksheet row holds column headers
    pub has_headers: bool,
    /// Output format
    pub format: OutputFormat,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            format: OutputFormat::Text,
            log_filter: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let delimiter = match lookup("SHEETREF_DELIMITER") {
            Some(value) => parse_delimiter(&value)?,
            None => defaults.delimiter,
        };
        let has_headers = match lookup("SHEETREF_HAS_HEADERS") {
            Some(value) => parse_bool(&value)?,
            None => defaults.has_headers,
        };
        let format = match lookup("SHEETREF_FORMAT") {
            Some(value) => <OutputFormat as clap::ValueEnum>::from_str(&value, true)
                .map_err(|_| CliError::Config(format!("unknown output format {:?}", value)))?,
            None => defaults.format,
        };
        let log_filter = lookup("SHEETREF_LOG").unwrap_or(defaults.log_filter);

        Ok(Self {
            delimiter,
            has_headers,
            format,
            log_filter,
        })
    }

    /// Apply command-line overrides
    pub fn merge_args(mut self, args: &Args) -> Result<Self> {
        if let Some(delimiter) = args.delimiter {
            self.delimiter = parse_delimiter(&delimiter.to_string())?;
        }
        if args.no_headers {
            self.has_headers = false;
        }
        if let Some(format) = args.format {
            self.format = format;
        }
        Ok(self)
    }
}

fn parse_delimiter(value: &str) -> Result<u8> {
    let value = match value {
        "\\t" | "tab" => "\t",
        other => other,
    };
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(CliError::Config(format!(
            "delimiter must be a single ASCII character, got {:?}",
            value
        ))),
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(CliError::Config(format!("expected a boolean, got {:?}", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_env_values() {
        let config = Config::from_lookup(lookup(&[
            ("SHEETREF_DELIMITER", "tab"),
            ("SHEETREF_HAS_HEADERS", "no"),
            ("SHEETREF_FORMAT", "JSON"),
            ("SHEETREF_LOG", "sheetref_core=debug"),
        ]))
        .unwrap();
        assert_eq!(config.delimiter, b'\t');
        assert!(!config.has_headers);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.log_filter, "sheetref_core=debug");
    }

    #[test]
    fn test_bad_env_values() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("SHEETREF_DELIMITER", ";;")])),
            Err(CliError::Config(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("SHEETREF_HAS_HEADERS", "maybe")])),
            Err(CliError::Config(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("SHEETREF_FORMAT", "xml")])),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_args_override_env() {
        let base = Config::from_lookup(lookup(&[("SHEETREF_DELIMITER", ";")])).unwrap();
        let args = Args::parse_from([
            "sheetref",
            "data.csv",
            "A1",
            "-d",
            "|",
            "--no-headers",
            "-f",
            "json",
        ]);
        let merged = base.merge_args(&args).unwrap();
        assert_eq!(merged.delimiter, b'|');
        assert!(!merged.has_headers);
        assert_eq!(merged.format, OutputFormat::Json);
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let args = Args::parse_from(["sheetref", "data.csv", "-d", "é"]);
        assert!(Config::default().merge_args(&args).is_err());
    }
}
