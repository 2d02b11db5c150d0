//! Code for loading program settings.
use crate::filter::{DEFAULT_PRICE_CEILING, DEFAULT_SIZE_CEILING, FilterBounds};
use crate::geo::DEFAULT_JITTER;
use crate::get_landscout_config_dir;
use crate::input::{input_err_msg, read_toml};
use crate::log::DEFAULT_LOG_LEVEL;
use anyhow::{Context, Result, ensure};
use documented::DocumentedFields;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::{Path, PathBuf};

const SETTINGS_FILE_NAME: &str = "settings.toml";

const DEFAULT_SETTINGS_FILE_HEADER: &str = "# This file contains the program settings for LandScout
# Uncomment a line to change the setting from its default value
";

/// Default log level for program
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_price_ceiling() -> u64 {
    DEFAULT_PRICE_CEILING
}

fn default_size_ceiling() -> f64 {
    DEFAULT_SIZE_CEILING
}

fn default_marker_jitter() -> f64 {
    DEFAULT_JITTER
}

/// Get the path to where the settings file will be read from
pub fn get_settings_file_path() -> PathBuf {
    let mut path = get_landscout_config_dir();
    path.push(SETTINGS_FILE_NAME);

    path
}

/// Program settings from config file
#[derive(Debug, DocumentedFields, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// The default program log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// The highest price (in naira) selectable when filters are reset
    #[serde(default = "default_price_ceiling")]
    pub price_ceiling: u64,
    /// The largest size (in square metres) selectable when filters are reset
    #[serde(default = "default_size_ceiling")]
    pub size_ceiling: f64,
    /// How far (in degrees) map markers may be offset from their anchor point
    #[serde(default = "default_marker_jitter")]
    pub marker_jitter: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            price_ceiling: default_price_ceiling(),
            size_ceiling: default_size_ceiling(),
            marker_jitter: default_marker_jitter(),
        }
    }
}

impl Settings {
    /// Read the contents of the settings file.
    ///
    /// If the file is not present, default values for settings will be used
    ///
    /// # Returns
    ///
    /// The program settings as a `Settings` struct or an error if the file is invalid
    pub fn load() -> Result<Settings> {
        Self::load_from_path(&get_settings_file_path())
    }

    /// Read from the specified path, returning
    fn load_from_path(file_path: &Path) -> Result<Settings> {
        if !file_path.is_file() {
            return Ok(Settings::default());
        }

        let settings: Settings = read_toml(file_path)?;
        settings
            .validate()
            .with_context(|| input_err_msg(file_path))?;

        Ok(settings)
    }

    /// Check that the numeric settings are usable
    fn validate(&self) -> Result<()> {
        ensure!(
            self.size_ceiling.is_finite() && self.size_ceiling > 0.0,
            "size_ceiling must be a finite number greater than zero"
        );
        ensure!(
            self.marker_jitter.is_finite() && self.marker_jitter >= 0.0,
            "marker_jitter must be a finite, non-negative number"
        );

        Ok(())
    }

    /// The bounds used when filters are reset
    pub fn filter_bounds(&self) -> FilterBounds {
        FilterBounds {
            price_ceiling: self.price_ceiling,
            size_ceiling: self.size_ceiling,
        }
    }

    /// The contents of the default settings file
    pub fn default_file_contents() -> String {
        // Settings object with default values set by serde
        let settings: Settings =
            toml::from_str("").expect("Cannot create settings from empty TOML file");

        // Convert to TOML
        let settings_raw = toml::to_string(&settings).expect("Could not convert settings to TOML");

        // Iterate through the generated TOML, commenting out lines and adding docs
        let mut out = DEFAULT_SETTINGS_FILE_HEADER.to_string();
        for line in settings_raw.split('\n') {
            if let Some(last) = line.find('=') {
                // Add documentation from doc comments
                let field = line[..last].trim();

                // Use doc comment to document parameter. All fields should have doc comments.
                let docs = Settings::get_field_docs(field).expect("Missing doc comment for field");
                for line in docs.split('\n') {
                    write!(&mut out, "\n# # {}\n", line.trim()).unwrap();
                }

                writeln!(&mut out, "# {}", line.trim()).unwrap();
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_settings_load_from_path_no_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(SETTINGS_FILE_NAME); // NB: doesn't exist
        assert_eq!(
            Settings::load_from_path(&file_path).unwrap(),
            Settings::default()
        );
    }

    #[test]
    fn test_settings_load_from_path() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(SETTINGS_FILE_NAME);

        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, "log_level = \"warn\"\nprice_ceiling = 300000000").unwrap();
        }

        assert_eq!(
            Settings::load_from_path(&file_path).unwrap(),
            Settings {
                log_level: "warn".to_string(),
                price_ceiling: 300_000_000,
                ..Settings::default()
            }
        );
    }

    #[test]
    fn test_settings_load_from_path_invalid() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(SETTINGS_FILE_NAME);

        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, "marker_jitter = -0.1").unwrap();
        }

        assert_error!(
            Settings::load_from_path(&file_path),
            input_err_msg(&file_path)
        );
    }

    #[test]
    fn test_filter_bounds() {
        assert_eq!(Settings::default().filter_bounds(), FilterBounds::default());
    }

    #[test]
    fn test_default_file_contents() {
        let contents = Settings::default_file_contents();
        assert!(contents.contains("# log_level = \"info\""));
        assert!(contents.contains("# price_ceiling = 500000000"));

        // Every setting is commented out
        let settings: Settings = toml::from_str(&contents).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
