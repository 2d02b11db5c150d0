//! Common functionality for LandScout, a discovery engine for land listings.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod catalog;
pub mod cli;
pub mod comparison;
pub mod dataset;
pub mod filter;
pub mod finance;
pub mod format;
pub mod geo;
pub mod id;
pub mod input;
pub mod location;
pub mod log;
pub mod output;
pub mod parcel;
pub mod session;
pub mod settings;
pub mod units;

#[cfg(test)]
mod fixture;

/// Get the config dir for the program.
///
/// If the platform has no config dir, the current directory is used instead.
pub fn get_landscout_config_dir() -> PathBuf {
    let Some(mut config_dir) = dirs::config_dir() else {
        return PathBuf::from(".");
    };
    config_dir.push("landscout");

    config_dir
}
