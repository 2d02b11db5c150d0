//! Common routines for handling input data.
use crate::catalog::Catalog;
use anyhow::{Context, Result, ensure};
use itertools::Itertools;
use log::info;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

mod coordinate;
use coordinate::read_coordinates;
mod investment;
pub use investment::read_investment_defaults;
mod location;
use location::read_locations;
mod parcel;
use parcel::{PARCELS_FILE_NAME, read_parcels};

/// Read a series of type `T`s from a CSV file.
///
/// Will raise an error if the file is empty.
///
/// # Arguments
///
/// * `file_path` - Path to the CSV file
pub fn read_csv<'a, T: DeserializeOwned + 'a>(
    file_path: &'a Path,
) -> Result<impl Iterator<Item = T> + 'a> {
    let vec = read_csv_internal(file_path)?;
    ensure!(
        !vec.is_empty(),
        "CSV file {} cannot be empty",
        file_path.display()
    );

    Ok(vec.into_iter())
}

fn read_csv_internal<T: DeserializeOwned>(file_path: &Path) -> Result<Vec<T>> {
    let vec = csv::Reader::from_path(file_path)
        .with_context(|| input_err_msg(file_path))?
        .into_deserialize()
        .process_results(|iter| iter.collect_vec())
        .with_context(|| input_err_msg(file_path))?;

    Ok(vec)
}

/// Parse a TOML file at the specified path.
///
/// # Arguments
///
/// * `file_path` - Path to the TOML file
///
/// # Returns
///
/// * The deserialised TOML data or an error if the file could not be read or parsed.
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let toml_str = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    let toml_data = toml::from_str(&toml_str).with_context(|| input_err_msg(file_path))?;
    Ok(toml_data)
}

/// Format an error message to include the file path. To be used with `anyhow::Context`.
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().display())
}

/// Read a dataset from the specified directory.
///
/// # Arguments
///
/// * `dataset_dir` - Folder containing the dataset files
///
/// # Returns
///
/// The parcels, location hierarchy and anchor coordinates as a [`Catalog`], or an error if any
/// file is missing or invalid.
pub fn load_catalog<P: AsRef<Path>>(dataset_dir: P) -> Result<Catalog> {
    let dataset_dir = dataset_dir.as_ref();
    info!("Loading dataset from {}", dataset_dir.display());

    let locations = read_locations(dataset_dir)?;
    let anchors = read_coordinates(dataset_dir)?;
    let parcels = read_parcels(dataset_dir)?;

    let catalog = Catalog::new(parcels, locations, anchors)
        .with_context(|| input_err_msg(dataset_dir.join(PARCELS_FILE_NAME)))?;
    info!(
        "Loaded {} parcels across {} states",
        catalog.len(),
        catalog.locations().len()
    );

    Ok(catalog)
}
