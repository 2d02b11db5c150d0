//! Code for reading the state and city hierarchy from a TOML file.
use super::*;
use crate::location::LocationHierarchy;
use serde::Deserialize;

const LOCATIONS_FILE_NAME: &str = "locations.toml";

/// The contents of a locations file
#[derive(Debug, Deserialize)]
struct LocationsFile {
    states: Vec<StateRaw>,
}

/// A single state and its cities
#[derive(Debug, Deserialize)]
struct StateRaw {
    name: String,
    #[serde(default)]
    cities: Vec<String>,
}

/// Build a [`LocationHierarchy`] from raw state records, preserving their order
fn read_locations_from_iter<I>(iter: I) -> Result<LocationHierarchy>
where
    I: Iterator<Item = StateRaw>,
{
    let mut locations = LocationHierarchy::new();
    for state in iter {
        locations.add_state(&state.name, state.cities)?;
    }
    ensure!(!locations.is_empty(), "At least one state must be defined");

    Ok(locations)
}

/// Read the location hierarchy from `locations.toml`.
///
/// # Arguments
///
/// * `dataset_dir` - Folder containing the dataset files
pub fn read_locations(dataset_dir: &Path) -> Result<LocationHierarchy> {
    let file_path = dataset_dir.join(LOCATIONS_FILE_NAME);
    let file: LocationsFile = read_toml(&file_path)?;
    read_locations_from_iter(file.states.into_iter()).with_context(|| input_err_msg(&file_path))
}
