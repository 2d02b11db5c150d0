//! Code for reading anchor coordinates from a CSV file.
use super::*;
use crate::geo::{Coordinate, CoordinateTable};
use log::warn;
use serde::Deserialize;

const COORDINATES_FILE_NAME: &str = "coordinates.csv";

/// An anchor coordinate record retrieved from a CSV file
#[derive(PartialEq, Debug, Deserialize)]
struct CoordinateRaw {
    /// City or state name
    name: String,
    lat: f64,
    lng: f64,
}

/// Read anchor coordinates from an iterator of raw records
fn read_coordinates_from_iter<I>(iter: I) -> Result<CoordinateTable>
where
    I: Iterator<Item = CoordinateRaw>,
{
    let mut table = CoordinateTable::new();
    for record in iter {
        ensure!(
            (-90.0..=90.0).contains(&record.lat),
            "Latitude for {} must be between -90 and 90 (got {})",
            record.name,
            record.lat
        );
        ensure!(
            (-180.0..=180.0).contains(&record.lng),
            "Longitude for {} must be between -180 and 180 (got {})",
            record.name,
            record.lng
        );

        let coordinate = Coordinate::new(record.lat, record.lng);
        ensure!(
            table.insert(record.name.clone(), coordinate).is_none(),
            "Duplicate coordinate entry for {}",
            record.name
        );
    }

    Ok(table)
}

/// Read anchor coordinates from `coordinates.csv`.
///
/// # Arguments
///
/// * `dataset_dir` - Folder containing the dataset files
///
/// # Returns
///
/// A table of coordinates keyed by city or state name. If the file doesn't exist, the table is
/// empty and every parcel will be placed at the default anchor.
pub fn read_coordinates(dataset_dir: &Path) -> Result<CoordinateTable> {
    let file_path = dataset_dir.join(COORDINATES_FILE_NAME);
    if !file_path.exists() {
        warn!(
            "No {COORDINATES_FILE_NAME} in {}; all parcels will use the default anchor",
            dataset_dir.display()
        );
        return Ok(CoordinateTable::new());
    }

    let coordinates_csv = read_csv(&file_path)?;
    read_coordinates_from_iter(coordinates_csv).with_context(|| input_err_msg(&file_path))
}
