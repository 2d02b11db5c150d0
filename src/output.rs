//! The module responsible for writing search results and map markers as CSV.
use crate::geo::MapMarker;
use crate::parcel::{LandParcel, ParcelID, Zoning};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Represents a parcel in the search results CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct ParcelRow {
    id: ParcelID,
    title: String,
    state: String,
    city: String,
    zoning: Zoning,
    price: u64,
    size_sqm: f64,
}

impl ParcelRow {
    /// Create a new [`ParcelRow`]
    fn new(parcel: &LandParcel) -> Self {
        Self {
            id: parcel.id.clone(),
            title: parcel.title.clone(),
            state: parcel.state.clone(),
            city: parcel.city.clone(),
            zoning: parcel.zoning,
            price: parcel.price,
            size_sqm: parcel.size_sqm,
        }
    }
}

/// Represents a row in the map markers CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct MarkerRow {
    parcel_id: ParcelID,
    title: String,
    lat: f64,
    lng: f64,
}

/// Create a file for output, along with any missing parent directories
pub fn create_output_file(file_path: &Path) -> Result<File> {
    if let Some(dir_path) = file_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir_path)
            .with_context(|| format!("Failed to create directory: {}", dir_path.display()))?;
    }

    File::create(file_path)
        .with_context(|| format!("Failed to create output file: {}", file_path.display()))
}

/// Write parcels as CSV, one row per parcel
pub fn write_parcels<'a, W, I>(writer: W, parcels: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a LandParcel>,
{
    let mut writer = csv::Writer::from_writer(writer);
    for parcel in parcels {
        writer.serialize(ParcelRow::new(parcel))?;
    }
    writer.flush()?;

    Ok(())
}

/// Write map markers as CSV, one row per marker
pub fn write_markers<W: Write>(writer: W, markers: &[MapMarker]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for marker in markers {
        writer.serialize(MarkerRow {
            parcel_id: marker.parcel_id.clone(),
            title: marker.title.clone(),
            lat: marker.coordinate.lat,
            lng: marker.coordinate.lng,
        })?;
    }
    writer.flush()?;

    Ok(())
}
