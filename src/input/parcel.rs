//! Code for reading land parcels from a TOML file.
use super::*;
use crate::parcel::LandParcel;
use serde::Deserialize;

pub(super) const PARCELS_FILE_NAME: &str = "parcels.toml";

/// The contents of a parcels file
#[derive(Debug, Deserialize)]
struct ParcelsFile {
    #[serde(default)]
    parcels: Vec<LandParcel>,
}

/// Read the parcels listed in `parcels.toml`, in file order.
///
/// The parcels are checked against the rest of the dataset when the catalog is built.
///
/// # Arguments
///
/// * `dataset_dir` - Folder containing the dataset files
pub fn read_parcels(dataset_dir: &Path) -> Result<Vec<LandParcel>> {
    let file_path = dataset_dir.join(PARCELS_FILE_NAME);
    let file: ParcelsFile = read_toml(&file_path)?;
    ensure!(
        !file.parcels.is_empty(),
        "No parcels found in {}",
        file_path.display()
    );

    Ok(file.parcels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parcel::{ParcelID, Zoning};
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_read_parcels() {
        let dir = tempdir().unwrap();
        {
            let mut file = File::create(dir.path().join(PARCELS_FILE_NAME)).unwrap();
            writeln!(
                file,
                "[[parcels]]
id = \"land-005\"
title = \"Agricultural Land\"
address = \"Epe, Lagos\"
price = 25000000
size = 20000
zoning = \"agricultural\"
state = \"Lagos\"
city = \"Epe\"
description = \"Fertile agricultural land.\"
features = [\"Fertile soil\"]"
            )
            .unwrap();
        }

        let parcels = read_parcels(dir.path()).unwrap();
        assert_eq!(parcels.len(), 1);
        let parcel = &parcels[0];
        assert_eq!(parcel.id, ParcelID::new("land-005"));
        assert_eq!(parcel.size_sqm, 20_000.0);
        assert_eq!(parcel.zoning, Zoning::Agricultural);
        assert_eq!(parcel.features, ["Fertile soil"]);
        assert!(parcel.amenities.is_empty());
    }

    #[test]
    fn test_read_parcels_empty() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join(PARCELS_FILE_NAME)).unwrap();
        assert!(read_parcels(dir.path()).is_err());
    }

    #[test]
    fn test_read_parcels_bad_zoning() {
        let dir = tempdir().unwrap();
        {
            let mut file = File::create(dir.path().join(PARCELS_FILE_NAME)).unwrap();
            writeln!(
                file,
                "[[parcels]]
id = \"x\"
title = \"t\"
address = \"a\"
price = 1
size = 1
zoning = \"swamp\"
state = \"Lagos\"
city = \"Epe\"
description = \"d\""
            )
            .unwrap();
        }
        assert!(read_parcels(dir.path()).is_err());
    }
}
