//! Datasets bundled with the program.
use anyhow::{Context, Result, bail, ensure};
use include_dir::{Dir, DirEntry, include_dir};
use std::fs;
use std::path::{Path, PathBuf};

/// The directory containing the bundled datasets.
static DATASETS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/data");

/// The name of the bundled reference catalog
pub const REFERENCE_DATASET: &str = "reference";

/// The names of the bundled datasets
pub fn dataset_names() -> impl Iterator<Item = &'static str> {
    DATASETS_DIR
        .dirs()
        .filter_map(|dir| dir.path().file_name()?.to_str())
}

/// The contents of a bundled dataset's `README.txt`
pub fn dataset_readme(name: &str) -> Result<&'static str> {
    let path: PathBuf = [name, "README.txt"].iter().collect();
    DATASETS_DIR
        .get_file(path)
        .with_context(|| format!("Dataset {name} not found"))?
        .contents_utf8()
        .context("README.txt is not UTF-8 encoded")
}

/// Extract a bundled dataset to a new directory
pub fn extract_dataset(name: &str, new_path: &Path) -> Result<()> {
    let sub_dir = DATASETS_DIR
        .get_dir(name)
        .with_context(|| format!("Dataset {name} not found"))?;

    ensure!(
        !new_path.exists(),
        "Destination directory {} already exists",
        new_path.display()
    );

    fs::create_dir(new_path)?;
    for entry in sub_dir.entries() {
        match entry {
            DirEntry::Dir(dir) => bail!(
                "Subdirectories in datasets are not supported ({})",
                dir.path().display()
            ),
            DirEntry::File(f) => {
                let file_name = f
                    .path()
                    .file_name()
                    .context("Bundled file has no name")?;
                fs::write(new_path.join(file_name), f.contents())?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_dataset_names() {
        assert!(dataset_names().any(|name| name == REFERENCE_DATASET));
    }

    #[test]
    fn test_dataset_readme() {
        assert!(dataset_readme(REFERENCE_DATASET).unwrap().contains("twelve land parcels"));
        assert!(dataset_readme("missing").is_err());
    }

    #[test]
    fn test_extract_dataset() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("reference");
        extract_dataset(REFERENCE_DATASET, &dest).unwrap();
        for file_name in ["parcels.toml", "locations.toml", "coordinates.csv", "README.txt"] {
            assert!(dest.join(file_name).is_file());
        }

        // Can't extract over an existing directory
        assert!(extract_dataset(REFERENCE_DATASET, &dest).is_err());
    }
}
