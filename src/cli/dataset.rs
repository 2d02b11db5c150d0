//! The `dataset` subcommands, for working with the bundled datasets.
use crate::dataset::{dataset_names, dataset_readme, extract_dataset};
use anyhow::Result;
use clap::Subcommand;
use std::path::{Path, PathBuf};

/// The available subcommands for managing bundled datasets.
#[derive(Subcommand)]
pub enum DatasetSubcommands {
    /// List bundled datasets.
    List,
    /// Provide information about the specified dataset.
    Info {
        /// The name of the dataset.
        name: String,
    },
    /// Extract a bundled dataset to a new directory, e.g. to use as a template for your own.
    Extract {
        /// The name of the dataset to extract.
        name: String,
        /// The destination folder for the dataset (defaults to its name).
        new_path: Option<PathBuf>,
    },
}

impl DatasetSubcommands {
    /// Execute the supplied dataset subcommand
    pub fn execute(self) -> Result<()> {
        match self {
            Self::List => {
                for name in dataset_names() {
                    println!("{name}");
                }
            }
            Self::Info { name } => println!("{}", dataset_readme(&name)?),
            Self::Extract { name, new_path } => {
                let dest = new_path.as_deref().unwrap_or(Path::new(&name));
                extract_dataset(&name, dest)?;
            }
        }

        Ok(())
    }
}
