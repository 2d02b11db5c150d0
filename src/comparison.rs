//! The bounded selection of parcels a user is comparing side by side.
use crate::catalog::Catalog;
use crate::format::{format_naira, format_size};
use crate::parcel::{LandParcel, ParcelID};
use derive_more::Display;
use itertools::Itertools;
use log::warn;

/// The maximum number of parcels that can be compared at once
pub const MAX_COMPARISON_SIZE: usize = 4;

/// Why a parcel could not be added to a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RejectReason {
    /// The comparison already holds [`MAX_COMPARISON_SIZE`] parcels
    #[display("You can compare up to {MAX_COMPARISON_SIZE} parcels at once. Remove one to add another.")]
    LimitReached,
}

/// The result of toggling a parcel in a [`ComparisonSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The parcel was appended
    Added,
    /// The parcel was already present and has been removed
    Removed,
    /// The parcel was not added and the set is unchanged
    Rejected(RejectReason),
}

impl ToggleOutcome {
    /// A message describing the outcome for the given parcel title
    pub fn message(&self, title: &str) -> String {
        match self {
            Self::Added => format!("{title} has been added to your comparison list"),
            Self::Removed => format!("{title} has been removed from your comparison list"),
            Self::Rejected(reason) => reason.to_string(),
        }
    }
}

/// An ordered set of at most [`MAX_COMPARISON_SIZE`] distinct parcel IDs.
///
/// Insertion order is the column order of the comparison table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonSet(Vec<ParcelID>);

impl ComparisonSet {
    /// Create an empty comparison
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the parcel if absent or remove it if present.
    ///
    /// Adding to a full set is rejected and leaves the set as it was; nothing is ever evicted.
    pub fn toggle(mut self, id: &ParcelID) -> (Self, ToggleOutcome) {
        if let Some(index) = self.0.iter().position(|existing| existing == id) {
            self.0.remove(index);
            return (self, ToggleOutcome::Removed);
        }

        if self.0.len() >= MAX_COMPARISON_SIZE {
            return (self, ToggleOutcome::Rejected(RejectReason::LimitReached));
        }

        self.0.push(id.clone());
        (self, ToggleOutcome::Added)
    }

    /// Whether the parcel is being compared
    pub fn contains(&self, id: &ParcelID) -> bool {
        self.0.contains(id)
    }

    /// The parcel IDs in column order
    pub fn ids(&self) -> &[ParcelID] {
        &self.0
    }

    /// The number of parcels being compared
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is being compared
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether no more parcels can be added
    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_COMPARISON_SIZE
    }
}

/// One labelled row of a comparison table, with one cell per compared parcel
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    /// Row heading
    pub label: &'static str,
    /// Cell contents, in column order
    pub cells: Vec<String>,
}

/// A side-by-side view of the parcels in a [`ComparisonSet`]
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonTable {
    /// Column headings (parcel titles)
    pub headings: Vec<String>,
    /// The IDs of the parcels in each column
    pub ids: Vec<ParcelID>,
    /// The rows of the table
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    /// Build the table for a comparison, looking parcels up in the catalog.
    ///
    /// IDs which are not in the catalog are skipped.
    pub fn new(set: &ComparisonSet, catalog: &Catalog) -> Self {
        let parcels = set
            .ids()
            .iter()
            .filter_map(|id| {
                let parcel = catalog.get(id);
                if parcel.is_none() {
                    warn!("Parcel {id} is not in the catalog and will not be compared");
                }
                parcel
            })
            .collect_vec();

        Self::from_parcels(&parcels)
    }

    /// Build the table for the given parcels, in order
    pub fn from_parcels(parcels: &[&LandParcel]) -> Self {
        let row = |label, cell: fn(&LandParcel) -> String| ComparisonRow {
            label,
            cells: parcels.iter().map(|parcel| cell(parcel)).collect(),
        };

        Self {
            headings: parcels.iter().map(|parcel| parcel.title.clone()).collect(),
            ids: parcels.iter().map(|parcel| parcel.id.clone()).collect(),
            rows: vec![
                row("Price", |parcel| format_naira(parcel.price as f64)),
                row("Location", |parcel| parcel.address.clone()),
                row("Size", |parcel| format_size(parcel.size_sqm)),
                row("Zoning", |parcel| parcel.zoning.to_string()),
                row("Documents", |parcel| parcel.documents.join(", ")),
                row("Features", |parcel| parcel.features.join(", ")),
            ],
        }
    }
}
