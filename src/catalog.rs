//! The catalog of land parcels available for discovery.
use crate::dataset::{REFERENCE_DATASET, extract_dataset};
use crate::filter::{self, FilterCriteria};
use crate::geo::{CoordinateTable, GeoResolver};
use crate::id::IDCollection;
use crate::input::load_catalog;
use crate::location::LocationHierarchy;
use crate::parcel::{LandParcel, ParcelID, Zoning};
use anyhow::{Context, Result, ensure};
use indexmap::IndexSet;
use std::ops::RangeInclusive;
use std::path::Path;
use std::rc::Rc;
use tempfile::TempDir;

/// An immutable collection of parcels together with the location data used to filter and map
/// them.
///
/// Every parcel has a unique ID, a positive size and a `(state, city)` pair which is listed in
/// the location hierarchy.
///
/// Parcels and their IDs are reference counted with [`Rc`], so cloning a catalog or handing out
/// search results is cheap but a catalog cannot be sent to or shared between threads. A
/// multi-threaded host should load one catalog per thread.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    parcels: Vec<Rc<LandParcel>>,
    ids: IndexSet<ParcelID>,
    locations: LocationHierarchy,
    anchors: CoordinateTable,
}

/// Check that a single parcel is consistent with the location hierarchy
fn check_parcel(parcel: &LandParcel, locations: &LocationHierarchy) -> Result<()> {
    ensure!(!parcel.id.0.trim().is_empty(), "Parcel IDs cannot be empty");
    ensure!(
        parcel.size_sqm.is_finite() && parcel.size_sqm > 0.0,
        "Size of parcel {} must be a finite number greater than zero",
        parcel.id
    );
    ensure!(
        locations.contains(&parcel.state, &parcel.city),
        "Parcel {} is in {}, {} which is not a known state and city",
        parcel.id,
        parcel.city,
        parcel.state
    );

    Ok(())
}

impl Catalog {
    /// Create a catalog, checking that the parcels are consistent with the location hierarchy.
    ///
    /// Parcels keep the order in which they are given.
    pub fn new(
        parcels: Vec<LandParcel>,
        locations: LocationHierarchy,
        anchors: CoordinateTable,
    ) -> Result<Self> {
        let mut ids = IndexSet::with_capacity(parcels.len());
        for parcel in &parcels {
            check_parcel(parcel, &locations)?;
            ensure!(
                ids.insert(parcel.id.clone()),
                "Duplicate parcel ID {}",
                parcel.id
            );
        }

        Ok(Self {
            parcels: parcels.into_iter().map(Rc::new).collect(),
            ids,
            locations,
            anchors,
        })
    }

    /// Load a catalog from a dataset directory
    pub fn from_path<P: AsRef<Path>>(dataset_dir: P) -> Result<Self> {
        load_catalog(dataset_dir)
    }

    /// Load the bundled reference catalog
    pub fn reference() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temporary directory.")?;
        let dataset_dir = temp_dir.path().join(REFERENCE_DATASET);
        extract_dataset(REFERENCE_DATASET, &dataset_dir)?;
        Self::from_path(dataset_dir)
    }

    /// All parcels, in catalog order
    pub fn parcels(&self) -> &[Rc<LandParcel>] {
        &self.parcels
    }

    /// The IDs of all parcels, in catalog order
    pub fn parcel_ids(&self) -> &IndexSet<ParcelID> {
        &self.ids
    }

    /// Look up a parcel by ID
    pub fn get(&self, id: &ParcelID) -> Option<&LandParcel> {
        let index = self.ids.get_index_of(id)?;
        self.parcels.get(index).map(|parcel| &**parcel)
    }

    /// Look up a parcel by its string ID, failing if it is not in the catalog
    pub fn get_by_str(&self, id: &str) -> Result<&LandParcel> {
        let id = self.ids.get_id_by_str(id)?;
        self.get(&id).context("Parcel index is out of sync")
    }

    /// The number of parcels in the catalog
    pub fn len(&self) -> usize {
        self.parcels.len()
    }

    /// Whether the catalog has no parcels
    pub fn is_empty(&self) -> bool {
        self.parcels.is_empty()
    }

    /// The state and city hierarchy
    pub fn locations(&self) -> &LocationHierarchy {
        &self.locations
    }

    /// Known anchor coordinates, keyed by city or state name
    pub fn anchors(&self) -> &CoordinateTable {
        &self.anchors
    }

    /// A resolver for placing this catalog's parcels on a map, with the default jitter
    pub fn resolver(&self) -> GeoResolver {
        GeoResolver::new(self.anchors.clone())
    }

    /// Parcels matching the given criteria, in catalog order
    pub fn search(&self, criteria: &FilterCriteria) -> Vec<Rc<LandParcel>> {
        filter::apply(&self.parcels, criteria)
    }

    /// Parcels in the given state
    pub fn parcels_in_state(&self, state: &str) -> Vec<Rc<LandParcel>> {
        self.search(&FilterCriteria {
            state: Some(state.into()),
            ..Default::default()
        })
    }

    /// Parcels in the given city
    pub fn parcels_in_city(&self, city: &str) -> Vec<Rc<LandParcel>> {
        self.search(&FilterCriteria {
            city: Some(city.into()),
            ..Default::default()
        })
    }

    /// Parcels with the given zoning
    pub fn parcels_in_zoning(&self, zoning: Zoning) -> Vec<Rc<LandParcel>> {
        self.search(&FilterCriteria {
            zoning: Some(zoning),
            ..Default::default()
        })
    }

    /// Parcels whose price lies in the (inclusive) range
    pub fn parcels_in_price_range(&self, range: RangeInclusive<u64>) -> Vec<Rc<LandParcel>> {
        self.search(&FilterCriteria {
            price_range: range,
            ..Default::default()
        })
    }

    /// Parcels whose size in square metres lies in the (inclusive) range
    pub fn parcels_in_size_range(&self, range: RangeInclusive<f64>) -> Vec<Rc<LandParcel>> {
        self.search(&FilterCriteria {
            size_range: range,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{anchors, assert_error, catalog, locations, parcels};
    use itertools::assert_equal;
    use rstest::rstest;

    fn ids(parcels: &[Rc<LandParcel>]) -> Vec<&str> {
        parcels.iter().map(|parcel| &*parcel.id.0).collect()
    }

    #[rstest]
    fn test_new_preserves_order(catalog: Catalog) {
        assert_eq!(
            ids(catalog.parcels()),
            ["land-001", "land-002", "land-004", "land-005"]
        );
        assert_equal(
            catalog.parcel_ids().iter().map(ToString::to_string),
            ["land-001", "land-002", "land-004", "land-005"],
        );
    }

    #[rstest]
    fn test_new_duplicate_id(
        mut parcels: Vec<LandParcel>,
        locations: LocationHierarchy,
        anchors: CoordinateTable,
    ) {
        parcels.push(parcels[0].clone());
        assert_error!(
            Catalog::new(parcels, locations, anchors),
            "Duplicate parcel ID land-001"
        );
    }

    #[rstest]
    fn test_new_unknown_city(
        mut parcels: Vec<LandParcel>,
        locations: LocationHierarchy,
        anchors: CoordinateTable,
    ) {
        parcels[1].city = "Victoria Island".into();
        assert_error!(
            Catalog::new(parcels, locations, anchors),
            "Parcel land-002 is in Victoria Island, Lagos which is not a known state and city"
        );
    }

    #[rstest]
    #[case(0.0)]
    #[case(-10.0)]
    #[case(f64::NAN)]
    fn test_new_bad_size(
        mut parcels: Vec<LandParcel>,
        locations: LocationHierarchy,
        anchors: CoordinateTable,
        #[case] size: f64,
    ) {
        parcels[0].size_sqm = size;
        assert_error!(
            Catalog::new(parcels, locations, anchors),
            "Size of parcel land-001 must be a finite number greater than zero"
        );
    }

    #[rstest]
    fn test_new_empty_id(
        mut parcels: Vec<LandParcel>,
        locations: LocationHierarchy,
        anchors: CoordinateTable,
    ) {
        parcels[0].id = ParcelID::new(" ");
        assert_error!(
            Catalog::new(parcels, locations, anchors),
            "Parcel IDs cannot be empty"
        );
    }

    #[rstest]
    fn test_get(catalog: Catalog) {
        let parcel = catalog.get(&"land-004".into()).unwrap();
        assert_eq!(parcel.title, "Industrial Land");
        assert!(catalog.get(&"land-999".into()).is_none());

        assert_eq!(catalog.get_by_str("land-005").unwrap().city, "Epe");
        assert_error!(catalog.get_by_str("land-999"), "Unknown ID land-999 found");
    }

    #[rstest]
    fn test_single_predicate_views(catalog: Catalog) {
        assert_eq!(
            ids(&catalog.parcels_in_state("Lagos")),
            ["land-001", "land-002", "land-005"]
        );
        assert_eq!(ids(&catalog.parcels_in_city("Agbara")), ["land-004"]);
        assert_eq!(
            ids(&catalog.parcels_in_zoning(Zoning::Agricultural)),
            ["land-005"]
        );
        assert_eq!(
            ids(&catalog.parcels_in_price_range(100_000_000..=300_000_000)),
            ["land-002", "land-004"]
        );
        assert_eq!(
            ids(&catalog.parcels_in_size_range(1000.0..=2000.0)),
            ["land-001", "land-002"]
        );
    }

    #[test]
    fn test_reference() {
        let catalog = Catalog::reference().unwrap();
        assert_eq!(catalog.len(), 12);
        assert_eq!(catalog.locations().len(), 37);
        assert_eq!(catalog.anchors().len(), 18);
    }
}
