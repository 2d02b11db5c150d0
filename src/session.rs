//! Caller-owned state for a single user browsing a catalog.
//!
//! The catalog itself is never modified; a session only records what the user has chosen.
use crate::catalog::Catalog;
use crate::comparison::{ComparisonSet, ToggleOutcome};
use crate::filter::{FilterBounds, FilterCriteria};
use crate::geo::{GeoResolver, MapMarker};
use crate::parcel::{LandParcel, ParcelID, Zoning};
use log::debug;
use rand::Rng;
use std::mem;
use std::rc::Rc;

/// The filters, comparison list and selected parcel of one user
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverySession {
    /// The current search criteria
    pub criteria: FilterCriteria,
    comparison: ComparisonSet,
    selected: Option<ParcelID>,
}

impl DiscoverySession {
    /// Start a session with no filters and the ranges opened to `bounds`
    pub fn new(bounds: &FilterBounds) -> Self {
        Self {
            criteria: FilterCriteria::with_bounds(bounds),
            comparison: ComparisonSet::new(),
            selected: None,
        }
    }

    /// Change the selected state, clearing the city if the new state does not contain it
    pub fn set_state(&mut self, state: Option<&str>, catalog: &Catalog) {
        let city = catalog
            .locations()
            .cascade_city(state, self.criteria.city.as_deref());
        if city.is_none() && self.criteria.city.is_some() {
            debug!("City selection cleared by change of state");
        }

        self.criteria.state = state.map(ToString::to_string);
        self.criteria.city = city;
    }

    /// Change the selected city
    pub fn set_city(&mut self, city: Option<&str>) {
        self.criteria.city = city.map(ToString::to_string);
    }

    /// Change the selected zoning
    pub fn set_zoning(&mut self, zoning: Option<Zoning>) {
        self.criteria.zoning = zoning;
    }

    /// Change the free-text search
    pub fn set_search_text(&mut self, text: &str) {
        self.criteria.search_text = Some(text.to_string());
    }

    /// Clear all filters, opening the ranges to `bounds`. The comparison list is kept.
    pub fn reset(&mut self, bounds: &FilterBounds) {
        self.criteria = FilterCriteria::with_bounds(bounds);
    }

    /// The parcels matching the current criteria
    pub fn results(&self, catalog: &Catalog) -> Vec<Rc<LandParcel>> {
        catalog.search(&self.criteria)
    }

    /// Map markers for the parcels matching the current criteria
    pub fn markers<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        resolver: &GeoResolver,
        rng: &mut R,
    ) -> Vec<MapMarker> {
        let results = self.results(catalog);
        resolver.markers(results.iter().map(|parcel| &**parcel), rng)
    }

    /// Add the parcel to the comparison list, or remove it if it is already there
    pub fn toggle_compare(&mut self, id: &ParcelID) -> ToggleOutcome {
        let (comparison, outcome) = mem::take(&mut self.comparison).toggle(id);
        self.comparison = comparison;
        outcome
    }

    /// The parcels being compared
    pub fn comparison(&self) -> &ComparisonSet {
        &self.comparison
    }

    /// Handle a click on a map marker.
    ///
    /// Returns the parcel, or `None` (leaving the selection unchanged) if the ID is unknown.
    pub fn select_marker<'a>(
        &mut self,
        id: &ParcelID,
        catalog: &'a Catalog,
    ) -> Option<&'a LandParcel> {
        let parcel = catalog.get(id)?;
        self.selected = Some(parcel.id.clone());
        Some(parcel)
    }

    /// The parcel most recently selected on the map
    pub fn selected<'a>(&self, catalog: &'a Catalog) -> Option<&'a LandParcel> {
        catalog.get(self.selected.as_ref()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::RejectReason;
    use crate::fixture::catalog;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::{fixture, rstest};

    #[fixture]
    fn session() -> DiscoverySession {
        DiscoverySession::new(&FilterBounds::default())
    }

    fn ids(parcels: &[Rc<LandParcel>]) -> Vec<String> {
        parcels.iter().map(|parcel| parcel.id.to_string()).collect()
    }

    #[rstest]
    fn test_new_session_shows_everything(session: DiscoverySession, catalog: Catalog) {
        assert_eq!(session.results(&catalog).len(), catalog.len());
        assert!(session.comparison().is_empty());
        assert!(session.selected(&catalog).is_none());
    }

    #[rstest]
    fn test_set_state_cascades_city(mut session: DiscoverySession, catalog: Catalog) {
        session.set_state(Some("Lagos"), &catalog);
        session.set_city(Some("Epe"));
        assert_eq!(ids(&session.results(&catalog)), ["land-005"]);

        // Epe is still in Lagos
        session.set_state(Some("Lagos"), &catalog);
        assert_eq!(session.criteria.city.as_deref(), Some("Epe"));

        // ...but not in Ogun
        session.set_state(Some("Ogun"), &catalog);
        assert_eq!(session.criteria.city, None);
        assert_eq!(ids(&session.results(&catalog)), ["land-004"]);
    }

    #[rstest]
    fn test_reset_keeps_comparison(mut session: DiscoverySession, catalog: Catalog) {
        session.set_zoning(Some(Zoning::Industrial));
        session.set_search_text("agbara");
        assert_eq!(session.toggle_compare(&"land-001".into()), ToggleOutcome::Added);

        session.reset(&FilterBounds::default());
        assert_eq!(session.results(&catalog).len(), catalog.len());
        assert_eq!(session.comparison().len(), 1);
    }

    #[rstest]
    fn test_toggle_compare_limit(mut session: DiscoverySession) {
        for id in ["a", "b", "c", "d"] {
            assert_eq!(session.toggle_compare(&id.into()), ToggleOutcome::Added);
        }
        assert_eq!(
            session.toggle_compare(&"e".into()),
            ToggleOutcome::Rejected(RejectReason::LimitReached)
        );
        assert_eq!(session.comparison().len(), 4);
        assert_eq!(session.toggle_compare(&"a".into()), ToggleOutcome::Removed);
    }

    #[rstest]
    fn test_select_marker(mut session: DiscoverySession, catalog: Catalog) {
        let parcel = session.select_marker(&"land-004".into(), &catalog).unwrap();
        assert_eq!(parcel.title, "Industrial Land");

        // Unknown IDs leave the selection alone
        assert!(session.select_marker(&"land-999".into(), &catalog).is_none());
        assert_eq!(
            session.selected(&catalog).unwrap().id,
            ParcelID::new("land-004")
        );
    }

    #[rstest]
    fn test_markers_follow_results(mut session: DiscoverySession, catalog: Catalog) {
        session.set_state(Some("Ogun"), &catalog);
        let resolver = catalog.resolver();
        let markers = session.markers(&catalog, &resolver, &mut ChaCha8Rng::seed_from_u64(0));
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].title, "Industrial Land");
    }
}
