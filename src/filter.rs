//! Composes the user's search criteria into a single filtered view of a catalog.
//!
//! Every criterion is optional and all criteria are ANDed together. Filtering never reorders
//! parcels and never fails: criteria that match nothing simply give an empty result.
use crate::parcel::{LandParcel, Zoning};
use log::debug;
use std::borrow::Borrow;
use std::ops::RangeInclusive;

/// Upper bound of the price slider in the reference instance
pub const DEFAULT_PRICE_CEILING: u64 = 500_000_000;

/// Upper bound of the size slider in the reference instance, in square metres
pub const DEFAULT_SIZE_CEILING: f64 = 20_000.0;

/// The live bounds used when criteria are reset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterBounds {
    /// Highest price selectable
    pub price_ceiling: u64,
    /// Largest size selectable, in square metres
    pub size_ceiling: f64,
}

impl Default for FilterBounds {
    fn default() -> Self {
        Self {
            price_ceiling: DEFAULT_PRICE_CEILING,
            size_ceiling: DEFAULT_SIZE_CEILING,
        }
    }
}

/// The search criteria chosen by a user
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Only parcels in this state
    pub state: Option<String>,
    /// Only parcels in this city.
    ///
    /// Whether the city belongs to `state` is not checked here; callers should use
    /// [`crate::location::LocationHierarchy::cascade_city`] when the state changes.
    pub city: Option<String>,
    /// Only parcels with this zoning
    pub zoning: Option<Zoning>,
    /// Inclusive price range
    pub price_range: RangeInclusive<u64>,
    /// Inclusive size range, in square metres
    pub size_range: RangeInclusive<f64>,
    /// Case-insensitive free text
    pub search_text: Option<String>,
}

impl Default for FilterCriteria {
    /// Criteria which match every parcel
    fn default() -> Self {
        Self {
            state: None,
            city: None,
            zoning: None,
            price_range: 0..=u64::MAX,
            size_range: 0.0..=f64::INFINITY,
            search_text: None,
        }
    }
}

impl FilterCriteria {
    /// Criteria with nothing selected and the ranges opened to the given bounds.
    ///
    /// This is the state a user returns to when resetting all filters.
    pub fn with_bounds(bounds: &FilterBounds) -> Self {
        Self {
            price_range: 0..=bounds.price_ceiling,
            size_range: 0.0..=bounds.size_ceiling,
            ..Self::default()
        }
    }

    /// The lower-cased search query, or `None` if it imposes no restriction.
    ///
    /// Whitespace-only text counts as no query. Otherwise the text is matched as given, including
    /// any surrounding whitespace.
    pub fn search_query(&self) -> Option<String> {
        let text = self.search_text.as_deref()?;
        (!text.trim().is_empty()).then(|| text.to_lowercase())
    }
}

/// Whether the query (already lower-cased) occurs in any of the parcel's searchable text
pub fn matches_text(parcel: &LandParcel, query: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(query);

    parcel.searchable_text().into_iter().any(contains)
        || parcel.features.iter().map(String::as_str).any(contains)
        || parcel.amenities.iter().map(String::as_str).any(contains)
}

/// Whether a single parcel satisfies all of the criteria
pub fn matches(parcel: &LandParcel, criteria: &FilterCriteria) -> bool {
    matches_with_query(parcel, criteria, criteria.search_query().as_deref())
}

fn matches_with_query(parcel: &LandParcel, criteria: &FilterCriteria, query: Option<&str>) -> bool {
    // Location first, as it is the most selective
    if criteria.state.as_ref().is_some_and(|state| *state != parcel.state) {
        return false;
    }
    if criteria.city.as_ref().is_some_and(|city| *city != parcel.city) {
        return false;
    }

    if criteria.zoning.is_some_and(|zoning| zoning != parcel.zoning) {
        return false;
    }

    criteria.price_range.contains(&parcel.price)
        && criteria.size_range.contains(&parcel.size_sqm)
        && query.is_none_or(|query| matches_text(parcel, query))
}

/// Filter parcels by the given criteria, preserving their relative order.
///
/// Works with any slice of parcel handles (e.g. `&LandParcel` or `Rc<LandParcel>`), so the output
/// of one call can be fed straight back into another.
pub fn apply<P>(parcels: &[P], criteria: &FilterCriteria) -> Vec<P>
where
    P: Borrow<LandParcel> + Clone,
{
    let query = criteria.search_query();
    let results: Vec<P> = parcels
        .iter()
        .filter(|parcel| {
            matches_with_query(
                <P as Borrow<LandParcel>>::borrow(parcel),
                criteria,
                query.as_deref(),
            )
        })
        .cloned()
        .collect();

    debug!(
        "Filter kept {} of {} parcels",
        results.len(),
        parcels.len()
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::parcels;
    use itertools::Itertools;
    use rstest::rstest;

    fn ids(parcels: &[&LandParcel]) -> Vec<String> {
        parcels.iter().map(|parcel| parcel.id.to_string()).collect()
    }

    #[rstest]
    fn test_apply_default_is_identity(parcels: Vec<LandParcel>) {
        let refs = parcels.iter().collect_vec();
        assert_eq!(apply(&refs, &FilterCriteria::default()), refs);
    }

    #[rstest]
    fn test_apply_reset_bounds_keeps_everything(parcels: Vec<LandParcel>) {
        let refs = parcels.iter().collect_vec();
        let criteria = FilterCriteria::with_bounds(&FilterBounds::default());
        assert_eq!(apply(&refs, &criteria), refs);
    }

    #[rstest]
    #[case(FilterCriteria { state: Some("Lagos".into()), ..Default::default() }, &["land-001", "land-002", "land-005"])]
    #[case(FilterCriteria { state: Some("Kano".into()), ..Default::default() }, &[])]
    #[case(FilterCriteria { city: Some("Agbara".into()), ..Default::default() }, &["land-004"])]
    #[case(FilterCriteria { zoning: Some(Zoning::Residential), ..Default::default() }, &["land-001"])]
    #[case(
        FilterCriteria { state: Some("Lagos".into()), zoning: Some(Zoning::Commercial), ..Default::default() },
        &["land-002"]
    )]
    #[case(FilterCriteria { price_range: 25_000_000..=120_000_000, ..Default::default() }, &["land-001", "land-004", "land-005"])]
    #[case(FilterCriteria { price_range: 25_000_001..=119_999_999, ..Default::default() }, &["land-001"])]
    #[case(FilterCriteria { size_range: 2000.0..=5000.0, ..Default::default() }, &["land-002", "land-004"])]
    fn test_apply(
        parcels: Vec<LandParcel>,
        #[case] criteria: FilterCriteria,
        #[case] expected: &[&str],
    ) {
        let refs = parcels.iter().collect_vec();
        assert_eq!(ids(&apply(&refs, &criteria)), expected);
    }

    #[rstest]
    #[case("lekki", &["land-001"])]
    #[case("LEKKI", &["land-001"])]
    #[case("lekki   ", &[])] // trailing spaces occur in no field
    #[case("heart of lekki", &["land-001"])]
    #[case("survey", &[])] // documents are not searched
    #[case("power supply", &["land-004"])] // features
    #[case("bank", &["land-002"])] // amenities
    #[case("ogun", &["land-004"])] // state
    #[case("", &["land-001", "land-002", "land-004", "land-005"])]
    #[case("   ", &["land-001", "land-002", "land-004", "land-005"])]
    fn test_apply_search_text(
        parcels: Vec<LandParcel>,
        #[case] text: &str,
        #[case] expected: &[&str],
    ) {
        let refs = parcels.iter().collect_vec();
        let criteria = FilterCriteria {
            search_text: Some(text.into()),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&refs, &criteria)), expected);
    }

    #[rstest]
    fn test_apply_is_idempotent(parcels: Vec<LandParcel>) {
        let refs = parcels.iter().collect_vec();
        let criteria = FilterCriteria {
            price_range: 0..=100_000_000,
            search_text: Some("land".into()),
            ..Default::default()
        };
        let once = apply(&refs, &criteria);
        assert_eq!(apply(&once, &criteria), once);
    }

    #[rstest]
    fn test_apply_price_range_respected(parcels: Vec<LandParcel>) {
        let refs = parcels.iter().collect_vec();
        let range = 30_000_000..=100_000_000;
        let criteria = FilterCriteria {
            price_range: range.clone(),
            ..Default::default()
        };
        let results = apply(&refs, &criteria);
        assert!(results.iter().all(|parcel| range.contains(&parcel.price)));
        for parcel in &parcels {
            if !range.contains(&parcel.price) {
                assert!(!results.contains(&parcel));
            }
        }
    }

    #[test]
    fn test_search_query() {
        let criteria = FilterCriteria {
            search_text: Some(" Gated Estate ".into()),
            ..Default::default()
        };
        assert_eq!(criteria.search_query().as_deref(), Some(" gated estate "));
        assert_eq!(FilterCriteria::default().search_query(), None);
    }
}
