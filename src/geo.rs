//! Approximate map coordinates for parcels.
//!
//! Parcels carry no coordinates of their own. Instead, a parcel is anchored to a known point for
//! its city or, failing that, its state, or failing that a fixed default anchor. A small random
//! offset is then added so that markers for parcels in the same city do not sit on top of each
//! other. The offset is purely cosmetic: resolved coordinates must not be used for distances or
//! routing.
use crate::parcel::{LandParcel, ParcelID};
use indexmap::IndexMap;
use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The anchor used when neither a parcel's city nor its state has a known coordinate (Lagos)
pub const DEFAULT_ANCHOR: Coordinate = Coordinate {
    lat: 6.5244,
    lng: 3.3792,
};

/// The default maximum jitter applied on each axis, in degrees
pub const DEFAULT_JITTER: f64 = 0.005;

/// A point on the map, in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

impl Coordinate {
    /// Create a new coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both axes of `other` lie within `tolerance` degrees of this point
    pub fn is_within(&self, other: &Coordinate, tolerance: f64) -> bool {
        (self.lat - other.lat).abs() <= tolerance && (self.lng - other.lng).abs() <= tolerance
    }
}

/// A table of anchor coordinates, keyed by city or state name
pub type CoordinateTable = IndexMap<String, Coordinate>;

/// Which tier of the lookup chain produced a parcel's base coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorSource {
    /// The parcel's city had a known coordinate
    City,
    /// The city was unknown but the parcel's state had a known coordinate
    State,
    /// Neither was known, so the default anchor was used
    Default,
}

/// A marker to be drawn by the map collaborator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    /// The parcel the marker represents. Reported back when the marker is clicked.
    pub parcel_id: ParcelID,
    /// Marker label
    pub title: String,
    /// Where to draw the marker
    #[serde(flatten)]
    pub coordinate: Coordinate,
}

/// Resolves parcels to approximate map coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct GeoResolver {
    anchors: CoordinateTable,
    default_anchor: Coordinate,
    jitter: f64,
}

impl GeoResolver {
    /// Create a resolver over the given anchor table with the default anchor and jitter
    pub fn new(anchors: CoordinateTable) -> Self {
        Self {
            anchors,
            default_anchor: DEFAULT_ANCHOR,
            jitter: DEFAULT_JITTER,
        }
    }

    /// Use a different anchor for parcels whose city and state are both unknown
    pub fn with_default_anchor(mut self, anchor: Coordinate) -> Self {
        self.default_anchor = anchor;
        self
    }

    /// Set the maximum offset applied on each axis, in degrees. Zero disables jitter.
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = if jitter.is_finite() { jitter.abs() } else { 0.0 };
        self
    }

    /// The maximum offset applied on each axis, in degrees
    pub fn jitter(&self) -> f64 {
        self.jitter
    }

    /// The anchor table
    pub fn anchors(&self) -> &CoordinateTable {
        &self.anchors
    }

    /// Look up the base coordinate for a parcel: city first, then state, then the default
    pub fn resolve_base(&self, parcel: &LandParcel) -> (Coordinate, AnchorSource) {
        if let Some(coordinate) = self.anchors.get(&parcel.city) {
            return (*coordinate, AnchorSource::City);
        }

        if let Some(coordinate) = self.anchors.get(&parcel.state) {
            debug!(
                "No anchor for city {} of parcel {}; using state {}",
                parcel.city, parcel.id, parcel.state
            );
            return (*coordinate, AnchorSource::State);
        }

        warn!(
            "No anchor for {}, {} (parcel {}); using default anchor",
            parcel.city, parcel.state, parcel.id
        );
        (self.default_anchor, AnchorSource::Default)
    }

    /// Resolve a parcel to a jittered map coordinate.
    ///
    /// The offset is drawn uniformly from `[-jitter, jitter]` on each axis using `rng`, so tests
    /// can pass a seeded generator.
    pub fn resolve<R: Rng + ?Sized>(&self, parcel: &LandParcel, rng: &mut R) -> Coordinate {
        let (base, _) = self.resolve_base(parcel);
        if self.jitter <= 0.0 {
            return base;
        }

        Coordinate {
            lat: base.lat + rng.gen_range(-self.jitter..=self.jitter),
            lng: base.lng + rng.gen_range(-self.jitter..=self.jitter),
        }
    }

    /// Resolve one marker per parcel, preserving order
    pub fn markers<'a, I, R>(&self, parcels: I, rng: &mut R) -> Vec<MapMarker>
    where
        I: IntoIterator<Item = &'a LandParcel>,
        R: Rng + ?Sized,
    {
        parcels
            .into_iter()
            .map(|parcel| MapMarker {
                parcel_id: parcel.id.clone(),
                title: parcel.title.clone(),
                coordinate: self.resolve(parcel, rng),
            })
            .collect()
    }
}
