//! Land parcels are the individual listings in a catalog.
use crate::id::define_id_type;
use crate::units::{Area, Money};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

define_id_type! {ParcelID}

/// The permitted-use category of a parcel
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Zoning {
    /// Housing
    Residential,
    /// Offices, retail and hospitality
    Commercial,
    /// Manufacturing, warehousing and logistics
    Industrial,
    /// Farming
    Agricultural,
    /// A combination of residential and commercial use
    MixedUse,
}

/// A single land listing.
///
/// Parcels are immutable once a catalog has been loaded.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LandParcel {
    /// Unique identifier for the parcel (e.g. "land-001")
    pub id: ParcelID,
    /// Short display title
    pub title: String,
    /// Street address, for display only
    pub address: String,
    /// Asking price in whole currency units
    pub price: u64,
    /// Size in square metres
    #[serde(rename = "size")]
    pub size_sqm: f64,
    /// The permitted use of the land
    pub zoning: Zoning,
    /// The state in which the parcel lies
    pub state: String,
    /// The city in which the parcel lies
    pub city: String,
    /// Longer free-text description
    pub description: String,
    /// Selling points of the parcel itself
    #[serde(default)]
    pub features: Vec<String>,
    /// Nearby amenities
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Title documents available for the parcel (e.g. "Survey Plan")
    #[serde(default)]
    pub documents: Vec<String>,
    /// URL of a representative image. Not interpreted.
    #[serde(default)]
    pub image: String,
}

impl LandParcel {
    /// The asking price as a [`Money`] amount
    pub fn price_money(&self) -> Money {
        Money(self.price as f64)
    }

    /// The size of the parcel as an [`Area`]
    pub fn area(&self) -> Area {
        Area(self.size_sqm)
    }

    /// The single-valued text fields that free-text search looks at
    pub fn searchable_text(&self) -> [&str; 5] {
        [
            &self.title,
            &self.address,
            &self.description,
            &self.state,
            &self.city,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::parcel;
    use rstest::rstest;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[rstest]
    #[case("residential", Zoning::Residential)]
    #[case("Commercial", Zoning::Commercial)]
    #[case("mixed-use", Zoning::MixedUse)]
    fn test_zoning_from_str(#[case] s: &str, #[case] expected: Zoning) {
        assert_eq!(Zoning::from_str(s).unwrap(), expected);
    }

    #[test]
    fn test_zoning_from_str_invalid() {
        assert!(Zoning::from_str("mixed").is_err());
    }

    #[test]
    fn test_zoning_display_round_trips() {
        for zoning in Zoning::iter() {
            assert_eq!(Zoning::from_str(&zoning.to_string()).unwrap(), zoning);
        }
    }

    #[rstest]
    fn test_price_and_area(parcel: LandParcel) {
        assert_eq!(parcel.price_money(), Money(85_000_000.0));
        assert_eq!(parcel.area(), Area(1000.0));
    }
}
