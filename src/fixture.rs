//! Fixtures for tests

use crate::catalog::Catalog;
use crate::geo::{Coordinate, CoordinateTable};
use crate::location::LocationHierarchy;
use crate::parcel::{LandParcel, Zoning};
use indexmap::indexmap;
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[fixture]
pub fn parcel() -> LandParcel {
    LandParcel {
        id: "land-001".into(),
        title: "Prime Residential Land".into(),
        address: "Lekki Phase 2, Lagos".into(),
        price: 85_000_000,
        size_sqm: 1000.0,
        zoning: Zoning::Residential,
        state: "Lagos".into(),
        city: "Lekki".into(),
        description: "Prime residential land in the heart of Lekki Phase 2.".into(),
        features: strings(&["Dry land", "Gated community"]),
        amenities: strings(&["Shopping Mall", "Hospital"]),
        documents: strings(&["Certificate of Occupancy", "Survey Plan"]),
        image: String::new(),
    }
}

#[fixture]
pub fn parcels(parcel: LandParcel) -> Vec<LandParcel> {
    vec![
        parcel,
        LandParcel {
            id: "land-002".into(),
            title: "Commercial Plot".into(),
            address: "Allen Avenue, Ikeja".into(),
            price: 250_000_000,
            size_sqm: 2000.0,
            zoning: Zoning::Commercial,
            state: "Lagos".into(),
            city: "Ikeja".into(),
            description: "Strategic commercial plot in the business district.".into(),
            features: strings(&["Corner piece", "High foot traffic"]),
            amenities: strings(&["Banks", "Hotels"]),
            documents: strings(&["Certificate of Occupancy", "Survey Plan"]),
            image: String::new(),
        },
        LandParcel {
            id: "land-004".into(),
            title: "Industrial Land".into(),
            address: "Agbara Industrial Estate, Ogun".into(),
            price: 120_000_000,
            size_sqm: 5000.0,
            zoning: Zoning::Industrial,
            state: "Ogun".into(),
            city: "Agbara".into(),
            description: "Industrial land ready for manufacturing.".into(),
            features: strings(&["Power supply", "Water access"]),
            amenities: strings(&["Logistics Hub"]),
            documents: strings(&["Certificate of Occupancy"]),
            image: String::new(),
        },
        LandParcel {
            id: "land-005".into(),
            title: "Agricultural Land".into(),
            address: "Epe, Lagos".into(),
            price: 25_000_000,
            size_sqm: 20_000.0,
            zoning: Zoning::Agricultural,
            state: "Lagos".into(),
            city: "Epe".into(),
            description: "Fertile agricultural land.".into(),
            features: strings(&["Fertile soil"]),
            amenities: strings(&["Farmers Market"]),
            documents: strings(&["Survey Plan"]),
            image: String::new(),
        },
    ]
}

#[fixture]
pub fn locations() -> LocationHierarchy {
    let mut locations = LocationHierarchy::new();
    locations
        .add_state("Lagos", ["Ikeja", "Lekki", "Epe"])
        .unwrap();
    locations.add_state("Abia", ["Aba", "Umuahia"]).unwrap();
    locations.add_state("Ogun", ["Abeokuta", "Agbara"]).unwrap();
    locations.add_state("Kogi", Vec::<String>::new()).unwrap();
    locations
}

#[fixture]
pub fn anchors() -> CoordinateTable {
    indexmap! {
        "Lagos".into() => Coordinate::new(6.5244, 3.3792),
        "Lekki".into() => Coordinate::new(6.4698, 3.5852),
        "Epe".into() => Coordinate::new(6.5841, 3.9834),
        "Ogun".into() => Coordinate::new(7.1608, 3.3481),
        "Agbara".into() => Coordinate::new(6.5301, 3.1136),
        "Abia".into() => Coordinate::new(5.4307, 7.5247),
    }
}

#[fixture]
pub fn catalog(
    parcels: Vec<LandParcel>,
    locations: LocationHierarchy,
    anchors: CoordinateTable,
) -> Catalog {
    Catalog::new(parcels, locations, anchors).unwrap()
}
