//! The state → city hierarchy used to validate parcel locality and drive cascading filters.
use anyhow::{Result, ensure};
use indexmap::{IndexMap, IndexSet};
use unicase::UniCase;

/// An ordered mapping from state name to the names of the cities in that state.
///
/// City names are unique within a state. A state may have no cities at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationHierarchy(IndexMap<String, IndexSet<String>>);

impl LocationHierarchy {
    /// Create an empty hierarchy
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a state with its cities, preserving their order.
    ///
    /// Fails if the state is already present or a city appears twice.
    pub fn add_state<I, S>(&mut self, state: &str, cities: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ensure!(!state.trim().is_empty(), "State name cannot be empty");
        ensure!(
            !self.0.contains_key(state),
            "State {state} is defined more than once"
        );

        let mut set = IndexSet::new();
        for city in cities {
            let city = city.into();
            ensure!(!city.trim().is_empty(), "Empty city name in state {state}");
            ensure!(
                !set.contains(&city),
                "City {city} appears more than once in state {state}"
            );
            set.insert(city);
        }
        self.0.insert(state.to_string(), set);

        Ok(())
    }

    /// State names, in order
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// The number of states in the hierarchy
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the hierarchy has no states
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the state is known
    pub fn contains_state(&self, state: &str) -> bool {
        self.0.contains_key(state)
    }

    /// Whether `city` is listed under `state`
    pub fn contains(&self, state: &str, city: &str) -> bool {
        self.0.get(state).is_some_and(|cities| cities.contains(city))
    }

    /// The cities of a state, in order. Unknown states have no cities.
    pub fn cities(&self, state: &str) -> impl Iterator<Item = &str> {
        self.0
            .get(state)
            .into_iter()
            .flat_map(|cities| cities.iter().map(String::as_str))
    }

    /// Every city of every state, in order
    pub fn all_cities(&self) -> impl Iterator<Item = &str> {
        self.0.values().flatten().map(String::as_str)
    }

    /// The city selection that survives a change of state.
    ///
    /// The current city is kept only if the new state lists it; otherwise the selection is reset.
    pub fn cascade_city(&self, new_state: Option<&str>, current_city: Option<&str>) -> Option<String> {
        let state = new_state?;
        let city = current_city?;
        self.contains(state, city).then(|| city.to_string())
    }

    /// Find the canonical spelling of a state name, ignoring case
    pub fn find_state(&self, name: &str) -> Option<&str> {
        let name = UniCase::new(name.trim());
        self.states().find(|state| UniCase::new(*state) == name)
    }

    /// Find the canonical spelling of a city name within a state, ignoring case
    pub fn find_city(&self, state: &str, name: &str) -> Option<&str> {
        let name = UniCase::new(name.trim());
        self.cities(state).find(|city| UniCase::new(*city) == name)
    }
}
