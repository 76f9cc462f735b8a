//! Street diffing keyed by OpenStreetMap id.

use std::collections::{HashMap, HashSet};

use crate::overpass::Way;
use crate::storage::{NewStreet, Street};

/// Changes needed to bring stored streets in line with a fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreetDiff {
    /// Known `osm_id`s whose district or names changed
    pub updates: Vec<NewStreet>,
    /// Unknown `osm_id`s
    pub inserts: Vec<NewStreet>,
    /// Stored `osm_id`s absent from the fetch
    pub deletes: Vec<i64>,
    pub unchanged: usize,
}

impl StreetDiff {
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.inserts.is_empty() && self.deletes.is_empty()
    }
}

/// Converts a way into a street of `district_id`.
///
/// `name:en` and `name:ka` fall back to the local `name` tag. Ways with no
/// usable name yield `None`.
pub fn street_from_way(way: &Way, district_id: i64) -> Option<NewStreet> {
    let name = way.tag("name");
    let name_en = way.tag("name:en").or(name)?;
    let name_ka = way.tag("name:ka").or(name)?;
    Some(NewStreet {
        district_id,
        name_en: name_en.to_string(),
        name_ka: name_ka.to_string(),
        osm_id: way.id,
    })
}

/// Computes the update/insert/delete sets.
///
/// `fetched` must not repeat an `osm_id`. Output order follows `fetched` for
/// updates and inserts and ascending `osm_id` for deletes.
pub fn diff_streets(stored: &[Street], fetched: &[NewStreet]) -> StreetDiff {
    let existing: HashMap<i64, &Street> = stored.iter().map(|s| (s.osm_id, s)).collect();
    let mut diff = StreetDiff::default();

    for street in fetched {
        match existing.get(&street.osm_id) {
            Some(current) if street.matches(current) => diff.unchanged += 1,
            Some(_) => diff.updates.push(street.clone()),
            None => diff.inserts.push(street.clone()),
        }
    }

    let fetched_ids: HashSet<i64> = fetched.iter().map(|s| s.osm_id).collect();
    diff.deletes = stored
        .iter()
        .map(|s| s.osm_id)
        .filter(|osm_id| !fetched_ids.contains(osm_id))
        .collect();
    diff.deletes.sort_unstable();

    diff
}
