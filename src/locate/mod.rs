//! Location reconciliation.
//!
//! Matches the free-text location of an outage fragment against the stored
//! districts and streets. Matching works on normalised text and whole words.
//! Street-type words ("Ave.", "ქუჩა") and punctuation are ignored.

mod normalize;

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::storage::{District, Street};

pub use normalize::{district_stem, find_word_matches, normalize, street_key};

/// House number directly after a street name, optionally preceded by a
/// street-type word and an `N`/`№`/`No` marker.
static HOUSE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    let suffixes = normalize::STREET_SUFFIXES.join("|");
    Regex::new(&format!(r"^ (?:(?:{suffixes}) )?(?:n|№|no)? ?([0-9]+)"))
        .unwrap_or_else(|e| panic!("house number pattern must compile: {e}"))
});

/// A place an outage fragment refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub district_id: Option<i64>,
    pub street_id: Option<i64>,
    pub house_number: Option<i64>,
}

#[derive(Debug)]
struct DistrictEntry {
    id: i64,
    /// Normalised names and stems; `true` marks a full name, whose matches
    /// are not available to street matching
    keys: Vec<(String, bool)>,
}

#[derive(Debug)]
struct StreetEntry {
    id: i64,
    district_id: i64,
    key: String,
}

/// In-memory index of the stored districts and streets.
#[derive(Debug)]
pub struct StreetIndex {
    districts: Vec<DistrictEntry>,
    streets: Vec<StreetEntry>,
}

impl StreetIndex {
    /// Builds the index.
    ///
    /// Streets sharing a normalised name within a district (several ways of
    /// one street) collapse to the first one given.
    pub fn new(districts: &[District], streets: &[Street]) -> Self {
        let districts = districts
            .iter()
            .map(|district| {
                let mut keys: Vec<(String, bool)> = Vec::new();
                for (key, full_name) in [
                    (normalize(&district.name_en), true),
                    (district_stem(&district.name_en), false),
                    (normalize(&district.name_ka), true),
                    (district_stem(&district.name_ka), false),
                ] {
                    if !key.is_empty() && !keys.iter().any(|(k, _)| *k == key) {
                        keys.push((key, full_name));
                    }
                }
                DistrictEntry {
                    id: district.id,
                    keys,
                }
            })
            .collect();

        let mut seen: HashSet<(i64, String)> = HashSet::new();
        let mut entries = Vec::new();
        for street in streets {
            for key in [street_key(&street.name_en), street_key(&street.name_ka)] {
                if key.is_empty() || !seen.insert((street.district_id, key.clone())) {
                    continue;
                }
                entries.push(StreetEntry {
                    id: street.id,
                    district_id: street.district_id,
                    key,
                });
            }
        }

        Self {
            districts,
            streets: entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.districts.is_empty() && self.streets.is_empty()
    }

    /// Finds the districts and streets mentioned in `text`.
    ///
    /// Returns one location per matched street, in text order. When no
    /// street matches, returns a single street-less location for the first
    /// district mentioned, or nothing.
    ///
    /// A bare district stem ("Saburtalo") does not hide a street of the same
    /// name; a full district name ("Saburtalo District") does.
    pub fn locate(&self, text: &str) -> Vec<Location> {
        let text = normalize(text);

        let mut district_ids: Vec<i64> = Vec::new();
        let mut first_district: Option<(usize, i64)> = None;
        let mut taken: Vec<(usize, usize)> = Vec::new();
        for district in &self.districts {
            for (key, full_name) in &district.keys {
                let spans = find_word_matches(&text, key);
                let Some(&(start, _)) = spans.first() else {
                    continue;
                };
                if !district_ids.contains(&district.id) {
                    district_ids.push(district.id);
                }
                if first_district.map_or(true, |(first, _)| start < first) {
                    first_district = Some((start, district.id));
                }
                if *full_name {
                    taken.extend(spans);
                }
            }
        }

        let mut candidates: Vec<(usize, usize, &StreetEntry)> = self
            .streets
            .iter()
            .filter(|street| district_ids.is_empty() || district_ids.contains(&street.district_id))
            .flat_map(|street| {
                find_word_matches(&text, &street.key)
                    .into_iter()
                    .map(move |(start, end)| (start, end, street))
            })
            .collect();

        // Longest match first, so "merab kostava" beats "kostava".
        candidates.sort_by(|a, b| (b.1 - b.0).cmp(&(a.1 - a.0)).then(a.0.cmp(&b.0)));

        let mut accepted: Vec<(usize, usize, &StreetEntry)> = Vec::new();
        let mut streets_seen: HashSet<i64> = HashSet::new();
        for (start, end, street) in candidates {
            let overlaps = taken.iter().any(|&(s, e)| start < e && s < end);
            if overlaps {
                continue;
            }
            taken.push((start, end));
            if streets_seen.insert(street.id) {
                accepted.push((start, end, street));
            }
        }
        accepted.sort_by_key(|&(start, _, _)| start);

        if accepted.is_empty() {
            return first_district
                .map(|(_, id)| Location {
                    district_id: Some(id),
                    street_id: None,
                    house_number: None,
                })
                .into_iter()
                .collect();
        }

        accepted
            .into_iter()
            .map(|(_, end, street)| Location {
                district_id: Some(street.district_id),
                street_id: Some(street.id),
                house_number: house_number_after(&text[end..]),
            })
            .collect()
    }
}

fn house_number_after(rest: &str) -> Option<i64> {
    HOUSE_NUMBER
        .captures(rest)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
