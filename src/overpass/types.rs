//! Overpass JSON response types.

use std::collections::HashMap;

use serde::Deserialize;

/// Top-level `[out:json]` response.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Set by the interpreter on runtime errors such as timeouts
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// A tagged OpenStreetMap way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Way {
    pub id: i64,
    pub tags: HashMap<String, String>,
}

impl Way {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

impl OverpassResponse {
    /// Keeps the way elements, dropping nodes and relations.
    pub fn into_ways(self) -> Vec<Way> {
        self.elements
            .into_iter()
            .filter(|element| element.kind == "way")
            .map(|element| Way {
                id: element.id,
                tags: element.tags,
            })
            .collect()
    }
}
