//! Studio location buckets.
//!
//! Location cells are free text ("Kwality House, Kemps Corner",
//! "Supreme HQ Bandra", "kenkere house"), so a bucket is matched by any of its
//! lower-case alias substrings rather than by an exact enumeration.

use serde::{Deserialize, Serialize};

/// One canonical studio grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationBucket {
    pub id: String,
    pub name: String,
    pub full_name: String,
    pub aliases: Vec<String>,
}

impl LocationBucket {
    pub fn new(id: &str, name: &str, full_name: &str, aliases: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            full_name: full_name.to_string(),
            aliases: aliases.iter().map(|a| a.to_lowercase()).collect(),
        }
    }

    /// Whether a raw location cell belongs to this bucket.
    pub fn matches(&self, location: &str) -> bool {
        let location = location.to_lowercase();
        self.aliases
            .iter()
            .any(|alias| location.contains(&alias.to_lowercase()))
    }
}

/// The set of buckets offered as location tabs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationCatalog {
    buckets: Vec<LocationBucket>,
}

impl Default for LocationCatalog {
    fn default() -> Self {
        Self::new(vec![
            LocationBucket::new(
                "kwality",
                "Kwality House",
                "Kwality House, Kemps Corner",
                &["kwality", "kemps"],
            ),
            LocationBucket::new(
                "supreme",
                "Supreme HQ",
                "Supreme HQ, Bandra",
                &["supreme", "bandra"],
            ),
            LocationBucket::new(
                "kenkere",
                "Kenkere House",
                "Kenkere House, Bengaluru",
                &["kenkere", "bengaluru"],
            ),
        ])
    }
}

impl LocationCatalog {
    pub fn new(buckets: Vec<LocationBucket>) -> Self {
        Self { buckets }
    }

    pub fn buckets(&self) -> &[LocationBucket] {
        &self.buckets
    }

    pub fn get(&self, id: &str) -> Option<&LocationBucket> {
        self.buckets.iter().find(|b| b.id == id)
    }

    /// Bucket a raw location cell falls into, if any.
    pub fn classify(&self, location: &str) -> Option<&LocationBucket> {
        self.buckets.iter().find(|b| b.matches(location))
    }
}
