use serde::{Deserialize, Serialize};

use crate::api::{LocationBucket, Page};

/// A studio as shown in the location tabs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub id: String,
    pub name: String,
    pub full_name: String,
}

impl From<&LocationBucket> for LocationInfo {
    fn from(bucket: &LocationBucket) -> Self {
        Self {
            id: bucket.id.clone(),
            name: bucket.name.clone(),
            full_name: bucket.full_name.clone(),
        }
    }
}

/// A dashboard page and its route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: Page,
    pub path: String,
    pub title: String,
}

impl From<Page> for PageInfo {
    fn from(page: Page) -> Self {
        Self {
            page,
            path: page.path().to_string(),
            title: page.title().to_string(),
        }
    }
}

/// Distinct values offered by the filter selectors, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub trainers: Vec<String>,
    pub classes: Vec<String>,
    pub products: Vec<String>,
}

pub const LIST_LOCATIONS: &str = "list_locations";
pub const LIST_PAGES: &str = "list_pages";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_info_from_bucket() {
        let bucket = LocationBucket::new("kwality", "Kwality House", "Kwality House, Kemps Corner", &["kwality", "kemps"]);
        let info = LocationInfo::from(&bucket);
        assert_eq!(info.id, "kwality");
        assert_eq!(info.full_name, "Kwality House, Kemps Corner");
    }

    #[test]
    fn test_page_info_from_page() {
        let info = PageInfo::from(Page::LateCancellations);
        assert_eq!(info.path, "/late-cancellations");
    }

    #[test]
    fn test_const_values() {
        assert_eq!(LIST_LOCATIONS, "list_locations");
        assert_eq!(LIST_PAGES, "list_pages");
    }
}
