//! Option lists for the filter selectors.

use std::collections::BTreeSet;

use crate::api::FilterOptions;
use crate::models::FilterableRecord;
use crate::transformations::Category;

/// Sorted distinct non-empty values of one category column.
pub fn distinct_values<R: FilterableRecord>(records: &[R], category: Category) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| category.value_of(r))
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Build the selector option lists.
///
/// Callers pass the location-filtered collection so the lists only offer
/// values present at the selected studio.
pub fn filter_options<R: FilterableRecord>(records: &[R]) -> FilterOptions {
    FilterOptions {
        trainers: distinct_values(records, Category::Trainer),
        classes: distinct_values(records, Category::Class),
        products: distinct_values(records, Category::Product),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LateCancellation;

    fn record(trainer: &str, class: &str) -> LateCancellation {
        LateCancellation {
            teacher_name: Some(trainer.to_string()),
            cleaned_class: Some(class.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_options_are_sorted_and_distinct() {
        let records = vec![
            record("Rohan", "PowerCycle"),
            record("Anisha", "Barre 57"),
            record("Rohan", "Barre 57"),
            record("", "  "),
        ];
        let options = filter_options(&records);
        assert_eq!(options.trainers, vec!["Anisha", "Rohan"]);
        assert_eq!(options.classes, vec!["Barre 57", "PowerCycle"]);
        assert!(options.products.is_empty());
    }
}
