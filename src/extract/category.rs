//! Product-category extraction from the parallel (names, descriptions)
//! lists in fields 6 and 7.

use std::collections::BTreeMap;

use super::{COL_CATEGORY_DESC_LIST, COL_CATEGORY_LIST, MIN_FIELDS_CATEGORY};
use crate::align::{split_list, zip_shortest2};
use crate::reader::RawRow;

/// Category name -> description.
///
/// The two lists are aligned positionally, truncating to the shorter.
/// Empty category names are dropped; an empty description is legal.
/// The first description seen for a name wins.
pub fn extract_categories(rows: impl Iterator<Item = RawRow>) -> BTreeMap<String, String> {
    let mut categories = BTreeMap::new();
    for row in rows {
        if row.len() < MIN_FIELDS_CATEGORY {
            continue;
        }
        let names = split_list(row.field(COL_CATEGORY_LIST).unwrap_or(""));
        let descriptions = split_list(row.field(COL_CATEGORY_DESC_LIST).unwrap_or(""));
        for (name, description) in zip_shortest2(&names, &descriptions) {
            if name.is_empty() {
                continue;
            }
            categories
                .entry(name.to_string())
                .or_insert_with(|| description.to_string());
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> RawRow {
        RawRow::new(fields.iter().map(|f| f.to_string()).collect())
    }

    fn full_row(categories: &str, descriptions: &str) -> RawRow {
        row(&["Ana", "a", "b", "France", "Europe", "Cola", categories, descriptions])
    }

    #[test]
    fn test_categories_aligned_positionally() {
        let rows = vec![full_row("Beverages;Snacks", "Drinks;Salty")];
        let categories = extract_categories(rows.into_iter());
        assert_eq!(categories.get("Beverages"), Some(&"Drinks".to_string()));
        assert_eq!(categories.get("Snacks"), Some(&"Salty".to_string()));
    }

    #[test]
    fn test_longer_description_list_truncated() {
        let rows = vec![full_row("Beverages", "Drinks;Orphaned")];
        let categories = extract_categories(rows.into_iter());
        assert_eq!(categories.len(), 1);
        assert_eq!(categories.get("Beverages"), Some(&"Drinks".to_string()));
    }

    #[test]
    fn test_empty_category_name_dropped() {
        let rows = vec![full_row("Beverages;;Snacks", "Drinks;Gone;Salty")];
        let categories = extract_categories(rows.into_iter());
        assert_eq!(categories.len(), 2);
    }

    #[test]
    fn test_narrow_row_skipped() {
        let rows = vec![row(&["Ana", "a", "b", "France", "Europe", "Cola", "Beverages"])];
        assert!(extract_categories(rows.into_iter()).is_empty());
    }
}
