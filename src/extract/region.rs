//! Region extraction: field 4, no list expansion.

use std::collections::BTreeSet;

use super::{COL_REGION, MIN_FIELDS_REGION};
use crate::reader::RawRow;

/// Distinct non-empty region names. The set iterates in lexicographic
/// order, which is the insertion order the loader wants.
pub fn extract_regions(rows: impl Iterator<Item = RawRow>) -> BTreeSet<String> {
    let mut regions = BTreeSet::new();
    for row in rows {
        if row.len() < MIN_FIELDS_REGION {
            continue;
        }
        match row.field(COL_REGION) {
            Some(name) if !name.is_empty() => {
                regions.insert(name.to_string());
            }
            _ => {}
        }
    }
    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> RawRow {
        RawRow::new(fields.iter().map(|f| f.to_string()).collect())
    }

    #[test]
    fn test_regions_deduplicated_and_sorted() {
        let rows = vec![
            row(&["Ana", "a", "b", "France", "Europe"]),
            row(&["Bob", "c", "d", "Japan", "Asia"]),
            row(&["Cid", "e", "f", "Spain", "Europe"]),
        ];
        let regions: Vec<String> = extract_regions(rows.into_iter()).into_iter().collect();
        assert_eq!(regions, vec!["Asia".to_string(), "Europe".to_string()]);
    }

    #[test]
    fn test_short_and_empty_rows_skipped() {
        let rows = vec![
            row(&["Ana", "a", "b", "France"]),
            row(&["Bob", "c", "d", "Japan", "  "]),
        ];
        assert!(extract_regions(rows.into_iter()).is_empty());
    }
}
