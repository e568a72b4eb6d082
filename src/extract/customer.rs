//! Customer extraction: name splitting plus country resolution.

use std::collections::BTreeMap;

use super::{COL_ADDRESS, COL_CITY, COL_COUNTRY, COL_CUSTOMER_NAME, MIN_FIELDS_CUSTOMER};
use crate::lookup::IdLookup;
use crate::reader::RawRow;

/// Natural key of a customer: (first name, last name, address, city).
pub type CustomerKey = (String, String, String, String);

/// Split a raw full-name field into (first, last).
///
/// The first whitespace token is the first name; the remaining tokens,
/// joined by single spaces, are the last name. A single-token name has
/// an empty last name.
pub fn split_customer_name(raw: &str) -> (String, String) {
    let mut tokens = raw.split_whitespace();
    let first = tokens.next().unwrap_or("").to_string();
    let last = tokens.collect::<Vec<_>>().join(" ");
    (first, last)
}

/// Customer natural key -> country id, for customers whose country
/// resolves. Rows with an empty name or an unknown country are
/// dropped. The map iterates in (first, last, address, city) order,
/// which matches sorting by `"first last"` since first names carry no
/// internal whitespace.
pub fn extract_customers(
    rows: impl Iterator<Item = RawRow>,
    countries: &IdLookup,
) -> BTreeMap<CustomerKey, i32> {
    let mut custs = BTreeMap::new();
    for row in rows {
        if row.len() < MIN_FIELDS_CUSTOMER {
            continue;
        }
        let name = row.field(COL_CUSTOMER_NAME).unwrap_or("");
        let country = row.field(COL_COUNTRY).unwrap_or("");
        if name.is_empty() || country.is_empty() {
            continue;
        }
        let country_id = match countries.resolve(country) {
            Some(id) => id,
            None => {
                tracing::debug!("Skipping customer '{}': unknown country '{}'", name, country);
                continue;
            }
        };
        let (first, last) = split_customer_name(name);
        let address = row.field(COL_ADDRESS).unwrap_or("").to_string();
        let city = row.field(COL_CITY).unwrap_or("").to_string();
        custs.entry((first, last, address, city)).or_insert(country_id);
    }
    custs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> RawRow {
        RawRow::new(fields.iter().map(|f| f.to_string()).collect())
    }

    fn country_lookup() -> IdLookup {
        IdLookup::from_pairs(vec![("France".to_string(), 1)])
    }

    #[test]
    fn test_name_splits_first_token_and_rest() {
        assert_eq!(
            split_customer_name("Jean Paul Gomez"),
            ("Jean".to_string(), "Paul Gomez".to_string())
        );
        assert_eq!(split_customer_name("Cher"), ("Cher".to_string(), String::new()));
        assert_eq!(
            split_customer_name("  Ana   Cruz "),
            ("Ana".to_string(), "Cruz".to_string())
        );
    }

    #[test]
    fn test_customers_deduplicated_on_natural_key() {
        let rows = vec![
            row(&["Ana Cruz", "12 Rue X", "Paris", "France", "Europe"]),
            row(&["Ana Cruz", "12 Rue X", "Paris", "France", "Europe"]),
        ];
        let custs = extract_customers(rows.into_iter(), &country_lookup());
        assert_eq!(custs.len(), 1);
        let key = ("Ana".to_string(), "Cruz".to_string(), "12 Rue X".to_string(), "Paris".to_string());
        assert_eq!(custs.get(&key), Some(&1));
    }

    #[test]
    fn test_unknown_country_drops_customer() {
        let rows = vec![row(&["Zed Moon", "1 Crater Way", "Dome", "Atlantis", "Mars"])];
        assert!(extract_customers(rows.into_iter(), &country_lookup()).is_empty());
    }
}
