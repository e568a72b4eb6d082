//! Country extraction: (field 3, field 4) pairs resolved against the
//! region lookup.

use std::collections::BTreeMap;

use super::{COL_COUNTRY, COL_REGION, MIN_FIELDS_COUNTRY};
use crate::lookup::IdLookup;
use crate::reader::RawRow;

/// Country name -> region id, for countries whose region resolves.
///
/// A pair whose region name is absent from the lookup is an orphan and
/// is dropped, never inserted with a placeholder key. The first
/// occurrence of a country name wins, so the natural key stays unique
/// and reloads of identical input are reproducible.
pub fn extract_countries(
    rows: impl Iterator<Item = RawRow>,
    regions: &IdLookup,
) -> BTreeMap<String, i32> {
    let mut countries = BTreeMap::new();
    for row in rows {
        if row.len() < MIN_FIELDS_COUNTRY {
            continue;
        }
        let country = row.field(COL_COUNTRY).unwrap_or("");
        let region = row.field(COL_REGION).unwrap_or("");
        if country.is_empty() || region.is_empty() {
            continue;
        }
        match regions.resolve(region) {
            Some(region_id) => {
                countries.entry(country.to_string()).or_insert(region_id);
            }
            None => {
                tracing::debug!("Skipping country '{}': unknown region '{}'", country, region);
            }
        }
    }
    countries
}
