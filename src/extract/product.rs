//! Product extraction from the parallel (names, categories, prices)
//! lists in fields 5, 6 and 8.

use std::collections::BTreeMap;

use super::{COL_CATEGORY_LIST, COL_PRICE_LIST, COL_PRODUCT_LIST, MIN_FIELDS_PRODUCT};
use crate::align::{split_list, zip_shortest3};
use crate::lookup::IdLookup;
use crate::reader::RawRow;

/// Product name -> (unit price, category id).
///
/// The three lists are aligned positionally, truncating to the
/// shortest. A position is dropped when its category name does not
/// resolve or its price does not parse as a decimal; sibling positions
/// in the same row are unaffected. The first occurrence of a product
/// name wins.
pub fn extract_products(
    rows: impl Iterator<Item = RawRow>,
    categories: &IdLookup,
) -> BTreeMap<String, (f64, i32)> {
    let mut products = BTreeMap::new();
    for row in rows {
        if row.len() < MIN_FIELDS_PRODUCT {
            continue;
        }
        let names = split_list(row.field(COL_PRODUCT_LIST).unwrap_or(""));
        let cats = split_list(row.field(COL_CATEGORY_LIST).unwrap_or(""));
        let prices = split_list(row.field(COL_PRICE_LIST).unwrap_or(""));
        for (name, category, price) in zip_shortest3(&names, &cats, &prices) {
            if name.is_empty() || category.is_empty() || price.is_empty() {
                continue;
            }
            let category_id = match categories.resolve(category) {
                Some(id) => id,
                None => {
                    tracing::debug!("Skipping product '{}': unknown category '{}'", name, category);
                    continue;
                }
            };
            let unit_price = match price.parse::<f64>() {
                Ok(p) => p,
                Err(_) => {
                    tracing::debug!("Skipping product '{}': unparsable price '{}'", name, price);
                    continue;
                }
            };
            products
                .entry(name.to_string())
                .or_insert((unit_price, category_id));
        }
    }
    products
}
