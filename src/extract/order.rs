//! Order-line extraction: the (product, quantity, date) parallel lists
//! resolved against the customer and product lookups.

use chrono::NaiveDate;

use super::{COL_CUSTOMER_NAME, COL_DATE_LIST, COL_PRODUCT_LIST, COL_QUANTITY_LIST, MIN_FIELDS_ORDER};
use crate::align::{split_list, zip_shortest3};
use crate::lookup::IdLookup;
use crate::reader::RawRow;

/// Dates arrive as `20230115` and are stored as `2023-01-15`.
const DATE_INPUT_FORMAT: &str = "%Y%m%d";
const DATE_OUTPUT_FORMAT: &str = "%Y-%m-%d";

/// One resolved order line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub customer_id: i32,
    pub product_id: i32,
    pub order_date: String,
    pub quantity: i32,
}

/// Order lines in file order, never deduplicated.
///
/// The whole row is skipped when its customer does not resolve. Within
/// a row the three lists are aligned positionally, truncating to the
/// shortest; a position is dropped when the product does not resolve,
/// the quantity is not an integer, or the date does not parse.
pub fn extract_order_details(
    rows: impl Iterator<Item = RawRow>,
    customers: &IdLookup,
    products: &IdLookup,
) -> Vec<OrderRecord> {
    let mut orders = Vec::new();
    for row in rows {
        if row.len() < MIN_FIELDS_ORDER {
            continue;
        }
        // Customer keys are "{first} {last}", so internal runs of
        // whitespace in the raw name collapse to single spaces.
        let raw_name = row.field(COL_CUSTOMER_NAME).unwrap_or("");
        let name = raw_name.split_whitespace().collect::<Vec<_>>().join(" ");
        let customer_id = match customers.resolve(&name) {
            Some(id) => id,
            None => {
                tracing::debug!("Skipping order row: unknown customer '{}'", name);
                continue;
            }
        };

        let names = split_list(row.field(COL_PRODUCT_LIST).unwrap_or(""));
        let quantities = split_list(row.field(COL_QUANTITY_LIST).unwrap_or(""));
        let dates = split_list(row.field(COL_DATE_LIST).unwrap_or(""));
        for (product, quantity, date) in zip_shortest3(&names, &quantities, &dates) {
            let product_id = match products.resolve(product) {
                Some(id) => id,
                None => {
                    tracing::debug!("Skipping order line: unknown product '{}'", product);
                    continue;
                }
            };
            let quantity = match quantity.parse::<i32>() {
                Ok(q) => q,
                Err(_) => {
                    tracing::debug!(
                        "Skipping order line for '{}': unparsable quantity '{}'",
                        product,
                        quantity
                    );
                    continue;
                }
            };
            let order_date = match NaiveDate::parse_from_str(date, DATE_INPUT_FORMAT) {
                Ok(d) => d.format(DATE_OUTPUT_FORMAT).to_string(),
                Err(_) => {
                    tracing::debug!(
                        "Skipping order line for '{}': unparsable date '{}'",
                        product,
                        date
                    );
                    continue;
                }
            };
            orders.push(OrderRecord {
                customer_id,
                product_id,
                order_date,
                quantity,
            });
        }
    }
    orders
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_row(name: &str, products: &str, quantities: &str, dates: &str) -> RawRow {
        RawRow::new(
            [
                name, "addr", "city", "France", "Europe", products, "cats", "descs", "prices",
                quantities, dates,
            ]
            .iter()
            .map(|f| f.to_string())
            .collect(),
        )
    }

    fn customer_lookup() -> IdLookup {
        IdLookup::from_pairs(vec![("Ana Cruz".to_string(), 7)])
    }

    fn product_lookup() -> IdLookup {
        IdLookup::from_pairs(vec![
            ("A".to_string(), 1),
            ("B".to_string(), 2),
            ("C".to_string(), 3),
        ])
    }

    #[test]
    fn test_shortest_list_truncation() {
        let rows = vec![order_row(
            "Ana Cruz",
            "A;B;C",
            "1;2",
            "20230101;20230102;20230103",
        )];
        let orders = extract_order_details(rows.into_iter(), &customer_lookup(), &product_lookup());
        assert_eq!(
            orders,
            vec![
                OrderRecord {
                    customer_id: 7,
                    product_id: 1,
                    order_date: "2023-01-01".to_string(),
                    quantity: 1,
                },
                OrderRecord {
                    customer_id: 7,
                    product_id: 2,
                    order_date: "2023-01-02".to_string(),
                    quantity: 2,
                },
            ]
        );
    }

    #[test]
    fn test_bad_quantity_and_date_drop_position_only() {
        let rows = vec![order_row(
            "Ana Cruz",
            "A;B;C",
            "1;x;3",
            "20230101;20230102;2023-01-03",
        )];
        let orders = extract_order_details(rows.into_iter(), &customer_lookup(), &product_lookup());
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].product_id, 1);
    }

    #[test]
    fn test_unknown_customer_skips_row() {
        let rows = vec![order_row("Ghost Who", "A", "1", "20230101")];
        let orders = extract_order_details(rows.into_iter(), &customer_lookup(), &product_lookup());
        assert!(orders.is_empty());
    }

    #[test]
    fn test_customer_name_whitespace_collapsed() {
        let rows = vec![order_row("  Ana   Cruz ", "A", "4", "20230214")];
        let orders = extract_order_details(rows.into_iter(), &customer_lookup(), &product_lookup());
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].quantity, 4);
        assert_eq!(orders[0].order_date, "2023-02-14");
    }

    #[test]
    fn test_duplicate_lines_kept() {
        let rows = vec![order_row("Ana Cruz", "A;A", "2;2", "20230101;20230101")];
        let orders = extract_order_details(rows.into_iter(), &customer_lookup(), &product_lookup());
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0], orders[1]);
    }
}
