//! Reporting queries over the normalized schema.
//!
//! Read-side companions to the loader: per-customer order lines and
//! order totals rolled up by customer, country, and region. Rows are
//! fetched through Diesel joins and aggregated in memory; totals are
//! rounded to two decimal places and returned largest first.

use std::collections::BTreeMap;

use diesel::prelude::*;

use crate::db::DbConnection;
use crate::schema::{countries, customers, order_details, products, regions};

/// One order line joined with its customer and product.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub customer: String,
    pub product: String,
    pub order_date: String,
    pub unit_price: f64,
    pub quantity: i32,
    pub total: f64,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn full_name(first: &str, last: &str) -> String {
    format!("{} {}", first, last).trim().to_string()
}

/// All order lines for one customer, by full name, in order-date order.
pub fn customer_order_lines(
    conn: &mut DbConnection,
    customer_name: &str,
) -> QueryResult<Vec<OrderLine>> {
    let rows = order_details::table
        .inner_join(customers::table)
        .inner_join(products::table)
        .select((
            customers::first_name,
            customers::last_name,
            products::name,
            order_details::order_date,
            products::unit_price,
            order_details::quantity,
        ))
        .load::<(String, String, String, String, f64, i32)>(conn)?;

    let mut lines: Vec<OrderLine> = rows
        .into_iter()
        .filter(|(first, last, ..)| full_name(first, last) == customer_name)
        .map(|(first, last, product, order_date, unit_price, quantity)| OrderLine {
            customer: full_name(&first, &last),
            product,
            order_date,
            unit_price,
            quantity,
            total: round2(unit_price * quantity as f64),
        })
        .collect();
    lines.sort_by(|a, b| a.order_date.cmp(&b.order_date).then(a.product.cmp(&b.product)));
    Ok(lines)
}

/// Summed order totals per customer, largest first.
pub fn totals_by_customer(conn: &mut DbConnection) -> QueryResult<Vec<(String, f64)>> {
    let rows = order_details::table
        .inner_join(customers::table)
        .inner_join(products::table)
        .select((
            customers::first_name,
            customers::last_name,
            products::unit_price,
            order_details::quantity,
        ))
        .load::<(String, String, f64, i32)>(conn)?;

    Ok(ranked_totals(rows.into_iter().map(
        |(first, last, unit_price, quantity)| (full_name(&first, &last), unit_price, quantity),
    )))
}

/// Summed order totals per country, largest first.
pub fn totals_by_country(conn: &mut DbConnection) -> QueryResult<Vec<(String, f64)>> {
    let rows = order_details::table
        .inner_join(products::table)
        .inner_join(customers::table.inner_join(countries::table))
        .select((countries::name, products::unit_price, order_details::quantity))
        .load::<(String, f64, i32)>(conn)?;

    Ok(ranked_totals(rows.into_iter()))
}

/// Summed order totals per region, largest first.
pub fn totals_by_region(conn: &mut DbConnection) -> QueryResult<Vec<(String, f64)>> {
    let rows = order_details::table
        .inner_join(products::table)
        .inner_join(customers::table.inner_join(countries::table.inner_join(regions::table)))
        .select((regions::name, products::unit_price, order_details::quantity))
        .load::<(String, f64, i32)>(conn)?;

    Ok(ranked_totals(rows.into_iter()))
}

fn ranked_totals(rows: impl Iterator<Item = (String, f64, i32)>) -> Vec<(String, f64)> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for (key, unit_price, quantity) in rows {
        *totals.entry(key).or_insert(0.0) += unit_price * quantity as f64;
    }
    let mut ranked: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(key, total)| (key, round2(total)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.236), 1.24);
        assert_eq!(round2(2.0), 2.0);
    }

    #[test]
    fn test_full_name_trims_empty_last() {
        assert_eq!(full_name("Cher", ""), "Cher");
        assert_eq!(full_name("Ana", "Cruz"), "Ana Cruz");
    }

    #[test]
    fn test_ranked_totals_sums_and_sorts_desc() {
        let rows = vec![
            ("Europe".to_string(), 1.50, 2),
            ("Asia".to_string(), 10.0, 1),
            ("Europe".to_string(), 2.00, 1),
        ];
        let ranked = ranked_totals(rows.into_iter());
        assert_eq!(ranked, vec![("Asia".to_string(), 10.0), ("Europe".to_string(), 5.0)]);
    }
}
