//! Dependency-ordered loader.
//!
//! Six strictly sequenced stages:
//! Region -> Country -> ProductCategory -> Product -> Customer -> OrderDetail.
//! Each stage extracts against freshly streamed raw rows plus the
//! lookups built by earlier stages, sorts deterministically,
//! bulk-inserts in batches, and reads the stored rows back to build
//! the next lookup. The schema is destroyed and rebuilt first; the six
//! load stages then run inside one transaction, so a fatal failure
//! leaves the store exactly as the rebuild left it.

use std::path::Path;

use diesel::prelude::*;
use serde::Serialize;

use crate::db::{rebuild_schema, DbConnection};
use crate::error::PipelineError;
use crate::extract;
use crate::lookup;
use crate::models::{
    NewCountry, NewCustomer, NewOrderDetail, NewProduct, NewProductCategory, NewRegion,
};
use crate::reader::{read_rows, RawRow};
use crate::schema;

/// Tunables that affect performance, never results.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Rows per batched INSERT statement.
    pub batch_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig { batch_size: 1000 }
    }
}

/// Rows inserted per entity table during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub regions: usize,
    pub countries: usize,
    pub product_categories: usize,
    pub products: usize,
    pub customers: usize,
    pub order_details: usize,
}

/// Rebuild the schema and load the source file, with default tuning.
pub fn run(input: &Path, conn: &mut DbConnection) -> Result<LoadStats, PipelineError> {
    run_with_config(input, conn, &PipelineConfig::default())
}

/// Rebuild the schema and load the source file.
///
/// The run owns `conn` for its entire duration. Schema DDL executes
/// before the load transaction opens: SQLite cannot change
/// `foreign_keys` enforcement mid-transaction, and the drops are
/// ordered child-to-parent so enforcement never sees an orphan.
pub fn run_with_config(
    input: &Path,
    conn: &mut DbConnection,
    config: &PipelineConfig,
) -> Result<LoadStats, PipelineError> {
    #[cfg(feature = "sqlite")]
    diesel::sql_query("PRAGMA foreign_keys = ON").execute(conn)?;

    rebuild_schema(conn)?;

    conn.transaction(|conn| load_all(input, conn, config))
}

fn load_all(
    input: &Path,
    conn: &mut DbConnection,
    config: &PipelineConfig,
) -> Result<LoadStats, PipelineError> {
    let mut stats = LoadStats::default();

    // -- Region --
    let new_regions: Vec<NewRegion> = extract::extract_regions(stream(input)?)
        .into_iter()
        .map(|name| NewRegion { name })
        .collect();
    insert_batched(conn, config.batch_size, &new_regions, |conn, chunk| {
        diesel::insert_into(schema::regions::table)
            .values(chunk)
            .execute(conn)
    })?;
    stats.regions = new_regions.len();
    tracing::info!("Inserted {} regions", stats.regions);
    let region_ids = lookup::region_lookup(conn)?;

    // -- Country --
    let new_countries: Vec<NewCountry> = extract::extract_countries(stream(input)?, &region_ids)
        .into_iter()
        .map(|(name, region_id)| NewCountry { name, region_id })
        .collect();
    insert_batched(conn, config.batch_size, &new_countries, |conn, chunk| {
        diesel::insert_into(schema::countries::table)
            .values(chunk)
            .execute(conn)
    })?;
    stats.countries = new_countries.len();
    tracing::info!("Inserted {} countries", stats.countries);
    let country_ids = lookup::country_lookup(conn)?;

    // -- ProductCategory --
    let new_categories: Vec<NewProductCategory> = extract::extract_categories(stream(input)?)
        .into_iter()
        .map(|(name, description)| NewProductCategory { name, description })
        .collect();
    insert_batched(conn, config.batch_size, &new_categories, |conn, chunk| {
        diesel::insert_into(schema::product_categories::table)
            .values(chunk)
            .execute(conn)
    })?;
    stats.product_categories = new_categories.len();
    tracing::info!("Inserted {} product categories", stats.product_categories);
    let category_ids = lookup::category_lookup(conn)?;

    // -- Product --
    let new_products: Vec<NewProduct> = extract::extract_products(stream(input)?, &category_ids)
        .into_iter()
        .map(|(name, (unit_price, category_id))| NewProduct {
            name,
            unit_price,
            category_id,
        })
        .collect();
    insert_batched(conn, config.batch_size, &new_products, |conn, chunk| {
        diesel::insert_into(schema::products::table)
            .values(chunk)
            .execute(conn)
    })?;
    stats.products = new_products.len();
    tracing::info!("Inserted {} products", stats.products);
    let product_ids = lookup::product_lookup(conn)?;

    // -- Customer --
    // BTreeMap iteration yields (first, last, address, city) order,
    // the deterministic "first last" insertion order.
    let new_customers: Vec<NewCustomer> = extract::extract_customers(stream(input)?, &country_ids)
        .into_iter()
        .map(|((first_name, last_name, address, city), country_id)| NewCustomer {
            first_name,
            last_name,
            address,
            city,
            country_id,
        })
        .collect();
    insert_batched(conn, config.batch_size, &new_customers, |conn, chunk| {
        diesel::insert_into(schema::customers::table)
            .values(chunk)
            .execute(conn)
    })?;
    stats.customers = new_customers.len();
    tracing::info!("Inserted {} customers", stats.customers);
    let customer_ids = lookup::customer_lookup(conn)?;

    // -- OrderDetail --
    // Kept in file order and never deduplicated.
    let new_orders: Vec<NewOrderDetail> =
        extract::extract_order_details(stream(input)?, &customer_ids, &product_ids)
            .into_iter()
            .map(|line| NewOrderDetail {
                customer_id: line.customer_id,
                product_id: line.product_id,
                order_date: line.order_date,
                quantity: line.quantity,
            })
            .collect();
    insert_batched(conn, config.batch_size, &new_orders, |conn, chunk| {
        diesel::insert_into(schema::order_details::table)
            .values(chunk)
            .execute(conn)
    })?;
    stats.order_details = new_orders.len();
    tracing::info!("Inserted {} order details", stats.order_details);

    Ok(stats)
}

/// Re-open the source file for the next stage's scan.
fn stream(input: &Path) -> Result<impl Iterator<Item = RawRow>, PipelineError> {
    read_rows(input).map_err(|source| PipelineError::Io {
        path: input.to_path_buf(),
        source,
    })
}

fn insert_batched<T, F>(
    conn: &mut DbConnection,
    batch_size: usize,
    rows: &[T],
    mut insert: F,
) -> Result<(), PipelineError>
where
    F: FnMut(&mut DbConnection, &[T]) -> QueryResult<usize>,
{
    for chunk in rows.chunks(batch_size.max(1)) {
        insert(conn, chunk)?;
    }
    Ok(())
}
