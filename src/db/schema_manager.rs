//! Schema lifecycle for the six normalized tables.
//!
//! The pipeline is not incremental: every run destroys and recreates
//! the schema before loading. Table names and DDL are statically
//! declared per entity; no statement is ever assembled from runtime
//! strings.

use diesel::prelude::*;
use diesel::sql_query;

use crate::db::DbConnection;
use crate::error::PipelineError;

/// The closed set of entities this pipeline loads.
///
/// [`EntityKind::ALL`] is the dependency (parent-to-child) order;
/// ProductCategory has no parent and only needs to precede Product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Region,
    Country,
    ProductCategory,
    Product,
    Customer,
    OrderDetail,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Region,
        EntityKind::Country,
        EntityKind::ProductCategory,
        EntityKind::Product,
        EntityKind::Customer,
        EntityKind::OrderDetail,
    ];

    pub fn table_name(self) -> &'static str {
        match self {
            EntityKind::Region => "regions",
            EntityKind::Country => "countries",
            EntityKind::ProductCategory => "product_categories",
            EntityKind::Product => "products",
            EntityKind::Customer => "customers",
            EntityKind::OrderDetail => "order_details",
        }
    }

    #[cfg(feature = "sqlite")]
    fn create_sql(self) -> &'static str {
        match self {
            EntityKind::Region => {
                "CREATE TABLE regions (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL
                )"
            }
            EntityKind::Country => {
                "CREATE TABLE countries (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    region_id INTEGER NOT NULL REFERENCES regions(id)
                )"
            }
            EntityKind::ProductCategory => {
                "CREATE TABLE product_categories (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    description TEXT NOT NULL
                )"
            }
            EntityKind::Product => {
                "CREATE TABLE products (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    unit_price DOUBLE NOT NULL,
                    category_id INTEGER NOT NULL REFERENCES product_categories(id)
                )"
            }
            EntityKind::Customer => {
                "CREATE TABLE customers (
                    id INTEGER PRIMARY KEY,
                    first_name TEXT NOT NULL,
                    last_name TEXT NOT NULL,
                    address TEXT NOT NULL,
                    city TEXT NOT NULL,
                    country_id INTEGER NOT NULL REFERENCES countries(id)
                )"
            }
            EntityKind::OrderDetail => {
                "CREATE TABLE order_details (
                    id INTEGER PRIMARY KEY,
                    customer_id INTEGER NOT NULL REFERENCES customers(id),
                    product_id INTEGER NOT NULL REFERENCES products(id),
                    order_date TEXT NOT NULL,
                    quantity INTEGER NOT NULL
                )"
            }
        }
    }

    #[cfg(feature = "postgres")]
    fn create_sql(self) -> &'static str {
        match self {
            EntityKind::Region => {
                "CREATE TABLE regions (
                    id SERIAL PRIMARY KEY,
                    name TEXT NOT NULL
                )"
            }
            EntityKind::Country => {
                "CREATE TABLE countries (
                    id SERIAL PRIMARY KEY,
                    name TEXT NOT NULL,
                    region_id INTEGER NOT NULL REFERENCES regions(id)
                )"
            }
            EntityKind::ProductCategory => {
                "CREATE TABLE product_categories (
                    id SERIAL PRIMARY KEY,
                    name TEXT NOT NULL,
                    description TEXT NOT NULL
                )"
            }
            EntityKind::Product => {
                "CREATE TABLE products (
                    id SERIAL PRIMARY KEY,
                    name TEXT NOT NULL,
                    unit_price DOUBLE PRECISION NOT NULL,
                    category_id INTEGER NOT NULL REFERENCES product_categories(id)
                )"
            }
            EntityKind::Customer => {
                "CREATE TABLE customers (
                    id SERIAL PRIMARY KEY,
                    first_name TEXT NOT NULL,
                    last_name TEXT NOT NULL,
                    address TEXT NOT NULL,
                    city TEXT NOT NULL,
                    country_id INTEGER NOT NULL REFERENCES countries(id)
                )"
            }
            EntityKind::OrderDetail => {
                "CREATE TABLE order_details (
                    id SERIAL PRIMARY KEY,
                    customer_id INTEGER NOT NULL REFERENCES customers(id),
                    product_id INTEGER NOT NULL REFERENCES products(id),
                    order_date TEXT NOT NULL,
                    quantity INTEGER NOT NULL
                )"
            }
        }
    }

    #[cfg(feature = "sqlite")]
    fn drop_sql(self) -> &'static str {
        match self {
            EntityKind::Region => "DROP TABLE IF EXISTS regions",
            EntityKind::Country => "DROP TABLE IF EXISTS countries",
            EntityKind::ProductCategory => "DROP TABLE IF EXISTS product_categories",
            EntityKind::Product => "DROP TABLE IF EXISTS products",
            EntityKind::Customer => "DROP TABLE IF EXISTS customers",
            EntityKind::OrderDetail => "DROP TABLE IF EXISTS order_details",
        }
    }

    #[cfg(feature = "postgres")]
    fn drop_sql(self) -> &'static str {
        match self {
            EntityKind::Region => "DROP TABLE IF EXISTS regions CASCADE",
            EntityKind::Country => "DROP TABLE IF EXISTS countries CASCADE",
            EntityKind::ProductCategory => "DROP TABLE IF EXISTS product_categories CASCADE",
            EntityKind::Product => "DROP TABLE IF EXISTS products CASCADE",
            EntityKind::Customer => "DROP TABLE IF EXISTS customers CASCADE",
            EntityKind::OrderDetail => "DROP TABLE IF EXISTS order_details CASCADE",
        }
    }
}

/// Drop and recreate all six tables with their foreign keys.
///
/// Destructive and idempotent: safe against an empty or a previously
/// populated store; callers must not assume prior data survives.
/// Drops run child-to-parent with referential enforcement suspended on
/// SQLite (PostgreSQL drops cascade instead), and enforcement is
/// re-enabled before any table is recreated. Any DDL failure aborts
/// the run.
pub fn rebuild_schema(conn: &mut DbConnection) -> Result<(), PipelineError> {
    #[cfg(feature = "sqlite")]
    sql_query("PRAGMA foreign_keys = OFF")
        .execute(conn)
        .map_err(PipelineError::Schema)?;

    for entity in EntityKind::ALL.iter().rev() {
        sql_query(entity.drop_sql())
            .execute(conn)
            .map_err(PipelineError::Schema)?;
    }

    #[cfg(feature = "sqlite")]
    sql_query("PRAGMA foreign_keys = ON")
        .execute(conn)
        .map_err(PipelineError::Schema)?;

    for entity in EntityKind::ALL {
        tracing::debug!("Creating table {}", entity.table_name());
        sql_query(entity.create_sql())
            .execute(conn)
            .map_err(PipelineError::Schema)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_order_lists_parents_before_children() {
        let order = EntityKind::ALL;
        let pos = |e| order.iter().position(|&x| x == e).unwrap();

        assert!(pos(EntityKind::Region) < pos(EntityKind::Country));
        assert!(pos(EntityKind::Country) < pos(EntityKind::Customer));
        assert!(pos(EntityKind::ProductCategory) < pos(EntityKind::Product));
        assert!(pos(EntityKind::Product) < pos(EntityKind::OrderDetail));
        assert!(pos(EntityKind::Customer) < pos(EntityKind::OrderDetail));
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn test_rebuild_schema_is_idempotent() {
        let mut conn = <DbConnection as diesel::Connection>::establish(":memory:").unwrap();
        rebuild_schema(&mut conn).unwrap();
        // Second rebuild against the populated catalog must also succeed.
        rebuild_schema(&mut conn).unwrap();
    }
}
