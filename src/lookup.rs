//! Natural-key to surrogate-id lookups.
//!
//! After each entity table is loaded, its rows are read back (inside
//! the running transaction, so store-generated keys are visible) into
//! an immutable snapshot. The snapshot is passed by reference into the
//! next dependent extractor; nothing here is shared global state.

use std::collections::HashMap;

use diesel::prelude::*;

use crate::db::DbConnection;

/// Immutable natural-key -> surrogate-id snapshot for one entity table.
#[derive(Debug, Clone, Default)]
pub struct IdLookup {
    ids: HashMap<String, i32>,
}

impl IdLookup {
    pub fn from_pairs(pairs: Vec<(String, i32)>) -> Self {
        Self {
            ids: pairs.into_iter().collect(),
        }
    }

    /// Resolve a natural key; `None` marks an orphan reference.
    pub fn resolve(&self, key: &str) -> Option<i32> {
        self.ids.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

pub fn region_lookup(conn: &mut DbConnection) -> QueryResult<IdLookup> {
    use crate::schema::regions::dsl::*;
    let pairs = regions.select((name, id)).load::<(String, i32)>(conn)?;
    Ok(IdLookup::from_pairs(pairs))
}

pub fn country_lookup(conn: &mut DbConnection) -> QueryResult<IdLookup> {
    use crate::schema::countries::dsl::*;
    let pairs = countries.select((name, id)).load::<(String, i32)>(conn)?;
    Ok(IdLookup::from_pairs(pairs))
}

pub fn category_lookup(conn: &mut DbConnection) -> QueryResult<IdLookup> {
    use crate::schema::product_categories::dsl::*;
    let pairs = product_categories
        .select((name, id))
        .load::<(String, i32)>(conn)?;
    Ok(IdLookup::from_pairs(pairs))
}

pub fn product_lookup(conn: &mut DbConnection) -> QueryResult<IdLookup> {
    use crate::schema::products::dsl::*;
    let pairs = products.select((name, id)).load::<(String, i32)>(conn)?;
    Ok(IdLookup::from_pairs(pairs))
}

/// Customers are keyed by `"{first} {last}"`. Single-token names have
/// an empty last name, so the key is trimmed.
pub fn customer_lookup(conn: &mut DbConnection) -> QueryResult<IdLookup> {
    use crate::schema::customers::dsl::*;
    let rows = customers
        .select((first_name, last_name, id))
        .load::<(String, String, i32)>(conn)?;
    Ok(IdLookup::from_pairs(
        rows.into_iter()
            .map(|(first, last, cid)| (format!("{} {}", first, last).trim().to_string(), cid))
            .collect(),
    ))
}
