//! Diesel models for the six normalized sales entities.
//!
//! Each entity has a `Queryable` row struct carrying the
//! store-generated id and an `Insertable` `New*` struct without it.
//! Surrogate ids are assigned by the store on insert and read back
//! through [`crate::lookup`].

use crate::schema::*;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Queryable, Serialize, Deserialize)]
pub struct Region {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = regions)]
pub struct NewRegion {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Queryable, Serialize, Deserialize)]
pub struct Country {
    pub id: i32,
    pub name: String,
    pub region_id: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = countries)]
pub struct NewCountry {
    pub name: String,
    pub region_id: i32,
}

#[derive(Debug, Clone, PartialEq, Queryable, Serialize, Deserialize)]
pub struct ProductCategory {
    pub id: i32,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = product_categories)]
pub struct NewProductCategory {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Queryable, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub unit_price: f64,
    pub category_id: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = products)]
pub struct NewProduct {
    pub name: String,
    pub unit_price: f64,
    pub category_id: i32,
}

#[derive(Debug, Clone, PartialEq, Queryable, Serialize, Deserialize)]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub country_id: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = customers)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub country_id: i32,
}

/// Order lines are never deduplicated: one row per aligned
/// (product, quantity, date) position, even if repeated.
#[derive(Debug, Clone, PartialEq, Queryable, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: i32,
    pub customer_id: i32,
    pub product_id: i32,
    pub order_date: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = order_details)]
pub struct NewOrderDetail {
    pub customer_id: i32,
    pub product_id: i32,
    pub order_date: String,
    pub quantity: i32,
}
