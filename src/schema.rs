//! Diesel table definitions for the normalized sales schema.
//!
//! Six tables connected by surrogate integer keys. The matching DDL
//! lives in [`crate::db::schema_manager`], which recreates the schema
//! on every pipeline run.

diesel::table! {
    regions (id) {
        id -> Integer,
        name -> Text,
    }
}

diesel::table! {
    countries (id) {
        id -> Integer,
        name -> Text,
        region_id -> Integer,
    }
}

diesel::table! {
    product_categories (id) {
        id -> Integer,
        name -> Text,
        description -> Text,
    }
}

diesel::table! {
    products (id) {
        id -> Integer,
        name -> Text,
        unit_price -> Double,
        category_id -> Integer,
    }
}

diesel::table! {
    customers (id) {
        id -> Integer,
        first_name -> Text,
        last_name -> Text,
        address -> Text,
        city -> Text,
        country_id -> Integer,
    }
}

diesel::table! {
    order_details (id) {
        id -> Integer,
        customer_id -> Integer,
        product_id -> Integer,
        order_date -> Text,
        quantity -> Integer,
    }
}

diesel::joinable!(countries -> regions (region_id));
diesel::joinable!(products -> product_categories (category_id));
diesel::joinable!(customers -> countries (country_id));
diesel::joinable!(order_details -> customers (customer_id));
diesel::joinable!(order_details -> products (product_id));

diesel::allow_tables_to_appear_in_same_query!(
    regions,
    countries,
    product_categories,
    products,
    customers,
    order_details,
);
