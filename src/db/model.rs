//! Database model types for Diesel ORM.
//!
//! Prices are stored as canonical decimal text: SQLite has no exact decimal
//! affinity and a REAL column would round them.

use diesel::prelude::*;

use super::schema::products;

/// Database row for a product (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: String,
    pub quantity: i32,
}

/// Database row for a product (insertable, id assigned by SQLite).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = products)]
pub struct NewProductRow {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: String,
    pub quantity: i32,
}
