//! SQLite store implementation using Diesel.

use diesel::prelude::*;
use rust_decimal::Decimal;

use super::ProductStore;
use crate::db::model::{NewProductRow, ProductRow};
use crate::db::schema::products;
use crate::db::{configure_sqlite_connection, DbPool};
use crate::domain::{clamped_quantity, Product, ProductDraft, ProductId};
use crate::error::{Result, StorageError};

/// SQLite-backed product store.
///
/// Every mutation runs inside a transaction on one pooled connection, so an
/// insert and the read-back of its assigned rowid cannot interleave with
/// another writer.
pub struct SqliteProductStore {
    pool: DbPool,
}

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::Integer)]
    #[diesel(column_name = "id")]
    id: i32,
}

impl SqliteProductStore {
    /// Create a new SQLite product store.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(draft: &ProductDraft) -> NewProductRow {
        NewProductRow {
            name: draft.name.clone(),
            description: draft.description.clone(),
            category: draft.category.clone(),
            price: draft.price.to_string(),
            quantity: i32::try_from(draft.quantity).unwrap_or(i32::MAX),
        }
    }

    fn from_row(row: ProductRow) -> Result<Product> {
        let price: Decimal = row.price.parse().map_err(|e| StorageError::CorruptRow {
            id: row.id,
            reason: format!("price {:?}: {e}", row.price),
        })?;
        let quantity = u32::try_from(row.quantity).map_err(|_| StorageError::CorruptRow {
            id: row.id,
            reason: format!("negative quantity {}", row.quantity),
        })?;

        Ok(Product {
            id: ProductId::new(row.id),
            name: row.name,
            description: row.description,
            category: row.category,
            price,
            quantity,
        })
    }
}

impl ProductStore for SqliteProductStore {
    async fn list(&self) -> Result<Vec<Product>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let rows: Vec<ProductRow> = products::table
            .load(&mut conn)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product> {
        draft.validate()?;
        let row = Self::to_row(draft);

        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        configure_sqlite_connection(&mut conn)?;

        let id = conn
            .transaction(|conn| {
                diesel::insert_into(products::table)
                    .values(&row)
                    .execute(conn)?;

                diesel::sql_query("SELECT last_insert_rowid() AS id")
                    .get_result::<LastInsertRowId>(conn)
                    .map(|row| row.id)
            })
            .map_err(|e: diesel::result::Error| StorageError::Database(e.to_string()))?;

        Ok(Product {
            id: ProductId::new(id),
            name: draft.name.clone(),
            description: draft.description.clone(),
            category: draft.category.clone(),
            price: draft.price,
            quantity: draft.quantity,
        })
    }

    async fn adjust_quantity(&self, id: ProductId, delta: i64) -> Result<Option<Product>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        configure_sqlite_connection(&mut conn)?;

        let updated = conn
            .transaction(|conn| {
                let row: Option<ProductRow> =
                    products::table.find(id.value()).first(conn).optional()?;

                let Some(mut row) = row else {
                    return Ok(None);
                };

                let current = u32::try_from(row.quantity).unwrap_or(0);
                let adjusted = clamped_quantity(current, delta);
                row.quantity = i32::try_from(adjusted).unwrap_or(i32::MAX);

                diesel::update(products::table.find(id.value()))
                    .set(products::quantity.eq(row.quantity))
                    .execute(conn)?;

                Ok::<Option<ProductRow>, diesel::result::Error>(Some(row))
            })
            .map_err(|e| StorageError::Database(e.to_string()))?;

        updated.map(Self::from_row).transpose()
    }

    async fn remove(&self, id: ProductId) -> Result<bool> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        configure_sqlite_connection(&mut conn)?;

        let deleted = diesel::delete(products::table.find(id.value()))
            .execute(&mut conn)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations};
    use crate::domain::error::ValidationError;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    fn setup_test_db() -> DbPool {
        let pool = create_pool(":memory:").expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        pool
    }

    fn sample_draft() -> ProductDraft {
        ProductDraft {
            name: "Bread".to_string(),
            description: Some("Sourdough loaf".to_string()),
            category: Some("Bakery".to_string()),
            price: dec!(2.50),
            quantity: 10,
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_preserves_fields() {
        let store = SqliteProductStore::new(setup_test_db());

        let product = store.create(&sample_draft()).await.unwrap();

        assert!(product.id.value() >= 1);
        assert_eq!(product.name, "Bread");
        assert_eq!(product.description.as_deref(), Some("Sourdough loaf"));
        assert_eq!(product.price, dec!(2.50));
        assert_eq!(product.quantity, 10);
    }

    #[tokio::test]
    async fn list_round_trips_exact_price() {
        let store = SqliteProductStore::new(setup_test_db());
        let mut draft = sample_draft();
        draft.price = dec!(19.90);
        store.create(&draft).await.unwrap();

        let all = store.list().await.unwrap();

        assert_eq!(all.len(), 1);
        assert_eq!(all[0].price, dec!(19.90));
    }

    #[tokio::test]
    async fn create_rejects_invalid_draft_without_inserting() {
        let store = SqliteProductStore::new(setup_test_db());
        let mut draft = sample_draft();
        draft.name = "  ".to_string();

        let result = store.create(&draft).await;

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::MissingField { field: "name" }))
        ));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn adjust_quantity_clamps_at_zero() {
        let store = SqliteProductStore::new(setup_test_db());
        let product = store.create(&sample_draft()).await.unwrap();

        let updated = store
            .adjust_quantity(product.id, -20)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.quantity, 0);

        let restocked = store
            .adjust_quantity(product.id, 3)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(restocked.quantity, 3);
    }

    #[tokio::test]
    async fn adjust_quantity_unknown_id_returns_none() {
        let store = SqliteProductStore::new(setup_test_db());

        let result = store.adjust_quantity(ProductId::new(42), 1).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn remove_deletes_row() {
        let store = SqliteProductStore::new(setup_test_db());
        let product = store.create(&sample_draft()).await.unwrap();

        assert!(store.remove(product.id).await.unwrap());
        assert!(!store.remove(product.id).await.unwrap()); // Already deleted
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn from_row_rejects_corrupt_price() {
        let result = SqliteProductStore::from_row(ProductRow {
            id: 7,
            name: "Bread".to_string(),
            description: None,
            category: None,
            price: "not-a-price".to_string(),
            quantity: 1,
        });

        assert!(matches!(
            result,
            Err(Error::Storage(StorageError::CorruptRow { id: 7, .. }))
        ));
    }
}
