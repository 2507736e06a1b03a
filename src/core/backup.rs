//! Versioned export/import of the admin-critical collections.
//!
//! The backup document carries a `version` tag so a future format change can
//! be detected before anything is overwritten. Import validates the whole
//! document first; a parse or version failure applies nothing.

use crate::core::{bookkeeping, catalog, orders};
use crate::errors::{Error, Result};
use crate::models::{Debtor, Expense, Order, Product};
use crate::store::{self, keys};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Schema version stamped on every export.
pub const BACKUP_VERSION: u32 = 1;

/// The backup document: four collections plus the format version.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BackupDocument {
    pub version: u32,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub expenses: Vec<Expense>,
    pub debtors: Vec<Debtor>,
}

/// Serializes the admin collections into one backup JSON string.
#[instrument(skip(db))]
pub async fn export_backup(db: &DatabaseConnection) -> Result<String> {
    let document = BackupDocument {
        version: BACKUP_VERSION,
        products: catalog::get_products(db).await?,
        orders: orders::get_orders(db).await?,
        expenses: bookkeeping::get_expenses(db).await?,
        debtors: bookkeeping::get_debtors(db).await?,
    };
    let json = serde_json::to_string(&document)?;
    info!(
        "Exported backup: {} products, {} orders",
        document.products.len(),
        document.orders.len()
    );
    Ok(json)
}

/// Restores the four collections from a backup JSON string.
///
/// The document is parsed and version-checked before any key is written,
/// so a rejected backup leaves the store untouched.
#[instrument(skip(db, json))]
pub async fn import_backup(db: &DatabaseConnection, json: &str) -> Result<()> {
    let document: BackupDocument =
        serde_json::from_str(json).map_err(|e| Error::Validation {
            message: format!("Backup file is not valid JSON: {e}"),
        })?;
    if document.version != BACKUP_VERSION {
        return Err(Error::UnsupportedBackupVersion {
            version: document.version,
        });
    }

    store::write_value(db, keys::PRODUCTS, &document.products).await?;
    store::write_value(db, keys::ORDERS, &document.orders).await?;
    store::write_value(db, keys::EXPENSES, &document.expenses).await?;
    store::write_value(db, keys::DEBTORS, &document.debtors).await?;

    info!(
        "Imported backup: {} products, {} orders, {} expenses, {} debtors",
        document.products.len(),
        document.orders.len(),
        document.expenses.len(),
        document.debtors.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseKind, OrderStatus};
    use crate::test_utils::{sample_order, sample_product, setup_test_db};

    #[tokio::test]
    async fn test_backup_roundtrip_restores_collections() -> Result<()> {
        let source = setup_test_db().await?;

        catalog::seed_initial_products(&source).await?;
        catalog::add_product(&source, sample_product("p99", 777.0)).await?;
        store::write_value(
            &source,
            keys::ORDERS,
            &vec![sample_order("o1", "Maria", 500.0, OrderStatus::Completed)],
        )
        .await?;
        bookkeeping::add_expense(&source, "Tinta", 1200.0, ExpenseKind::Supplies, 1_000).await?;
        bookkeeping::add_debtor(&source, "Juan", 250.0, "Fiado", None, 2_000).await?;

        let json = export_backup(&source).await?;

        // Restore onto a fresh device
        let target = setup_test_db().await?;
        import_backup(&target, &json).await?;

        assert_eq!(
            catalog::get_products(&target).await?,
            catalog::get_products(&source).await?
        );
        assert_eq!(orders::get_orders(&target).await?.len(), 1);
        assert_eq!(bookkeeping::get_expenses(&target).await?.len(), 1);
        assert_eq!(bookkeeping::get_debtors(&target).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_version_rejected_without_writes() -> Result<()> {
        let db = setup_test_db().await?;
        catalog::add_product(&db, sample_product("keep", 1.0)).await?;

        let json = r#"{"version":2,"products":[],"orders":[],"expenses":[],"debtors":[]}"#;
        let result = import_backup(&db, json).await;
        assert!(matches!(
            result,
            Err(Error::UnsupportedBackupVersion { version: 2 })
        ));

        // Nothing was overwritten
        let products = catalog::get_products(&db).await?;
        assert!(products.iter().any(|p| p.id == "keep"));
        Ok(())
    }

    #[tokio::test]
    async fn test_garbage_input_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let result = import_backup(&db, "not json at all").await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_export_tags_current_version() -> Result<()> {
        let db = setup_test_db().await?;
        let json = export_backup(&db).await?;
        let document: BackupDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(document.version, BACKUP_VERSION);
        Ok(())
    }
}
