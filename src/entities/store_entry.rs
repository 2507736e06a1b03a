//! Store entry entity - One row per named collection.
//!
//! Each row holds an entire domain collection (products, orders, offers, ...)
//! serialized as a JSON document. Writes replace the whole value, which makes
//! every mutation last-writer-wins on its own key with no cross-key coupling.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Key-value store row - one JSON blob per domain collection
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "store_entries")]
pub struct Model {
    /// Fixed collection key (e.g. `"products"`, `"orders"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// The collection serialized as a JSON document
    pub value: String,
    /// When this key was last written
    pub updated_at: DateTime,
}

/// `StoreEntry` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
