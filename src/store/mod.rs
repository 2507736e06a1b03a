//! Persistent store - named JSON blobs over a single key-value table.
//!
//! Every domain collection lives under one fixed key from [`keys`]. Reads
//! resolve a missing or corrupt blob to the caller's default and never
//! surface an error for it; writes replace the whole value under the key
//! (last-writer-wins, no cross-key transactions). The device-local
//! single-writer model means no locking beyond the connection itself.

use crate::entities::{StoreEntry, store_entry};
use crate::errors::Result;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Fixed storage keys, one per domain collection.
pub mod keys {
    /// Catalog products
    pub const PRODUCTS: &str = "products";
    /// Orders placed at checkout
    pub const ORDERS: &str = "orders";
    /// Express offers
    pub const OFFERS: &str = "offers";
    /// In-app notifications
    pub const NOTIFICATIONS: &str = "notifications";
    /// The singleton user profile
    pub const USER_PROFILE: &str = "user_profile";
    /// Mascot persona configuration
    pub const MASCOT_CONFIG: &str = "mascot_config";
    /// Mascot chat history
    pub const CHAT_HISTORY: &str = "chat_history";
    /// Community wall posts
    pub const COMMUNITY_POSTS: &str = "community_posts";
    /// Customer suggestions
    pub const SUGGESTIONS: &str = "suggestions";
    /// Combo bundles
    pub const BUNDLES: &str = "bundles";
    /// Flash story banners
    pub const STORIES: &str = "stories";
    /// Debtors ledger
    pub const DEBTORS: &str = "debtors";
    /// Expense ledger
    pub const EXPENSES: &str = "expenses";
    /// Admin sticky notes
    pub const STICKY_NOTES: &str = "sticky_notes";
    /// Blocked client names
    pub const BLOCKED_USERS: &str = "blocked_users";
    /// Daily AI usage counter
    pub const API_USAGE: &str = "api_usage";
    /// Special item requests
    pub const SPECIAL_REQUESTS: &str = "special_requests";
    /// Per-device visit counters
    pub const USER_STATS: &str = "user_stats";
    /// Weekly opening hours
    pub const OPENING_HOURS: &str = "opening_hours";
    /// The live shopping cart
    pub const CART: &str = "cart";
    /// Timestamp of the last proximity alert
    pub const PROXIMITY_LAST_ALERT: &str = "proximity_last_alert";
}

/// Reads one value from the store.
///
/// Returns `Ok(None)` when the key is absent *or* the stored JSON fails to
/// parse; a corrupt blob is logged and treated as missing rather than
/// propagated (the caller substitutes its default).
///
/// # Errors
/// Returns `Error::Database` only for connection-level failures.
pub async fn read_value<T: DeserializeOwned>(
    db: &DatabaseConnection,
    key: &str,
) -> Result<Option<T>> {
    let entry = StoreEntry::find_by_id(key).one(db).await?;

    let Some(entry) = entry else {
        debug!("Store key '{}' is absent", key);
        return Ok(None);
    };

    match serde_json::from_str(&entry.value) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("Corrupt blob under store key '{}': {}", key, e);
            Ok(None)
        }
    }
}

/// Reads a whole collection, defaulting to an empty list for a missing or
/// corrupt blob.
///
/// # Errors
/// Returns `Error::Database` only for connection-level failures.
pub async fn read_collection<T: DeserializeOwned>(
    db: &DatabaseConnection,
    key: &str,
) -> Result<Vec<T>> {
    Ok(read_value(db, key).await?.unwrap_or_default())
}

/// Writes one value into the store, replacing whatever was under the key.
///
/// # Errors
/// Returns `Error::Database` on write failure. Serialization of a domain
/// record cannot fail in practice but is propagated as `Error::Json`.
pub async fn write_value<T: Serialize>(
    db: &DatabaseConnection,
    key: &str,
    value: &T,
) -> Result<()> {
    let json = serde_json::to_string(value)?;

    let entry = store_entry::ActiveModel {
        key: Set(key.to_string()),
        value: Set(json),
        updated_at: Set(Utc::now().naive_utc()),
    };

    StoreEntry::insert(entry)
        .on_conflict(
            OnConflict::column(store_entry::Column::Key)
                .update_columns([store_entry::Column::Value, store_entry::Column::UpdatedAt])
                .to_owned(),
        )
        .exec(db)
        .await?;

    debug!("Wrote store key '{}'", key);
    Ok(())
}

/// Removes a key from the store. Absent keys are a no-op.
///
/// # Errors
/// Returns `Error::Database` on delete failure.
pub async fn delete_key(db: &DatabaseConnection, key: &str) -> Result<()> {
    StoreEntry::delete_by_id(key).exec(db).await?;
    debug!("Deleted store key '{}'", key);
    Ok(())
}
