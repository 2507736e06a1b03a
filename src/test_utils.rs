//! Shared test utilities for `Mercadito`.
//!
//! Provides the in-memory database setup used by every integration test plus
//! factories for domain records with sensible defaults.

use crate::entities::{StoreEntry, store_entry};
use crate::errors::Result;
use crate::models::{
    CartItem, DeliveryMethod, EquippedAccessories, Order, OrderStatus, Product, UserLevel,
    UserProfile,
};
use chrono::Utc;
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait};

/// Creates an in-memory `SQLite` database with the store table initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Writes a raw (possibly invalid) string under a store key, bypassing
/// serialization. Used to simulate corrupt blobs.
pub async fn write_raw(db: &DatabaseConnection, key: &str, raw: &str) -> Result<()> {
    let entry = store_entry::ActiveModel {
        key: Set(key.to_string()),
        value: Set(raw.to_string()),
        updated_at: Set(Utc::now().naive_utc()),
    };
    StoreEntry::insert(entry)
        .on_conflict(
            sea_orm::sea_query::OnConflict::column(store_entry::Column::Key)
                .update_columns([store_entry::Column::Value, store_entry::Column::UpdatedAt])
                .to_owned(),
        )
        .exec(db)
        .await?;
    Ok(())
}

/// Creates a product with sensible defaults.
#[must_use]
pub fn sample_product(id: &str, price: f64) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Producto {id}"),
        price,
        category: "Oficina".to_string(),
        sub_category: "Papel".to_string(),
        brand: "Generico".to_string(),
        image: String::new(),
        description: "Articulo de prueba".to_string(),
        stock: Some(25),
    }
}

/// Creates a cart line wrapping `product` with no frozen discount.
#[must_use]
pub fn sample_cart_item(product: Product, quantity: u32) -> CartItem {
    CartItem {
        product,
        quantity,
        discount_price: None,
    }
}

/// Creates an order for `client` with the given status and total.
#[must_use]
pub fn sample_order(id: &str, client: &str, total: f64, status: OrderStatus) -> Order {
    Order {
        id: id.to_string(),
        date: 1_700_000_000_000,
        client_name: client.to_string(),
        items: vec![sample_cart_item(sample_product("p1", total), 1)],
        total,
        delivery_method: DeliveryMethod::Urban,
        status,
        pickup_time: None,
        distance_km: None,
        location_link: None,
    }
}

/// Creates a user profile with the given point total and no accessories.
#[must_use]
pub fn sample_profile(points: i64) -> UserProfile {
    UserProfile {
        id: "u1".to_string(),
        name: "Amiga".to_string(),
        role: None,
        grade: "5to Grado".to_string(),
        avatar_id: 0,
        favorite_color: "#002D62".to_string(),
        created_at: 1_700_000_000_000,
        points,
        level: UserLevel::Novato,
        badges: Vec::new(),
        wishlist: Vec::new(),
        redeemed_rewards: Vec::new(),
        order_history: Vec::new(),
        last_daily_reward: None,
        streak: 0,
        inventory: Vec::new(),
        equipped: EquippedAccessories::default(),
    }
}
