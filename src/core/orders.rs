//! Order lifecycle and client bookkeeping.

use crate::errors::{Error, Result};
use crate::models::{timestamp_id, CartItem, DeliveryMethod, Order, OrderStatus};
use crate::store::{self, keys};
use sea_orm::DatabaseConnection;
use std::collections::BTreeSet;
use tracing::{info, instrument};

/// Everything an order needs beyond the cart snapshot itself.
#[derive(Debug, Clone)]
pub struct OrderDetails {
    pub client_name: String,
    pub delivery_method: DeliveryMethod,
    pub pickup_time: Option<String>,
    pub distance_km: Option<f64>,
    pub location_link: Option<String>,
}

/// Returns all orders, newest first.
pub async fn get_orders(db: &DatabaseConnection) -> Result<Vec<Order>> {
    store::read_collection(db, keys::ORDERS).await
}

/// Creates a PENDING order from the given cart snapshot.
#[instrument(skip(db, items, details), fields(client = %details.client_name))]
pub async fn place_order(
    db: &DatabaseConnection,
    items: Vec<CartItem>,
    details: OrderDetails,
    now_ms: i64,
) -> Result<Order> {
    if items.is_empty() {
        return Err(Error::Validation {
            message: "Cannot place an order with an empty cart".to_string(),
        });
    }
    if details.client_name.trim().is_empty() {
        return Err(Error::Validation {
            message: "An order requires a client name".to_string(),
        });
    }

    let total = items.iter().map(CartItem::line_total).sum();
    let order = Order {
        id: timestamp_id(now_ms),
        date: now_ms,
        client_name: details.client_name,
        items,
        total,
        delivery_method: details.delivery_method,
        status: OrderStatus::Pending,
        pickup_time: details.pickup_time,
        distance_km: details.distance_km,
        location_link: details.location_link,
    };

    let mut orders = get_orders(db).await?;
    orders.insert(0, order.clone());
    store::write_value(db, keys::ORDERS, &orders).await?;

    info!("Placed order '{}' for {:.2}", order.id, order.total);
    Ok(order)
}

/// Moves an order to a new status; unknown ids are a no-op.
#[instrument(skip(db))]
pub async fn update_order_status(
    db: &DatabaseConnection,
    order_id: &str,
    status: OrderStatus,
) -> Result<Vec<Order>> {
    let mut orders = get_orders(db).await?;
    for order in &mut orders {
        if order.id == order_id {
            order.status = status;
        }
    }
    store::write_value(db, keys::ORDERS, &orders).await?;
    Ok(orders)
}

/// Deletes an order from history.
#[instrument(skip(db))]
pub async fn delete_order(db: &DatabaseConnection, order_id: &str) -> Result<Vec<Order>> {
    let mut orders = get_orders(db).await?;
    orders.retain(|order| order.id != order_id);
    store::write_value(db, keys::ORDERS, &orders).await?;
    Ok(orders)
}

/// Distinct client names across order history, sorted.
pub async fn known_client_names(db: &DatabaseConnection) -> Result<Vec<String>> {
    let orders = get_orders(db).await?;
    let names: BTreeSet<String> = orders.into_iter().map(|o| o.client_name).collect();
    Ok(names.into_iter().collect())
}

/// Whether a client name is currently blocked from ordering.
pub async fn is_blocked(db: &DatabaseConnection, name: &str) -> Result<bool> {
    let blocked: Vec<String> = store::read_collection(db, keys::BLOCKED_USERS).await?;
    Ok(blocked.iter().any(|b| b == name))
}

/// Blocks or unblocks a client name; returns the new list.
#[instrument(skip(db))]
pub async fn toggle_blocked(db: &DatabaseConnection, name: &str) -> Result<Vec<String>> {
    let mut blocked: Vec<String> = store::read_collection(db, keys::BLOCKED_USERS).await?;
    if let Some(pos) = blocked.iter().position(|b| b == name) {
        blocked.remove(pos);
        info!("Unblocked '{}'", name);
    } else {
        blocked.push(name.to_string());
        info!("Blocked '{}'", name);
    }
    store::write_value(db, keys::BLOCKED_USERS, &blocked).await?;
    Ok(blocked)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{sample_cart_item, sample_product, setup_test_db};

    fn details(client: &str) -> OrderDetails {
        OrderDetails {
            client_name: client.to_string(),
            delivery_method: DeliveryMethod::Urban,
            pickup_time: Some("15:30".to_string()),
            distance_km: None,
            location_link: None,
        }
    }

    #[tokio::test]
    async fn test_place_order_snapshots_cart_with_pending_status() -> Result<()> {
        let db = setup_test_db().await?;

        let items = vec![
            sample_cart_item(sample_product("p1", 100.0), 2),
            sample_cart_item(sample_product("p2", 50.0), 1),
        ];
        let order = place_order(&db, items, details("Maria"), 1_000).await?;

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, 250.0);
        assert_eq!(order.id, "1000");

        let orders = get_orders(&db).await?;
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0], order);
        Ok(())
    }

    #[tokio::test]
    async fn test_place_order_rejects_empty_cart_and_blank_client() -> Result<()> {
        let db = setup_test_db().await?;

        let empty = place_order(&db, vec![], details("Maria"), 1_000).await;
        assert!(matches!(empty, Err(Error::Validation { .. })));

        let items = vec![sample_cart_item(sample_product("p1", 100.0), 1)];
        let blank = place_order(&db, items, details("  "), 1_000).await;
        assert!(matches!(blank, Err(Error::Validation { .. })));

        assert!(get_orders(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_orders_listed_newest_first() -> Result<()> {
        let db = setup_test_db().await?;

        let items = vec![sample_cart_item(sample_product("p1", 100.0), 1)];
        place_order(&db, items.clone(), details("Maria"), 1_000).await?;
        place_order(&db, items, details("Pedro"), 2_000).await?;

        let orders = get_orders(&db).await?;
        assert_eq!(orders[0].client_name, "Pedro");
        assert_eq!(orders[1].client_name, "Maria");
        Ok(())
    }

    #[tokio::test]
    async fn test_status_transitions_and_delete() -> Result<()> {
        let db = setup_test_db().await?;

        let items = vec![sample_cart_item(sample_product("p1", 100.0), 1)];
        let order = place_order(&db, items, details("Maria"), 1_000).await?;

        let orders = update_order_status(&db, &order.id, OrderStatus::Completed).await?;
        assert_eq!(orders[0].status, OrderStatus::Completed);

        // Unknown id leaves everything untouched
        let orders = update_order_status(&db, "nope", OrderStatus::Cancelled).await?;
        assert_eq!(orders[0].status, OrderStatus::Completed);

        let orders = delete_order(&db, &order.id).await?;
        assert!(orders.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_known_client_names_deduplicates() -> Result<()> {
        let db = setup_test_db().await?;

        let items = vec![sample_cart_item(sample_product("p1", 100.0), 1)];
        place_order(&db, items.clone(), details("Maria"), 1_000).await?;
        place_order(&db, items.clone(), details("Pedro"), 2_000).await?;
        place_order(&db, items, details("Maria"), 3_000).await?;

        assert_eq!(known_client_names(&db).await?, vec!["Maria", "Pedro"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_blocked_list_toggles() -> Result<()> {
        let db = setup_test_db().await?;

        assert!(!is_blocked(&db, "Maria").await?);
        toggle_blocked(&db, "Maria").await?;
        assert!(is_blocked(&db, "Maria").await?);
        toggle_blocked(&db, "Maria").await?;
        assert!(!is_blocked(&db, "Maria").await?);
        Ok(())
    }
}
