//! Shopping cart business logic.
//!
//! The cart is a persisted collection of product snapshots. A discount is
//! resolved exactly once, at the moment a line is created, from the offers
//! active right then; the frozen `discount_price` is never re-evaluated, so
//! an offer expiring later does not change what is already in the cart.

use crate::errors::Result;
use crate::models::{CartItem, ExpressOffer, Product};
use crate::store::{self, keys};
use sea_orm::DatabaseConnection;
use tracing::{debug, instrument};

/// Returns the current cart contents.
pub async fn get_cart(db: &DatabaseConnection) -> Result<Vec<CartItem>> {
    store::read_collection(db, keys::CART).await
}

/// Adds one unit of `product` to the cart.
///
/// When a line for the product already exists its quantity is bumped and its
/// frozen discount kept. A new line freezes the discounted price computed
/// from the first offer with `end_time > now_ms` for this product, if any.
#[instrument(skip(db, product, offers))]
pub async fn add_to_cart(
    db: &DatabaseConnection,
    product: Product,
    offers: &[ExpressOffer],
    now_ms: i64,
) -> Result<Vec<CartItem>> {
    let mut cart = get_cart(db).await?;

    if let Some(line) = cart.iter_mut().find(|item| item.product.id == product.id) {
        line.quantity += 1;
    } else {
        let discount_price = offers
            .iter()
            .find(|o| o.product_id == product.id && o.end_time > now_ms)
            .map(|o| discounted_price(product.price, o.discount_percent));
        debug!(
            "New cart line for '{}' (discount: {:?})",
            product.id, discount_price
        );
        cart.push(CartItem {
            product,
            quantity: 1,
            discount_price,
        });
    }

    store::write_value(db, keys::CART, &cart).await?;
    Ok(cart)
}

/// Adjusts a line's quantity by `delta`. The quantity never goes negative;
/// reaching 0 removes the line, and adjusting an absent line is a no-op.
#[instrument(skip(db))]
pub async fn update_quantity(
    db: &DatabaseConnection,
    product_id: &str,
    delta: i32,
) -> Result<Vec<CartItem>> {
    let mut cart = get_cart(db).await?;

    for item in &mut cart {
        if item.product.id == product_id {
            let adjusted = i64::from(item.quantity) + i64::from(delta);
            item.quantity = u32::try_from(adjusted.max(0)).unwrap_or(0);
        }
    }
    cart.retain(|item| item.quantity > 0);

    store::write_value(db, keys::CART, &cart).await?;
    Ok(cart)
}

/// Removes a line from the cart regardless of quantity.
#[instrument(skip(db))]
pub async fn remove_from_cart(db: &DatabaseConnection, product_id: &str) -> Result<Vec<CartItem>> {
    let mut cart = get_cart(db).await?;
    cart.retain(|item| item.product.id != product_id);
    store::write_value(db, keys::CART, &cart).await?;
    Ok(cart)
}

/// Empties the cart (used after checkout).
pub async fn clear_cart(db: &DatabaseConnection) -> Result<()> {
    store::write_value(db, keys::CART, &Vec::<CartItem>::new()).await
}

/// Sum of line totals, honoring frozen discounts.
#[must_use]
pub fn cart_total(cart: &[CartItem]) -> f64 {
    cart.iter().map(CartItem::line_total).sum()
}

/// Total number of units across all lines.
#[must_use]
pub fn cart_item_count(cart: &[CartItem]) -> u32 {
    cart.iter().map(|item| item.quantity).sum()
}

/// The per-unit price after applying a percentage discount, rounded to the
/// nearest peso as shown to the customer.
#[must_use]
pub fn discounted_price(price: f64, discount_percent: f64) -> f64 {
    (price * (1.0 - discount_percent / 100.0)).round()
}
