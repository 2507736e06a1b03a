//! Time-boxed express offers, combo bundles, and flash story banners.
//!
//! Offers are evicted lazily: reads filter by `end_time`, and the periodic
//! maintenance pass calls `prune_expired` to rewrite the collections.

use crate::core::notifications;
use crate::errors::{Error, Result};
use crate::models::{
    timestamp_id, ComboBundle, ExpressOffer, NotificationKind, Product, StoryOffer,
};
use crate::store::{self, keys};
use sea_orm::DatabaseConnection;
use tracing::{info, instrument};

/// Returns all stored offers, expired ones included.
pub async fn get_offers(db: &DatabaseConnection) -> Result<Vec<ExpressOffer>> {
    store::read_collection(db, keys::OFFERS).await
}

/// Offers that still apply (`end_time > now`).
pub async fn active_offers(db: &DatabaseConnection, now_ms: i64) -> Result<Vec<ExpressOffer>> {
    let offers = get_offers(db).await?;
    Ok(offers.into_iter().filter(|o| o.end_time > now_ms).collect())
}

/// Creates an express offer and announces it with an OFFER notification.
#[instrument(skip(db, product), fields(product = %product.name))]
pub async fn create_offer(
    db: &DatabaseConnection,
    product: &Product,
    discount_percent: f64,
    duration_minutes: i64,
    now_ms: i64,
) -> Result<ExpressOffer> {
    if !(0.0..=100.0).contains(&discount_percent) {
        return Err(Error::Validation {
            message: format!("Discount must be between 0 and 100, got {discount_percent}"),
        });
    }
    if duration_minutes <= 0 {
        return Err(Error::Validation {
            message: "Offer duration must be positive".to_string(),
        });
    }

    let offer = ExpressOffer {
        id: timestamp_id(now_ms),
        product_id: product.id.clone(),
        discount_percent,
        duration_minutes,
        end_time: now_ms + duration_minutes * 60_000,
        active: true,
    };

    let mut offers = get_offers(db).await?;
    offers.push(offer.clone());
    store::write_value(db, keys::OFFERS, &offers).await?;

    notifications::add_notification(
        db,
        "¡Oferta Express!",
        &format!(
            "{} con {}% de descuento por {} minutos",
            product.name, discount_percent, duration_minutes
        ),
        NotificationKind::Offer,
        now_ms,
    )
    .await?;

    info!("Created offer '{}' on '{}'", offer.id, product.id);
    Ok(offer)
}

/// Rewrites the offer and story collections without expired entries.
/// Returns how many entries were dropped.
#[instrument(skip(db))]
pub async fn prune_expired(db: &DatabaseConnection, now_ms: i64) -> Result<usize> {
    let offers = get_offers(db).await?;
    let before = offers.len();
    let kept: Vec<ExpressOffer> = offers.into_iter().filter(|o| o.end_time > now_ms).collect();
    let mut dropped = before - kept.len();
    if dropped > 0 {
        store::write_value(db, keys::OFFERS, &kept).await?;
    }

    let stories = get_stories(db).await?;
    let before = stories.len();
    let kept: Vec<StoryOffer> = stories
        .into_iter()
        .filter(|s| s.expires_at > now_ms)
        .collect();
    if before > kept.len() {
        dropped += before - kept.len();
        store::write_value(db, keys::STORIES, &kept).await?;
    }

    if dropped > 0 {
        info!("Pruned {} expired offers/stories", dropped);
    }
    Ok(dropped)
}

/// Returns all combo bundles.
pub async fn get_bundles(db: &DatabaseConnection) -> Result<Vec<ComboBundle>> {
    store::read_collection(db, keys::BUNDLES).await
}

/// Adds a combo bundle built by the admin.
#[instrument(skip(db, bundle), fields(title = %bundle.title))]
pub async fn add_bundle(db: &DatabaseConnection, bundle: ComboBundle) -> Result<Vec<ComboBundle>> {
    let mut bundles = get_bundles(db).await?;
    bundles.push(bundle);
    store::write_value(db, keys::BUNDLES, &bundles).await?;
    Ok(bundles)
}

/// Deletes a combo bundle.
#[instrument(skip(db))]
pub async fn delete_bundle(db: &DatabaseConnection, bundle_id: &str) -> Result<Vec<ComboBundle>> {
    let mut bundles = get_bundles(db).await?;
    bundles.retain(|b| b.id != bundle_id);
    store::write_value(db, keys::BUNDLES, &bundles).await?;
    Ok(bundles)
}

/// Returns all stored stories, expired ones included.
pub async fn get_stories(db: &DatabaseConnection) -> Result<Vec<StoryOffer>> {
    store::read_collection(db, keys::STORIES).await
}

/// Stories still inside their display window.
pub async fn active_stories(db: &DatabaseConnection, now_ms: i64) -> Result<Vec<StoryOffer>> {
    let stories = get_stories(db).await?;
    Ok(stories
        .into_iter()
        .filter(|s| s.expires_at > now_ms)
        .collect())
}

/// Adds a flash story banner.
#[instrument(skip(db, story), fields(title = %story.title))]
pub async fn add_story(db: &DatabaseConnection, story: StoryOffer) -> Result<Vec<StoryOffer>> {
    let mut stories = get_stories(db).await?;
    stories.push(story);
    store::write_value(db, keys::STORIES, &stories).await?;
    Ok(stories)
}

/// Marks one story as seen by the customer.
pub async fn mark_story_seen(db: &DatabaseConnection, story_id: &str) -> Result<Vec<StoryOffer>> {
    let mut stories = get_stories(db).await?;
    for story in &mut stories {
        if story.id == story_id {
            story.seen = true;
        }
    }
    store::write_value(db, keys::STORIES, &stories).await?;
    Ok(stories)
}
