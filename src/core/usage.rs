//! Daily AI-call quota tracking.
//!
//! The counter lives under one date; reading it on a later date yields a
//! fresh zero count without touching storage, so the reset costs nothing
//! on devices that never chat.

use crate::errors::Result;
use crate::models::ApiUsage;
use crate::store::{self, keys};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use tracing::debug;

/// Today's usage, auto-reset when the stored blob belongs to another date.
pub async fn api_usage(
    db: &DatabaseConnection,
    today: NaiveDate,
    daily_limit: u32,
) -> Result<ApiUsage> {
    let today_str = today.format("%Y-%m-%d").to_string();
    let stored: Option<ApiUsage> = store::read_value(db, keys::API_USAGE).await?;
    Ok(match stored {
        Some(usage) if usage.date == today_str => usage,
        _ => ApiUsage {
            date: today_str,
            count: 0,
            limit: daily_limit,
        },
    })
}

/// Whether the quota for `today` is used up.
pub async fn is_exhausted(
    db: &DatabaseConnection,
    today: NaiveDate,
    daily_limit: u32,
) -> Result<bool> {
    let usage = api_usage(db, today, daily_limit).await?;
    Ok(usage.count >= usage.limit)
}

/// Counts one completed remote call against today's quota.
pub async fn record_call(
    db: &DatabaseConnection,
    today: NaiveDate,
    daily_limit: u32,
) -> Result<ApiUsage> {
    let mut usage = api_usage(db, today, daily_limit).await?;
    usage.count += 1;
    store::write_value(db, keys::API_USAGE, &usage).await?;
    debug!("API usage {} / {} for {}", usage.count, usage.limit, usage.date);
    Ok(usage)
}
