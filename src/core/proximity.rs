//! Store-proximity detection and the rate-limited "you are nearby" alert.

use crate::config::store::StoreSettings;
use crate::core::notifications;
use crate::errors::Result;
use crate::models::{AppNotification, NotificationKind};
use crate::store::{self, keys};
use sea_orm::DatabaseConnection;
use tracing::{debug, instrument};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates, in kilometers.
#[must_use]
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Whether the coordinates fall inside the configured store radius.
#[must_use]
pub fn is_near(settings: &StoreSettings, lat: f64, lng: f64) -> bool {
    distance_km(settings.store_lat, settings.store_lng, lat, lng) < settings.proximity_radius_km
}

/// Emits a "come say hi" notification when the customer is near the store,
/// at most once per configured re-alert window.
#[instrument(skip(db, settings))]
pub async fn maybe_notify_proximity(
    db: &DatabaseConnection,
    settings: &StoreSettings,
    lat: f64,
    lng: f64,
    now_ms: i64,
) -> Result<Option<AppNotification>> {
    if !is_near(settings, lat, lng) {
        return Ok(None);
    }

    let window_ms = settings.proximity_realert_hours * 3_600_000;
    let last_alert: Option<i64> = store::read_value(db, keys::PROXIMITY_LAST_ALERT).await?;
    if let Some(last) = last_alert {
        if now_ms - last < window_ms {
            debug!("Proximity alert suppressed, inside the re-alert window");
            return Ok(None);
        }
    }

    let notification = notifications::add_notification(
        db,
        "¡Estás cerca!",
        "Pasa a saludarnos, tenemos ofertas esperándote",
        NotificationKind::Info,
        now_ms,
    )
    .await?;
    store::write_value(db, keys::PROXIMITY_LAST_ALERT, &now_ms).await?;
    Ok(Some(notification))
}
