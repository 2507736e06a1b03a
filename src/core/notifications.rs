//! In-app notifications, including date-scheduled broadcasts and the
//! once-only event popup.

use crate::errors::Result;
use crate::models::{timestamp_id, AppNotification, NotificationKind};
use crate::store::{self, keys};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use tracing::{info, instrument};

/// Returns every stored notification, including not-yet-due scheduled ones.
pub async fn get_all_notifications(db: &DatabaseConnection) -> Result<Vec<AppNotification>> {
    store::read_collection(db, keys::NOTIFICATIONS).await
}

/// The list shown to the customer: scheduled notifications stay hidden
/// until their date arrives.
pub async fn visible_notifications(
    db: &DatabaseConnection,
    today: NaiveDate,
) -> Result<Vec<AppNotification>> {
    let all = get_all_notifications(db).await?;
    Ok(all.into_iter().filter(|n| is_due(n, today)).collect())
}

fn is_due(notification: &AppNotification, today: NaiveDate) -> bool {
    match &notification.scheduled_date {
        None => true,
        Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map(|scheduled| scheduled <= today)
            // Unparseable schedule dates are treated as immediate
            .unwrap_or(true),
    }
}

/// Prepends a new notification (newest first).
#[instrument(skip(db, title, message), fields(title = %title))]
pub async fn add_notification(
    db: &DatabaseConnection,
    title: &str,
    message: &str,
    kind: NotificationKind,
    now_ms: i64,
) -> Result<AppNotification> {
    broadcast(db, title, message, kind, None, None, now_ms).await
}

/// Admin broadcast, optionally scheduled for a future date and carrying a
/// banner image for EVENT popups.
#[instrument(skip(db, title, message, image_url), fields(title = %title))]
pub async fn broadcast(
    db: &DatabaseConnection,
    title: &str,
    message: &str,
    kind: NotificationKind,
    scheduled_date: Option<String>,
    image_url: Option<String>,
    now_ms: i64,
) -> Result<AppNotification> {
    let notification = AppNotification {
        id: timestamp_id(now_ms),
        title: title.to_string(),
        message: message.to_string(),
        kind,
        read: false,
        timestamp: now_ms,
        scheduled_date,
        image_url,
    };

    let mut all = get_all_notifications(db).await?;
    all.insert(0, notification.clone());
    store::write_value(db, keys::NOTIFICATIONS, &all).await?;

    info!("Stored notification '{}'", notification.id);
    Ok(notification)
}

/// Marks every notification read.
pub async fn mark_all_read(db: &DatabaseConnection) -> Result<()> {
    let mut all = get_all_notifications(db).await?;
    for notification in &mut all {
        notification.read = true;
    }
    store::write_value(db, keys::NOTIFICATIONS, &all).await
}

/// Deletes one notification.
#[instrument(skip(db))]
pub async fn delete_notification(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Vec<AppNotification>> {
    let mut all = get_all_notifications(db).await?;
    all.retain(|n| n.id != id);
    store::write_value(db, keys::NOTIFICATIONS, &all).await?;
    Ok(all)
}

/// Count of unread, currently-due notifications (the badge number).
pub async fn unread_count(db: &DatabaseConnection, today: NaiveDate) -> Result<usize> {
    let visible = visible_notifications(db, today).await?;
    Ok(visible.iter().filter(|n| !n.read).count())
}

/// Takes the first unread EVENT notification that is due today, marking it
/// read in storage so the popup fires at most once.
pub async fn take_due_event_popup(
    db: &DatabaseConnection,
    today: NaiveDate,
) -> Result<Option<AppNotification>> {
    let mut all = get_all_notifications(db).await?;
    let popup = all
        .iter_mut()
        .find(|n| n.kind == NotificationKind::Event && !n.read && is_due(n, today))
        .map(|n| {
            n.read = true;
            n.clone()
        });
    if popup.is_some() {
        store::write_value(db, keys::NOTIFICATIONS, &all).await?;
    }
    Ok(popup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_scheduled_notification_hidden_until_due() -> Result<()> {
        let db = setup_test_db().await?;

        broadcast(
            &db,
            "Regreso a clases",
            "Todo en descuento",
            NotificationKind::Offer,
            Some("2026-09-01".to_string()),
            None,
            1_000,
        )
        .await?;

        assert!(visible_notifications(&db, day("2026-08-31")).await?.is_empty());
        assert_eq!(visible_notifications(&db, day("2026-09-01")).await?.len(), 1);
        assert_eq!(visible_notifications(&db, day("2026-09-02")).await?.len(), 1);

        // The admin view still sees it before the date
        assert_eq!(get_all_notifications(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_unscheduled_notification_visible_immediately() -> Result<()> {
        let db = setup_test_db().await?;

        add_notification(&db, "Hola", "Bienvenido", NotificationKind::Info, 1_000).await?;
        assert_eq!(visible_notifications(&db, day("2026-01-01")).await?.len(), 1);
        assert_eq!(unread_count(&db, day("2026-01-01")).await?, 1);

        mark_all_read(&db).await?;
        assert_eq!(unread_count(&db, day("2026-01-01")).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_event_popup_fires_at_most_once() -> Result<()> {
        let db = setup_test_db().await?;
        let today = day("2026-09-01");

        broadcast(
            &db,
            "Feria escolar",
            "Este sabado",
            NotificationKind::Event,
            Some("2026-09-01".to_string()),
            Some("https://example.com/banner.png".to_string()),
            1_000,
        )
        .await?;

        // Not due yet
        assert!(take_due_event_popup(&db, day("2026-08-30")).await?.is_none());

        let popup = take_due_event_popup(&db, today).await?;
        assert_eq!(popup.unwrap().title, "Feria escolar");

        // Taken once, never again
        assert!(take_due_event_popup(&db, today).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_non_event_kinds_never_popup() -> Result<()> {
        let db = setup_test_db().await?;

        add_notification(&db, "Oferta", "20% off", NotificationKind::Offer, 1_000).await?;
        assert!(take_due_event_popup(&db, day("2026-01-01")).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_newest_first_and_delete() -> Result<()> {
        let db = setup_test_db().await?;

        add_notification(&db, "Primera", "a", NotificationKind::Info, 1_000).await?;
        let second = add_notification(&db, "Segunda", "b", NotificationKind::Info, 2_000).await?;

        let all = get_all_notifications(&db).await?;
        assert_eq!(all[0].title, "Segunda");

        let remaining = delete_notification(&db, &second.id).await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "Primera");
        Ok(())
    }
}
