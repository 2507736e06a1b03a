//! Opening hours shown to customers and edited by the admin.

use crate::errors::Result;
use crate::models::OpeningHours;
use crate::store::{self, keys};
use sea_orm::DatabaseConnection;

/// Returns the stored schedule, or the shipped default before any edit.
pub async fn get_opening_hours(db: &DatabaseConnection) -> Result<OpeningHours> {
    let stored: Option<OpeningHours> = store::read_value(db, keys::OPENING_HOURS).await?;
    Ok(stored.unwrap_or_default())
}

/// Persists an edited schedule.
pub async fn save_opening_hours(db: &DatabaseConnection, hours: &OpeningHours) -> Result<()> {
    store::write_value(db, keys::OPENING_HOURS, hours).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_default_schedule_before_any_edit() -> Result<()> {
        let db = setup_test_db().await?;

        let hours = get_opening_hours(&db).await?;
        assert_eq!(hours.weekdays.open, "08:00");
        assert_eq!(hours.saturday.close, "13:00");
        assert_eq!(hours.sunday.open, "Cerrado");
        Ok(())
    }

    #[tokio::test]
    async fn test_edited_schedule_roundtrips() -> Result<()> {
        let db = setup_test_db().await?;

        let mut hours = get_opening_hours(&db).await?;
        hours.weekdays.close = "19:30".to_string();
        save_opening_hours(&db, &hours).await?;

        assert_eq!(get_opening_hours(&db).await?, hours);
        Ok(())
    }
}
