//! The singleton user profile: points, level, streak, wishlist, accessories,
//! daily quests, and per-device visit counters.

use crate::core::mascot;
use crate::errors::{Error, Result};
use crate::models::{
    timestamp_id, DailyQuest, MascotKind, QuestAction, UserLevel, UserProfile, UserRole, UserStats,
};
use crate::store::{self, keys};
use chrono::{Datelike, NaiveDate};
use sea_orm::DatabaseConnection;
use tracing::{info, instrument};

/// The gamification tier a point total maps to.
#[must_use]
pub fn level_for_points(points: i64) -> UserLevel {
    if points >= 5000 {
        UserLevel::Leyenda
    } else if points >= 1500 {
        UserLevel::SuperFan
    } else if points >= 500 {
        UserLevel::Explorador
    } else {
        UserLevel::Novato
    }
}

/// Returns the stored profile, or `None` before onboarding.
pub async fn get_profile(db: &DatabaseConnection) -> Result<Option<UserProfile>> {
    store::read_value(db, keys::USER_PROFILE).await
}

/// Persists the profile blob.
pub async fn save_profile(db: &DatabaseConnection, profile: &UserProfile) -> Result<()> {
    store::write_value(db, keys::USER_PROFILE, profile).await
}

/// Creates the onboarding profile for this device.
#[instrument(skip(db, name, grade, favorite_color), fields(name = %name))]
pub async fn create_profile(
    db: &DatabaseConnection,
    name: &str,
    role: Option<UserRole>,
    grade: &str,
    avatar_id: u32,
    favorite_color: &str,
    now_ms: i64,
) -> Result<UserProfile> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Profile name cannot be empty".to_string(),
        });
    }

    let profile = UserProfile {
        id: timestamp_id(now_ms),
        name: name.to_string(),
        role,
        grade: grade.to_string(),
        avatar_id,
        favorite_color: favorite_color.to_string(),
        created_at: now_ms,
        points: 0,
        level: UserLevel::Novato,
        badges: Vec::new(),
        wishlist: Vec::new(),
        redeemed_rewards: Vec::new(),
        order_history: Vec::new(),
        last_daily_reward: None,
        streak: 0,
        inventory: Vec::new(),
        equipped: Default::default(),
    };
    save_profile(db, &profile).await?;
    info!("Created profile '{}'", profile.id);
    Ok(profile)
}

/// Summary row shown on the profile screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStat {
    pub label: String,
    pub value: String,
}

/// Recomputes the level from points and returns the headline stats.
///
/// The stored level is a cached denormalization; if it disagrees with the
/// point total the corrected value is persisted here, so any stale blob
/// heals itself on the next read.
pub async fn profile_stats(db: &DatabaseConnection) -> Result<Vec<ProfileStat>> {
    let mut profile = get_profile(db).await?.ok_or(Error::ProfileNotFound)?;

    let level = level_for_points(profile.points);
    if level != profile.level {
        profile.level = level;
        save_profile(db, &profile).await?;
    }

    Ok(vec![
        ProfileStat {
            label: "Puntos XP".to_string(),
            value: profile.points.to_string(),
        },
        ProfileStat {
            label: "Racha".to_string(),
            value: format!("{}🔥", profile.streak),
        },
        ProfileStat {
            label: "Nivel".to_string(),
            value: level.label().to_string(),
        },
    ])
}

/// Adds (or subtracts) points, keeping the cached level in sync.
pub async fn add_points(db: &DatabaseConnection, delta: i64) -> Result<UserProfile> {
    let mut profile = get_profile(db).await?.ok_or(Error::ProfileNotFound)?;
    profile.points += delta;
    profile.level = level_for_points(profile.points);
    save_profile(db, &profile).await?;
    Ok(profile)
}

/// Outcome of a daily-reward check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyReward {
    pub claimed: bool,
    pub points: i64,
}

/// Grants the daily login bonus at most once per calendar date, bumping the
/// streak alongside. Repeat calls on the same date claim nothing.
#[instrument(skip(db))]
pub async fn check_daily_reward(
    db: &DatabaseConnection,
    today: NaiveDate,
    reward_points: i64,
) -> Result<DailyReward> {
    let mut profile = get_profile(db).await?.ok_or(Error::ProfileNotFound)?;

    let today_str = today.format("%Y-%m-%d").to_string();
    if profile.last_daily_reward.as_deref() == Some(today_str.as_str()) {
        return Ok(DailyReward {
            claimed: false,
            points: 0,
        });
    }

    profile.last_daily_reward = Some(today_str);
    profile.points += reward_points;
    profile.streak += 1;
    profile.level = level_for_points(profile.points);
    save_profile(db, &profile).await?;

    info!("Daily reward claimed, streak {}", profile.streak);
    Ok(DailyReward {
        claimed: true,
        points: reward_points,
    })
}

/// Adds the product to the wishlist, or removes it if already there.
pub async fn toggle_wishlist(db: &DatabaseConnection, product_id: &str) -> Result<UserProfile> {
    let mut profile = get_profile(db).await?.ok_or(Error::ProfileNotFound)?;
    if let Some(pos) = profile.wishlist.iter().position(|id| id == product_id) {
        profile.wishlist.remove(pos);
    } else {
        profile.wishlist.push(product_id.to_string());
    }
    save_profile(db, &profile).await?;
    Ok(profile)
}

/// Equips an accessory on a mascot, one per slot.
///
/// Equipping the item already worn in its slot takes it off; a different
/// item replaces whatever occupied the slot. Unknown ids are rejected.
#[instrument(skip(db))]
pub async fn equip_accessory(
    db: &DatabaseConnection,
    mascot: MascotKind,
    accessory_id: &str,
) -> Result<UserProfile> {
    let mut profile = get_profile(db).await?.ok_or(Error::ProfileNotFound)?;

    let item = mascot::accessory_catalog()
        .iter()
        .find(|a| a.id == accessory_id)
        .cloned()
        .ok_or_else(|| Error::UnknownAccessory {
            id: accessory_id.to_string(),
        })?;
    if !item.mascot.fits(mascot) {
        return Err(Error::Validation {
            message: format!("'{}' does not fit {:?}", item.name, mascot),
        });
    }

    let slots = profile.equipped.slots_mut(mascot);
    if slots.get(&item.slot).map(String::as_str) == Some(accessory_id) {
        slots.remove(&item.slot);
    } else {
        slots.insert(item.slot, accessory_id.to_string());
    }

    save_profile(db, &profile).await?;
    Ok(profile)
}

/// The fixed set of daily engagement quests.
#[must_use]
pub fn daily_quests() -> Vec<DailyQuest> {
    let quest = |id: &str, label: &str, action: QuestAction, points: i64, done: bool| DailyQuest {
        id: id.to_string(),
        label: label.to_string(),
        target_action: action,
        points_reward: points,
        completed: done,
    };
    vec![
        quest("q1", "Visita la tienda", QuestAction::ViewProduct, 10, true),
        quest("q2", "Habla con Angel", QuestAction::ChatMascot, 15, false),
        quest("q3", "Busca una oferta", QuestAction::AddCart, 20, false),
    ]
}

/// Awards the quest bonus for an action and returns the quest board.
pub async fn complete_quest(
    db: &DatabaseConnection,
    _action: QuestAction,
) -> Result<Vec<DailyQuest>> {
    add_points(db, 15).await?;
    Ok(daily_quests())
}

/// Bumps the visit counters at most once per calendar day, resetting the
/// monthly and annual counters when their period rolls over.
#[instrument(skip(db))]
pub async fn track_visit(
    db: &DatabaseConnection,
    today: NaiveDate,
    now_ms: i64,
) -> Result<UserStats> {
    let mut stats: UserStats = store::read_value(db, keys::USER_STATS).await?.unwrap_or_default();

    let last_visit_day = chrono::DateTime::from_timestamp_millis(stats.last_visit_date)
        .map(|dt| dt.date_naive());
    if last_visit_day == Some(today) {
        return Ok(stats);
    }

    let month_str = format!("{}-{}", today.year(), today.month0());
    let year_str = today.year().to_string();

    stats.total_visits += 1;
    if stats.last_month_str == month_str {
        stats.monthly_visits += 1;
    } else {
        stats.monthly_visits = 1;
        stats.last_month_str = month_str;
    }
    if stats.last_year_str == year_str {
        stats.annual_visits += 1;
    } else {
        stats.annual_visits = 1;
        stats.last_year_str = year_str;
    }
    stats.last_visit_date = now_ms;

    store::write_value(db, keys::USER_STATS, &stats).await?;
    Ok(stats)
}
