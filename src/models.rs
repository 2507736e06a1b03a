//! Domain records persisted as JSON blobs in the store.
//!
//! Every record is a plain serde struct identified by a string id derived
//! from its creation timestamp. There is no foreign-key enforcement anywhere;
//! relationships are id references resolved at read time by linear scan, and
//! orders embed full copies of their cart lines so deleting a product never
//! rewrites history.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Builds a record id from a creation timestamp in epoch milliseconds.
#[must_use]
pub fn timestamp_id(now_ms: i64) -> String {
    now_ms.to_string()
}

/// A catalog product managed by the admin.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    /// Main section (e.g. "Escolar")
    pub category: String,
    /// Subsection (e.g. "Cuadernos")
    pub sub_category: String,
    pub brand: String,
    pub image: String,
    pub description: String,
    /// Inventory count, absent when untracked
    pub stock: Option<i64>,
}

/// A cart line: a snapshot of the product at add-time plus quantity.
///
/// `discount_price` is frozen at the moment the line is created from the
/// offer active right then; it is never re-evaluated afterwards.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
    pub discount_price: Option<f64>,
}

impl CartItem {
    /// The per-unit price this line is actually charged at.
    #[must_use]
    pub fn unit_price(&self) -> f64 {
        self.discount_price.unwrap_or(self.product.price)
    }

    /// The line total (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.unit_price() * f64::from(self.quantity)
    }
}

/// Lifecycle of an order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

/// How an order reaches the client.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMethod {
    Urban,
    Rural,
}

/// An order: the cart snapshot taken at checkout.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    /// Creation time, epoch milliseconds
    pub date: i64,
    pub client_name: String,
    pub items: Vec<CartItem>,
    pub total: f64,
    pub delivery_method: DeliveryMethod,
    pub status: OrderStatus,
    /// Requested pickup time ("HH:MM")
    pub pickup_time: Option<String>,
    /// Client distance from the store at checkout
    pub distance_km: Option<f64>,
    /// Maps link shared by the client
    pub location_link: Option<String>,
}

/// Status of a special "find me this item" request.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Found,
    Unavailable,
}

/// A client request for an item not in the catalog.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SpecialRequest {
    pub id: String,
    pub client_name: String,
    pub item_name: String,
    pub description: String,
    pub date: i64,
    pub status: RequestStatus,
}

/// Category of an in-app notification.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Offer,
    Info,
    System,
    Event,
}

/// An in-app notification, possibly scheduled for a future date.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppNotification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub read: bool,
    pub timestamp: i64,
    /// ISO date ("YYYY-MM-DD"); hidden from the visible list until due
    pub scheduled_date: Option<String>,
    /// Banner image for event popups
    pub image_url: Option<String>,
}

/// A time-boxed percentage discount on one product.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExpressOffer {
    pub id: String,
    pub product_id: String,
    pub discount_percent: f64,
    pub duration_minutes: i64,
    /// Expiry, epoch milliseconds; the offer applies only while `end_time > now`
    pub end_time: i64,
    pub active: bool,
}

/// A multi-product discount bundle built by the admin. No expiry.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ComboBundle {
    pub id: String,
    pub title: String,
    pub product_ids: Vec<String>,
    pub discount_percent: f64,
    pub description: String,
    pub image: Option<String>,
}

/// A time-bound story banner shown to customers.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StoryOffer {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    /// Gradient start color
    pub color: String,
    pub expires_at: i64,
    pub seen: bool,
}

/// Per-device visit counters, bumped at most once per calendar day.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct UserStats {
    pub total_visits: i64,
    pub monthly_visits: i64,
    pub annual_visits: i64,
    /// Last counted visit, epoch milliseconds
    pub last_visit_date: i64,
    /// "YYYY-M" marker used to reset the monthly counter
    pub last_month_str: String,
    /// "YYYY" marker used to reset the annual counter
    pub last_year_str: String,
}

/// One opening window ("08:00" - "18:00").
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OpeningWindow {
    pub open: String,
    pub close: String,
}

/// Weekly opening hours shown to customers and edited by the admin.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OpeningHours {
    pub weekdays: OpeningWindow,
    pub saturday: OpeningWindow,
    pub sunday: OpeningWindow,
}

impl Default for OpeningHours {
    fn default() -> Self {
        let window = |open: &str, close: &str| OpeningWindow {
            open: open.to_string(),
            close: close.to_string(),
        };
        Self {
            weekdays: window("08:00", "18:00"),
            saturday: window("09:00", "13:00"),
            sunday: window("Cerrado", "Cerrado"),
        }
    }
}

/// The two virtual pets.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MascotKind {
    Angel,
    Ebert,
}

/// Which mascots an accessory fits.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum MascotTarget {
    Angel,
    Ebert,
    Both,
}

impl MascotTarget {
    /// Whether an accessory with this target can be worn by `mascot`.
    #[must_use]
    pub fn fits(self, mascot: MascotKind) -> bool {
        match self {
            Self::Both => true,
            Self::Angel => mascot == MascotKind::Angel,
            Self::Ebert => mascot == MascotKind::Ebert,
        }
    }
}

/// Body region an accessory occupies; one item per slot per mascot.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorySlot {
    Head,
    Face,
    Body,
    Hand,
}

/// A purchasable cosmetic item from the static catalog (not persisted).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Accessory {
    pub id: String,
    pub name: String,
    /// Cost in points
    pub price: i64,
    pub slot: AccessorySlot,
    pub mascot: MascotTarget,
    pub icon: String,
}

/// A single chat exchange line with a mascot.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    /// `None` for the human side of the conversation
    pub sender: Option<MascotKind>,
    pub text: String,
    pub timestamp: i64,
}

/// Admin-editable persona configuration for the mascots.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct MascotConfig {
    pub angel_prompt: String,
    pub ebert_prompt: String,
    pub angel_outfit: String,
    pub ebert_outfit: String,
}

/// Daily AI-call quota; resets when the stored date is not today.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ApiUsage {
    /// "YYYY-MM-DD"
    pub date: String,
    pub count: u32,
    pub limit: u32,
}

/// Gamification tier derived from the point total.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UserLevel {
    Novato,
    Explorador,
    #[serde(rename = "Super Fan")]
    SuperFan,
    Leyenda,
}

impl UserLevel {
    /// The display label customers see.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Novato => "Novato",
            Self::Explorador => "Explorador",
            Self::SuperFan => "Super Fan",
            Self::Leyenda => "Leyenda",
        }
    }
}

/// Who the profile belongs to, chosen at onboarding.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Estudiante,
    Profesor,
    Director,
    Padre,
    Empresa,
}

/// Accessory ids currently worn, one per slot, per mascot.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct EquippedAccessories {
    pub angel: HashMap<AccessorySlot, String>,
    pub ebert: HashMap<AccessorySlot, String>,
}

impl EquippedAccessories {
    /// Mutable access to the slot map for one mascot.
    pub fn slots_mut(&mut self, mascot: MascotKind) -> &mut HashMap<AccessorySlot, String> {
        match mascot {
            MascotKind::Angel => &mut self.angel,
            MascotKind::Ebert => &mut self.ebert,
        }
    }

    /// Read access to the slot map for one mascot.
    #[must_use]
    pub fn slots(&self, mascot: MascotKind) -> &HashMap<AccessorySlot, String> {
        match mascot {
            MascotKind::Angel => &self.angel,
            MascotKind::Ebert => &self.ebert,
        }
    }
}

/// The singleton per-device user profile, mutated by every gamification event.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub role: Option<UserRole>,
    /// e.g. "5to Grado"
    pub grade: String,
    pub avatar_id: u32,
    pub favorite_color: String,
    pub created_at: i64,
    pub points: i64,
    /// Cached tier; recomputed from `points` on every stats read
    pub level: UserLevel,
    pub badges: Vec<String>,
    /// Product ids
    pub wishlist: Vec<String>,
    pub redeemed_rewards: Vec<String>,
    /// Order ids placed from this device
    pub order_history: Vec<String>,
    /// ISO date of the last claimed daily reward
    pub last_daily_reward: Option<String>,
    /// Consecutive daily-reward days
    pub streak: i64,
    /// Owned accessory ids
    pub inventory: Vec<String>,
    pub equipped: EquippedAccessories,
}

/// A daily engagement quest.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DailyQuest {
    pub id: String,
    pub label: String,
    pub target_action: QuestAction,
    pub points_reward: i64,
    pub completed: bool,
}

/// The action a quest rewards.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum QuestAction {
    ViewProduct,
    AddCart,
    ChatMascot,
    FindHidden,
}

/// A photo post on the community wall.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CommunityPost {
    pub id: String,
    pub author_name: String,
    pub author_grade: String,
    pub image_url: String,
    pub description: String,
    pub likes: i64,
    pub timestamp: i64,
}

/// A free-text suggestion left by a customer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Suggestion {
    pub id: String,
    pub author_name: String,
    pub text: String,
    pub date: i64,
    pub read: bool,
}

/// A customer who owes money (admin bookkeeping).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Debtor {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub reason: String,
    pub date: i64,
    pub phone: Option<String>,
    pub is_paid: bool,
}

/// Expense category for the admin ledger.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseKind {
    Food,
    Transport,
    Supplies,
    Other,
}

/// A business expense (admin bookkeeping).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub date: i64,
    pub category: ExpenseKind,
}

/// A sticky note on the admin board.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StickyNote {
    pub id: String,
    pub text: String,
    /// Hex background color
    pub color: String,
}
