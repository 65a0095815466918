use chrono::{DateTime, Utc};

/// Pure user model (no serde; REST DTOs live in `api::rest::dto`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub telegram_id: i64,
    pub username: String,
    pub first_name: String,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub telegram_id: i64,
    pub username: String,
    pub first_name: String,
}

/// Pure schedule item model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleItem {
    pub id: i64,
    pub user_id: i64,
    pub day_of_week: String,
    pub time_start: String,
    pub time_end: String,
    pub subject: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating or fully overwriting a schedule item.
///
/// Updates replace every mutable field with these values; a field the caller
/// left out arrives here as its zero value and is persisted as such.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleItemInput {
    pub user_id: i64,
    pub day_of_week: String,
    pub time_start: String,
    pub time_end: String,
    pub subject: String,
    pub description: String,
}

/// Exact-match listing filter; an absent field matches all rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleFilter {
    pub user_id: Option<i64>,
    pub day_of_week: Option<String>,
}

/// A listed schedule item together with its eagerly loaded owner.
///
/// The owner never appears in the REST payload; it is loaded for internal
/// display lookups (e.g. resolving a username for the bot).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub item: ScheduleItem,
    pub owner: Option<User>,
}
