use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contract::model::{NewUser, ScheduleFilter, ScheduleItem, ScheduleItemInput, User};

/// REST DTO for user representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub telegram_id: i64,
    pub username: String,
    pub first_name: String,
    pub created_at: DateTime<Utc>,
}

/// REST DTO for creating a user; a missing `telegram_id` is a decode error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserReq {
    pub telegram_id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
}

/// REST DTO for schedule item representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleItemDto {
    pub id: i64,
    pub user_id: i64,
    pub day_of_week: String,
    pub time_start: String,
    pub time_end: String,
    pub subject: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// REST DTO for creating or overwriting a schedule item.
///
/// Every field defaults to its zero value: an update body that omits a field
/// clears that field (full-overwrite contract, not a partial patch).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleItemReq {
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub day_of_week: String,
    #[serde(default)]
    pub time_start: String,
    #[serde(default)]
    pub time_end: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,
}

/// REST DTO for schedule list query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListScheduleQuery {
    pub user_id: Option<i64>,
    pub day: Option<String>,
}

/// Response envelope carrying a user and an optional human-readable message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub user: UserDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response envelope carrying a schedule item and an optional message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemEnvelope {
    pub item: ScheduleItemDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// REST DTO for schedule list responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleListDto {
    pub items: Vec<ScheduleItemDto>,
}

/// Bare confirmation message (successful deletes)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub message: String,
}

/// Health check payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    pub service: String,
    pub database: String,
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            telegram_id: user.telegram_id,
            username: user.username,
            first_name: user.first_name,
            created_at: user.created_at,
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            telegram_id: req.telegram_id,
            username: req.username,
            first_name: req.first_name,
        }
    }
}

impl From<ScheduleItem> for ScheduleItemDto {
    fn from(item: ScheduleItem) -> Self {
        Self {
            id: item.id,
            user_id: item.user_id,
            day_of_week: item.day_of_week,
            time_start: item.time_start,
            time_end: item.time_end,
            subject: item.subject,
            description: item.description,
            created_at: item.created_at,
        }
    }
}

impl From<ScheduleItemReq> for ScheduleItemInput {
    fn from(req: ScheduleItemReq) -> Self {
        Self {
            user_id: req.user_id,
            day_of_week: req.day_of_week,
            time_start: req.time_start,
            time_end: req.time_end,
            subject: req.subject,
            description: req.description,
        }
    }
}

impl From<ListScheduleQuery> for ScheduleFilter {
    fn from(query: ListScheduleQuery) -> Self {
        Self {
            user_id: query.user_id,
            day_of_week: query.day,
        }
    }
}
