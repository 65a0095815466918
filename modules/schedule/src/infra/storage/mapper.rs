use crate::contract::model::{ScheduleItem, User};
use crate::infra::storage::{schedule_items, users};

/// Convert a user row to the contract model
pub fn user_to_contract(entity: users::Model) -> User {
    User {
        id: entity.id,
        telegram_id: entity.telegram_id,
        username: entity.username,
        first_name: entity.first_name,
        created_at: entity.created_at,
    }
}

/// Convert a schedule item row to the contract model
pub fn item_to_contract(entity: schedule_items::Model) -> ScheduleItem {
    ScheduleItem {
        id: entity.id,
        user_id: entity.user_id,
        day_of_week: entity.day_of_week,
        time_start: entity.time_start,
        time_end: entity.time_end,
        subject: entity.subject,
        description: entity.description,
        created_at: entity.created_at,
    }
}
