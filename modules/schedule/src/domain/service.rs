use chrono::Utc;
use sea_orm::DatabaseConnection;
use tracing::{debug, info, instrument};

use crate::contract::model::{
    NewUser, ScheduleEntry, ScheduleFilter, ScheduleItem, ScheduleItemInput, User,
};
use crate::domain::error::DomainError;
use crate::infra::storage::{mapper, schedule_items, users};

/// Domain service with the business rules for users and schedule items.
///
/// Holds the shared database connection; every operation is a single storage
/// round trip (or, for [`Service::create_or_get_user`], a lookup followed by
/// a conditional insert).
#[derive(Clone)]
pub struct Service {
    db: DatabaseConnection,
}

impl Service {
    /// Create a service over an already-connected database.
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Idempotent get-or-create keyed by `telegram_id`.
    ///
    /// Returns the user plus a flag telling whether a row was inserted. An
    /// existing user is returned unchanged even when `username`/`first_name`
    /// in the request differ: this is get-or-create, not an upsert.
    #[instrument(
        name = "schedule.service.create_or_get_user",
        skip(self),
        fields(telegram_id = new_user.telegram_id)
    )]
    pub async fn create_or_get_user(
        &self,
        new_user: NewUser,
    ) -> Result<(User, bool), DomainError> {
        if new_user.telegram_id <= 0 {
            return Err(DomainError::validation(
                "telegram_id",
                "must be a positive Telegram identifier",
            ));
        }

        if let Some(existing) = users::find_by_telegram_id(&self.db, new_user.telegram_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        {
            debug!("User already exists");
            return Ok((mapper::user_to_contract(existing), false));
        }

        // Lookup and insert are deliberately not one transaction: two
        // concurrent creates for the same telegram_id can both miss the
        // lookup, one insert wins, and the loser surfaces the unique-index
        // violation as a Database error. Callers retry idempotently.
        let record = users::NewUserRecord {
            telegram_id: new_user.telegram_id,
            username: new_user.username,
            first_name: new_user.first_name,
            created_at: Utc::now(),
        };
        let row = users::insert(&self.db, record)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Created user with id={}", row.id);
        Ok((mapper::user_to_contract(row), true))
    }

    #[instrument(name = "schedule.service.get_user", skip(self))]
    pub async fn get_user_by_telegram_id(&self, telegram_id: i64) -> Result<User, DomainError> {
        let row = users::find_by_telegram_id(&self.db, telegram_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(telegram_id))?;
        Ok(mapper::user_to_contract(row))
    }

    /// Create a schedule item.
    ///
    /// `user_id` is trusted as-is; the schema's foreign key is the only
    /// guard against orphan references.
    #[instrument(
        name = "schedule.service.create_item",
        skip(self, input),
        fields(user_id = input.user_id, subject = %input.subject)
    )]
    pub async fn create_item(
        &self,
        input: ScheduleItemInput,
    ) -> Result<ScheduleItem, DomainError> {
        validate_item_input(&input)?;

        let row = schedule_items::insert(
            &self.db,
            schedule_items::NewItemRecord {
                user_id: input.user_id,
                day_of_week: input.day_of_week,
                time_start: input.time_start,
                time_end: input.time_end,
                subject: input.subject,
                description: input.description,
                created_at: Utc::now(),
            },
        )
        .await
        .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Created schedule item with id={}", row.id);
        Ok(mapper::item_to_contract(row))
    }

    /// List schedule items, ascending by `time_start` (lexicographic; times
    /// are stored as "HH:MM" strings). Each entry carries its eagerly
    /// joined owner. An empty result is a valid outcome.
    #[instrument(name = "schedule.service.list_items", skip(self))]
    pub async fn list_items(
        &self,
        filter: ScheduleFilter,
    ) -> Result<Vec<ScheduleEntry>, DomainError> {
        let rows = schedule_items::list(&self.db, filter.user_id, filter.day_of_week.as_deref())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        debug!("Listed {} schedule items", rows.len());
        Ok(rows
            .into_iter()
            .map(|(item, owner)| ScheduleEntry {
                item: mapper::item_to_contract(item),
                owner: owner.map(mapper::user_to_contract),
            })
            .collect())
    }

    #[instrument(name = "schedule.service.get_item", skip(self))]
    pub async fn get_item(&self, id: i64) -> Result<ScheduleItem, DomainError> {
        let row = schedule_items::find_by_id(&self.db, id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::item_not_found(id))?;
        Ok(mapper::item_to_contract(row))
    }

    /// Full-overwrite update: every mutable field is replaced with the input
    /// value, so a field the caller omitted is cleared rather than retained.
    /// `id` and `created_at` are never altered.
    #[instrument(name = "schedule.service.update_item", skip(self, input))]
    pub async fn update_item(
        &self,
        id: i64,
        input: ScheduleItemInput,
    ) -> Result<ScheduleItem, DomainError> {
        schedule_items::find_by_id(&self.db, id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::item_not_found(id))?;

        validate_item_input(&input)?;

        let row = schedule_items::overwrite(
            &self.db,
            id,
            schedule_items::ItemOverwrite {
                user_id: input.user_id,
                day_of_week: input.day_of_week,
                time_start: input.time_start,
                time_end: input.time_end,
                subject: input.subject,
                description: input.description,
            },
        )
        .await
        .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Updated schedule item");
        Ok(mapper::item_to_contract(row))
    }

    /// Delete by id. Deleting an id that never existed succeeds silently;
    /// callers cannot distinguish "deleted" from "already gone".
    #[instrument(name = "schedule.service.delete_item", skip(self))]
    pub async fn delete_item(&self, id: i64) -> Result<(), DomainError> {
        let rows = schedule_items::delete(&self.db, id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        debug!("Delete affected {} rows", rows);
        Ok(())
    }
}

/// Required-field validation, reporting the first missing field.
///
/// Any non-empty day token and any time strings are accepted: no weekday
/// enumeration and no `time_start < time_end` ordering check.
fn validate_item_input(input: &ScheduleItemInput) -> Result<(), DomainError> {
    if input.user_id <= 0 {
        return Err(DomainError::validation("user_id", "is required"));
    }
    let required = [
        ("day_of_week", &input.day_of_week),
        ("time_start", &input.time_start),
        ("time_end", &input.time_end),
        ("subject", &input.subject),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(DomainError::validation(field, "is required"));
        }
    }
    Ok(())
}
