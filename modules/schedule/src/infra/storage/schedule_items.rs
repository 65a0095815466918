use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "schedule_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub day_of_week: String,
    pub time_start: String,
    pub time_end: String,
    pub subject: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Data for inserting a new schedule item row
pub struct NewItemRecord {
    pub user_id: i64,
    pub day_of_week: String,
    pub time_start: String,
    pub time_end: String,
    pub subject: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Replacement values for every mutable column of an existing row.
/// `id` and `created_at` are left untouched.
pub struct ItemOverwrite {
    pub user_id: i64,
    pub day_of_week: String,
    pub time_start: String,
    pub time_end: String,
    pub subject: String,
    pub description: String,
}

/// Find a schedule item by id
pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(id).one(db).await
}

/// List schedule items with optional exact-match filters, ascending by
/// `time_start`, each row joined with its owning user
pub async fn list(
    db: &DatabaseConnection,
    user_id: Option<i64>,
    day_of_week: Option<&str>,
) -> Result<Vec<(Model, Option<super::users::Model>)>, DbErr> {
    let mut query = Entity::find();

    if let Some(uid) = user_id {
        query = query.filter(Column::UserId.eq(uid));
    }
    if let Some(day) = day_of_week {
        query = query.filter(Column::DayOfWeek.eq(day));
    }

    query
        .order_by_asc(Column::TimeStart)
        .find_also_related(super::users::Entity)
        .all(db)
        .await
}

/// Insert a new schedule item; the surrogate id is assigned by the store
pub async fn insert(db: &DatabaseConnection, record: NewItemRecord) -> Result<Model, DbErr> {
    let active_model = ActiveModel {
        id: NotSet,
        user_id: Set(record.user_id),
        day_of_week: Set(record.day_of_week),
        time_start: Set(record.time_start),
        time_end: Set(record.time_end),
        subject: Set(record.subject),
        description: Set(record.description),
        created_at: Set(record.created_at),
    };

    active_model.insert(db).await
}

/// Overwrite all mutable columns of an existing schedule item
pub async fn overwrite(
    db: &DatabaseConnection,
    id: i64,
    values: ItemOverwrite,
) -> Result<Model, DbErr> {
    let active_model = ActiveModel {
        id: Set(id),
        user_id: Set(values.user_id),
        day_of_week: Set(values.day_of_week),
        time_start: Set(values.time_start),
        time_end: Set(values.time_end),
        subject: Set(values.subject),
        description: Set(values.description),
        created_at: NotSet,
    };

    active_model.update(db).await
}

/// Delete a schedule item by id, returning the number of affected rows
pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<u64, DbErr> {
    let result = Entity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected)
}
