use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, NotSet, QueryFilter, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub telegram_id: i64,
    pub username: String,
    pub first_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::schedule_items::Entity")]
    ScheduleItems,
}

impl Related<super::schedule_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScheduleItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Data for inserting a new user row
pub struct NewUserRecord {
    pub telegram_id: i64,
    pub username: String,
    pub first_name: String,
    pub created_at: DateTime<Utc>,
}

/// Find a user by its Telegram identifier
pub async fn find_by_telegram_id(
    db: &DatabaseConnection,
    telegram_id: i64,
) -> Result<Option<Model>, DbErr> {
    Entity::find()
        .filter(Column::TelegramId.eq(telegram_id))
        .one(db)
        .await
}

/// Insert a new user; the surrogate id is assigned by the store
pub async fn insert(db: &DatabaseConnection, record: NewUserRecord) -> Result<Model, DbErr> {
    let active_model = ActiveModel {
        id: NotSet,
        telegram_id: Set(record.telegram_id),
        username: Set(record.username),
        first_name: Set(record.first_name),
        created_at: Set(record.created_at),
    };

    active_model.insert(db).await
}
