use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::TelegramId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(ColumnDef::new(Users::FirstName).string().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ScheduleItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScheduleItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ScheduleItems::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ScheduleItems::DayOfWeek).string().not_null())
                    .col(ColumnDef::new(ScheduleItems::TimeStart).string().not_null())
                    .col(ColumnDef::new(ScheduleItems::TimeEnd).string().not_null())
                    .col(ColumnDef::new(ScheduleItems::Subject).string().not_null())
                    .col(
                        ColumnDef::new(ScheduleItems::Description)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScheduleItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    // No ON DELETE action: removing a user does not cascade
                    // into its schedule items.
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_schedule_items_user_id")
                            .from(ScheduleItems::Table, ScheduleItems::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScheduleItems::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    TelegramId,
    Username,
    FirstName,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ScheduleItems {
    Table,
    Id,
    UserId,
    DayOfWeek,
    TimeStart,
    TimeEnd,
    Subject,
    Description,
    CreatedAt,
}
