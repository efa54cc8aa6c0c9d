use sea_orm_migration::{prelude::*, schema::*};

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
                    .col(uuid(Users::Id).primary_key())
                    .col(string(Users::FirstName))
                    .col(string(Users::LastName))
                    .col(string(Users::Email).unique_key())
                    .col(string(Users::PasswordHash))
                    .col(string(Users::Role).default("user"))
                    .col(boolean(Users::Newsletter).default(false))
                    .col(boolean(Users::DarkMode).default(false))
                    .col(
                        timestamp_with_time_zone(Users::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Users::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(uuid(Courses::Id).primary_key())
                    .col(string(Courses::Title))
                    .col(text(Courses::Description))
                    .col(double(Courses::Price))
                    .col(string_null(Courses::ImageUrl))
                    .col(uuid(Courses::CreatorId))
                    .col(
                        timestamp_with_time_zone(Courses::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_courses_creator")
                            .from(Courses::Table, Courses::CreatorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Orders and purchases keep their course id after the course is removed.
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(uuid(Orders::Id).primary_key())
                    .col(uuid(Orders::UserId))
                    .col(uuid(Orders::CourseId))
                    .col(string(Orders::PaymentId))
                    .col(double(Orders::Amount))
                    .col(string(Orders::Status))
                    .col(
                        timestamp_with_time_zone(Orders::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_user")
                            .from(Orders::Table, Orders::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Purchases::Table)
                    .if_not_exists()
                    .col(uuid(Purchases::Id).primary_key())
                    .col(uuid(Purchases::UserId))
                    .col(uuid(Purchases::CourseId))
                    .col(uuid(Purchases::OrderId))
                    .col(string(Purchases::PaymentId))
                    .col(double(Purchases::Amount))
                    .col(string(Purchases::Status))
                    .col(
                        timestamp_with_time_zone(Purchases::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchases_user")
                            .from(Purchases::Table, Purchases::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchases_order")
                            .from(Purchases::Table, Purchases::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_purchases_user_id")
                    .table(Purchases::Table)
                    .col(Purchases::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Purchases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    PasswordHash,
    Role,
    Newsletter,
    DarkMode,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
    Title,
    Description,
    Price,
    ImageUrl,
    CreatorId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    UserId,
    CourseId,
    PaymentId,
    Amount,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Purchases {
    Table,
    Id,
    UserId,
    CourseId,
    OrderId,
    PaymentId,
    Amount,
    Status,
    CreatedAt,
}
