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
                    .col(ColumnDef::new(Users::Id).text().not_null().primary_key())
                    .col(ColumnDef::new(Users::Email).text().unique_key())
                    .col(ColumnDef::new(Users::FirstName).text())
                    .col(ColumnDef::new(Users::LastName).text())
                    .col(ColumnDef::new(Users::ProfileImageUrl).text())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Content::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Content::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Content::Title).text().not_null())
                    .col(ColumnDef::new(Content::Description).text())
                    .col(ColumnDef::new(Content::ContentType).string_len(16).not_null())
                    .col(ColumnDef::new(Content::ThumbnailUrl).text())
                    .col(ColumnDef::new(Content::BannerUrl).text())
                    .col(ColumnDef::new(Content::VideoUrl).text())
                    .col(ColumnDef::new(Content::TrailerUrl).text())
                    .col(ColumnDef::new(Content::Year).integer())
                    .col(ColumnDef::new(Content::Duration).integer())
                    .col(ColumnDef::new(Content::Rating).double())
                    .col(ColumnDef::new(Content::Genre).json().not_null())
                    .col(ColumnDef::new(Content::Cast).json().not_null())
                    .col(ColumnDef::new(Content::Director).text())
                    .col(
                        ColumnDef::new(Content::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Content::IsFeatured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Content::ViewCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Content::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Content::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Episodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Episodes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Episodes::ContentId).integer().not_null())
                    .col(ColumnDef::new(Episodes::Title).text().not_null())
                    .col(ColumnDef::new(Episodes::Description).text())
                    .col(ColumnDef::new(Episodes::EpisodeNumber).integer().not_null())
                    .col(
                        ColumnDef::new(Episodes::SeasonNumber)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Episodes::VideoUrl).text().not_null())
                    .col(ColumnDef::new(Episodes::ThumbnailUrl).text())
                    .col(ColumnDef::new(Episodes::Duration).integer())
                    .col(
                        ColumnDef::new(Episodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_episodes_content_id")
                            .from(Episodes::Table, Episodes::ContentId)
                            .to(Content::Table, Content::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Favorites::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Favorites::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Favorites::UserId).text().not_null())
                    .col(ColumnDef::new(Favorites::ContentId).integer().not_null())
                    .col(
                        ColumnDef::new(Favorites::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorites_user_id")
                            .from(Favorites::Table, Favorites::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorites_content_id")
                            .from(Favorites::Table, Favorites::ContentId)
                            .to(Content::Table, Content::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_episodes_content_order")
                    .table(Episodes::Table)
                    .col(Episodes::ContentId)
                    .col(Episodes::SeasonNumber)
                    .col(Episodes::EpisodeNumber)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Not unique: duplicate favorites are allowed.
        manager
            .create_index(
                Index::create()
                    .name("idx_favorites_user_content")
                    .table(Favorites::Table)
                    .col(Favorites::UserId)
                    .col(Favorites::ContentId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Favorites::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Episodes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Content::Table).to_owned())
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
    Email,
    FirstName,
    LastName,
    ProfileImageUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Content {
    Table,
    Id,
    Title,
    Description,
    ContentType,
    ThumbnailUrl,
    BannerUrl,
    VideoUrl,
    TrailerUrl,
    Year,
    Duration,
    Rating,
    Genre,
    Cast,
    Director,
    IsActive,
    IsFeatured,
    ViewCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Episodes {
    Table,
    Id,
    ContentId,
    Title,
    Description,
    EpisodeNumber,
    SeasonNumber,
    VideoUrl,
    ThumbnailUrl,
    Duration,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Favorites {
    Table,
    Id,
    UserId,
    ContentId,
    CreatedAt,
}
