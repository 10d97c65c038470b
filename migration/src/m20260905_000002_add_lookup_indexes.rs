use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Screens {
    Table,
    MovieId,
    Time,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Username,
    CreateTime,
}

#[derive(DeriveIden)]
enum Coupons {
    Table,
    Username,
}

#[derive(DeriveIden)]
enum Favorites {
    Table,
    Username,
}

#[derive(DeriveIden)]
enum Comments {
    Table,
    MovieId,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按电影查询场次（按时间排序）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_screens_movie_time")
                    .table(Screens::Table)
                    .col(Screens::MovieId)
                    .col(Screens::Time)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_orders_username_create_time")
                    .table(Orders::Table)
                    .col(Orders::Username)
                    .col(Orders::CreateTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_coupons_username")
                    .table(Coupons::Table)
                    .col(Coupons::Username)
                    .to_owned(),
            )
            .await?;

        // 非唯一：收藏去重在服务层处理
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_favorites_username")
                    .table(Favorites::Table)
                    .col(Favorites::Username)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_comments_movie_id")
                    .table(Comments::Table)
                    .col(Comments::MovieId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_comments_movie_id")
                    .table(Comments::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_favorites_username")
                    .table(Favorites::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_coupons_username")
                    .table(Coupons::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_orders_username_create_time")
                    .table(Orders::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_screens_movie_time")
                    .table(Screens::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
