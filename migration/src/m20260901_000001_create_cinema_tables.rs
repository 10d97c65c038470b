use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Password,
    PayPassword,
    Nickname,
    Money,
    Description,
    Avatar,
    IsAdmin,
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    Expired,
    Name,
    Description,
    PlayingTime,
    Duration,
    MovieType,
    PlayingType,
    Rating,
    RatingNum,
    Poster,
}

#[derive(DeriveIden)]
enum Screens {
    Table,
    Id,
    MovieId,
    Time,
    HallNum,
    Price,
    TicketNum,
}

#[derive(DeriveIden)]
enum Recommends {
    Table,
    MovieId,
}

#[derive(DeriveIden)]
enum Coupons {
    Table,
    Id,
    Discount,
    Condition,
    Username,
    ExpiredTime,
    Status,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    ScreenId,
    Seat,
    Username,
    CreateTime,
    Status,
    CouponId,
    PayPrice,
    TotalPrice,
}

#[derive(DeriveIden)]
enum Favorites {
    Table,
    Id,
    Username,
    MovieId,
}

#[derive(DeriveIden)]
enum Comments {
    Table,
    Id,
    Username,
    MovieId,
    Content,
    Rating,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 影院核心表
/// - users.id 即 11 位手机号
/// - 其余业务表主键为 32 位 uuid (simple 格式)
/// - 子表随父记录级联删除；订单引用的优惠券被删除时置空
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 用户
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .string_len(11)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string_len(60).not_null())
                    .col(
                        ColumnDef::new(Users::PayPassword)
                            .string_len(60)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::Nickname)
                            .string_len(20)
                            .not_null()
                            .default("猿眼用户"),
                    )
                    .col(
                        ColumnDef::new(Users::Money)
                            .double()
                            .not_null()
                            .default(50.0),
                    )
                    .col(
                        ColumnDef::new(Users::Description)
                            .string_len(50)
                            .not_null()
                            .default("这个人很懒，什么也没留下"),
                    )
                    .col(
                        ColumnDef::new(Users::Avatar)
                            .string_len(40)
                            .not_null()
                            .default("MonkeyEye.jpg"),
                    )
                    .col(
                        ColumnDef::new(Users::IsAdmin)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // 电影
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Movies::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Movies::Expired)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Movies::Name).string_len(25).not_null())
                    .col(
                        ColumnDef::new(Movies::Description)
                            .text()
                            .not_null()
                            .default("暂无介绍"),
                    )
                    .col(
                        ColumnDef::new(Movies::PlayingTime)
                            .date()
                            .not_null()
                            .default(Expr::cust("CURRENT_DATE")),
                    )
                    .col(ColumnDef::new(Movies::Duration).small_integer().not_null())
                    .col(ColumnDef::new(Movies::MovieType).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Movies::PlayingType)
                            .string_len(15)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Movies::Rating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Movies::RatingNum)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Movies::Poster).string_len(40).null())
                    .to_owned(),
            )
            .await?;

        // 场次
        manager
            .create_table(
                Table::create()
                    .table(Screens::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Screens::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Screens::MovieId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Screens::Time)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Screens::HallNum).string_len(1).not_null())
                    .col(
                        ColumnDef::new(Screens::Price)
                            .double()
                            .not_null()
                            .default(30.0),
                    )
                    .col(
                        ColumnDef::new(Screens::TicketNum)
                            .small_integer()
                            .not_null()
                            .default(120),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_screens_movie")
                            .from(Screens::Table, Screens::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 推荐 (每部电影最多一条)
        manager
            .create_table(
                Table::create()
                    .table(Recommends::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Recommends::MovieId)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recommends_movie")
                            .from(Recommends::Table, Recommends::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 优惠券 (订单引用它，需先于订单创建)
        manager
            .create_table(
                Table::create()
                    .table(Coupons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Coupons::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Coupons::Discount)
                            .small_integer()
                            .not_null()
                            .default(5),
                    )
                    .col(
                        ColumnDef::new(Coupons::Condition)
                            .small_integer()
                            .not_null()
                            .default(30),
                    )
                    .col(ColumnDef::new(Coupons::Username).string_len(11).not_null())
                    .col(ColumnDef::new(Coupons::ExpiredTime).date().not_null())
                    .col(
                        ColumnDef::new(Coupons::Status)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_coupons_user")
                            .from(Coupons::Table, Coupons::Username)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 订单
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::ScreenId).string_len(32).not_null())
                    .col(ColumnDef::new(Orders::Seat).text().not_null())
                    .col(ColumnDef::new(Orders::Username).string_len(11).not_null())
                    .col(
                        ColumnDef::new(Orders::CreateTime)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Orders::Status)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Orders::CouponId).string_len(32).null())
                    .col(ColumnDef::new(Orders::PayPrice).double().not_null())
                    .col(ColumnDef::new(Orders::TotalPrice).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_screen")
                            .from(Orders::Table, Orders::ScreenId)
                            .to(Screens::Table, Screens::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_user")
                            .from(Orders::Table, Orders::Username)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_coupon")
                            .from(Orders::Table, Orders::CouponId)
                            .to(Coupons::Table, Coupons::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 收藏
        manager
            .create_table(
                Table::create()
                    .table(Favorites::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Favorites::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Favorites::Username)
                            .string_len(11)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Favorites::MovieId).string_len(32).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorites_user")
                            .from(Favorites::Table, Favorites::Username)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorites_movie")
                            .from(Favorites::Table, Favorites::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 评论
        manager
            .create_table(
                Table::create()
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Comments::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Comments::Username).string_len(11).not_null())
                    .col(ColumnDef::new(Comments::MovieId).string_len(32).not_null())
                    .col(ColumnDef::new(Comments::Content).text().not_null())
                    .col(ColumnDef::new(Comments::Rating).small_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_user")
                            .from(Comments::Table, Comments::Username)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_movie")
                            .from(Comments::Table, Comments::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除顺序：子表 -> 父表
        manager
            .drop_table(Table::drop().if_exists().table(Comments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Favorites::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Coupons::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Recommends::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Screens::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Movies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}
