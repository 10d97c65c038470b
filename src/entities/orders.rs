use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 座位号在库中以逗号分隔存储
pub const SEAT_SEPARATOR: char = ',';

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub screen_id: String,
    #[sea_orm(column_type = "Text")]
    pub seat: String,
    /// 下单用户手机号
    pub username: String,
    pub create_time: DateTime<Utc>,
    /// false: 未支付, true: 已支付
    pub status: bool,
    pub coupon_id: Option<String>,
    /// 实际支付
    pub pay_price: f64,
    /// 原价
    pub total_price: f64,
}

impl Model {
    /// 拆分座位列表，忽略空段
    pub fn seats(&self) -> Vec<String> {
        self.seat
            .split(SEAT_SEPARATOR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::screens::Entity",
        from = "Column::ScreenId",
        to = "super::screens::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Screen,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::Username",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::coupons::Entity",
        from = "Column::CouponId",
        to = "super::coupons::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Coupon,
}

impl Related<super::screens::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Screen.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::coupons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Coupon.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
