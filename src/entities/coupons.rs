use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

/// 优惠券实体
/// - discount: 减免金额
/// - condition: 满多少元可用
/// - status: false 未使用, true 已使用 (单次使用)
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "coupons")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub discount: i16,
    pub condition: i16,
    pub username: String,
    pub expired_time: NaiveDate,
    pub status: bool,
}

impl Model {
    /// 未使用且未过期（过期日当天仍可用）
    pub fn is_usable_on(&self, today: NaiveDate) -> bool {
        !self.status && self.expired_time >= today
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::Username",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_usable_on() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        let coupon = Model {
            id: "c1".to_string(),
            discount: 5,
            condition: 30,
            username: "13800138000".to_string(),
            expired_time: day,
            status: false,
        };
        assert!(coupon.is_usable_on(day));
        assert!(!coupon.is_usable_on(day.succ_opt().unwrap()));
        assert!(!Model { status: true, ..coupon }.is_usable_on(day));
    }
}
