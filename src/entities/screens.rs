use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 场次实体
/// - hall_num: 放映厅编号 ("1"-"5")
/// - ticket_num: 剩余票数，下单时由业务层扣减
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "screens")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub movie_id: String,
    pub time: DateTime<Utc>,
    pub hall_num: String,
    pub price: f64,
    pub ticket_num: i16,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::movies::Entity",
        from = "Column::MovieId",
        to = "super::movies::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Movie,
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
}

impl Related<super::movies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movie.def()
    }
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
