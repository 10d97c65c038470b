use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

/// 电影实体
/// 说明:
/// - expired: 是否已下架
/// - rating / rating_num: 由评论聚合得出，不会随评论自动更新
/// - poster: 海报文件名，可能为空
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub expired: bool,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// 上映日期
    pub playing_time: NaiveDate,
    /// 时长(分钟)
    pub duration: i16,
    pub movie_type: String,
    /// 放映类型 (2D/3D/IMAX ...)
    pub playing_type: String,
    pub rating: f64,
    pub rating_num: i16,
    pub poster: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::screens::Entity")]
    Screens,
    #[sea_orm(has_many = "super::recommends::Entity")]
    Recommends,
    #[sea_orm(has_many = "super::comments::Entity")]
    Comments,
    #[sea_orm(has_many = "super::favorites::Entity")]
    Favorites,
}

impl Related<super::screens::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Screens.def()
    }
}

impl Related<super::recommends::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recommends.def()
    }
}

impl Related<super::comments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<super::favorites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
