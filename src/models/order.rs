use crate::entities::{coupon_entity, order_entity};
use crate::utils::{date_to_millis, datetime_to_millis};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: String,
    pub screen_id: String,
    pub create_time: i64,
    pub username: String,
    pub seat: Vec<String>,
    /// 是否已支付
    pub status: bool,
    pub coupon_id: Option<String>,
    pub pay_price: f64,
    pub total_price: f64,
}

impl From<order_entity::Model> for OrderView {
    fn from(m: order_entity::Model) -> Self {
        Self {
            seat: m.seats(),
            create_time: datetime_to_millis(m.create_time),
            id: m.id,
            screen_id: m.screen_id,
            username: m.username,
            status: m.status,
            coupon_id: m.coupon_id,
            pay_price: m.pay_price,
            total_price: m.total_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CouponView {
    pub id: String,
    pub discount: i16,
    /// 满多少元可用
    pub condition: i16,
    pub expired_time: i64,
    /// 是否已使用
    pub status: bool,
}

impl From<coupon_entity::Model> for CouponView {
    fn from(m: coupon_entity::Model) -> Self {
        Self {
            expired_time: date_to_millis(m.expired_time),
            id: m.id,
            discount: m.discount,
            condition: m.condition,
            status: m.status,
        }
    }
}
