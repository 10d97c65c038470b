pub mod comments;
pub mod coupons;
pub mod favorites;
pub mod movies;
pub mod orders;
pub mod recommends;
pub mod screens;
pub mod users;

pub use comments as comment_entity;
pub use coupons as coupon_entity;
pub use favorites as favorite_entity;
pub use movies as movie_entity;
pub use orders as order_entity;
pub use recommends as recommend_entity;
pub use screens as screen_entity;
pub use users as user_entity;
