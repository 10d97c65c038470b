//! 测试用实体样例

use crate::entities::{movie_entity, screen_entity, user_entity};
use chrono::{NaiveDate, TimeZone, Utc};

pub(crate) fn sample_movie(id: &str) -> movie_entity::Model {
    movie_entity::Model {
        id: id.to_string(),
        expired: false,
        name: "千与千寻".to_string(),
        description: "暂无介绍".to_string(),
        playing_time: NaiveDate::from_ymd_opt(1970, 1, 2).unwrap(),
        duration: 125,
        movie_type: "动画".to_string(),
        playing_type: "2D".to_string(),
        rating: 9.3,
        rating_num: 12,
        poster: Some("spirited-away.jpg".to_string()),
    }
}

pub(crate) fn sample_screen(id: &str, movie_id: &str) -> screen_entity::Model {
    screen_entity::Model {
        id: id.to_string(),
        movie_id: movie_id.to_string(),
        time: Utc.timestamp_millis_opt(1_000).unwrap(),
        hall_num: "3".to_string(),
        price: 30.0,
        ticket_num: 120,
    }
}

pub(crate) fn sample_user(phone: &str, password_hash: &str) -> user_entity::Model {
    user_entity::Model {
        id: phone.to_string(),
        password: password_hash.to_string(),
        pay_password: password_hash.to_string(),
        nickname: "猿眼用户".to_string(),
        money: 50.0,
        description: "这个人很懒，什么也没留下".to_string(),
        avatar: "MonkeyEye.jpg".to_string(),
        is_admin: false,
    }
}
