//! 对外表示中的时间统一为毫秒时间戳

use chrono::{DateTime, NaiveDate, Utc};

/// 日期按当天 00:00 UTC 转换
pub fn date_to_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or_default()
}

pub fn datetime_to_millis(dt: DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}
