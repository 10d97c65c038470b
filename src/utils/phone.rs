use crate::error::{AppError, AppResult};
use regex::Regex;
use std::sync::OnceLock;

/// 手机号长度（中国大陆 11 位）
pub const PHONE_LEN: usize = 11;

fn phone_regex() -> &'static Regex {
    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    PHONE_REGEX.get_or_init(|| Regex::new(r"^\d{11}$").expect("static phone regex"))
}

/// 是否为恰好 `len` 位的纯 ASCII 数字串
pub fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// 验证手机号格式 (11 位纯数字)
pub fn validate_phone(phone: &str) -> AppResult<()> {
    if !phone_regex().is_match(phone) {
        return Err(AppError::ValidationError(
            "Invalid phone number, expected 11 digits".to_string(),
        ));
    }

    Ok(())
}
