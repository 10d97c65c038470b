use crate::error::{AppError, AppResult};
use bcrypt::{DEFAULT_COST, hash, verify};

/// 登录密码与支付密码共用的长度规则：6-32 个字符
pub fn validate_password(password: &str) -> AppResult<()> {
    let len = password.chars().count();
    if !(6..=32).contains(&len) {
        return Err(AppError::ValidationError(
            "Password length must be between 6 and 32 characters".to_string(),
        ));
    }

    Ok(())
}

/// 用户入库前对登录/支付密码做 bcrypt 哈希
pub fn hash_password(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {e}")))
}

/// 登录时比对明文密码与 users.password 中的哈希
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    verify(password, hash)
        .map_err(|e| AppError::InternalError(format!("Failed to verify password: {e}")))
}
