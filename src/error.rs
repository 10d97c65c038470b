use crate::models::ApiError;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl AppError {
    /// 对外暴露的稳定错误码
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::AuthError(_) => "AUTH_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::ConfigError(_) => "CONFIG_ERROR",
            AppError::InternalError(_) | AppError::SerdeJsonError(_) => "INTERNAL_ERROR",
        }
    }

    /// 客户端引起的错误（参数、认证、资源不存在）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::ValidationError(_) | AppError::AuthError(_) | AppError::NotFound(_)
        )
    }

    /// 转换为 API 错误响应体，服务端错误不向外暴露细节
    pub fn to_api_error(&self) -> ApiError {
        let message = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                msg.clone()
            }
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                msg.clone()
            }
            AppError::NotFound(msg) => msg.clone(),
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                "Database error".to_string()
            }
            _ => {
                log::error!("Internal error: {self}");
                "Internal server error".to_string()
            }
        };

        ApiError {
            code: self.error_code().to_string(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_keep_message() {
        let err = AppError::ValidationError("Invalid phone".to_string());
        let api = err.to_api_error();
        assert_eq!(api.code, "VALIDATION_ERROR");
        assert_eq!(api.message, "Invalid phone");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_server_errors_hide_detail() {
        let err = AppError::DatabaseError(sea_orm::DbErr::Custom("connection reset".into()));
        let api = err.to_api_error();
        assert_eq!(api.code, "DATABASE_ERROR");
        assert_eq!(api.message, "Database error");
        assert!(!err.is_client_error());

        let err = AppError::InternalError("secret detail".to_string());
        assert_eq!(err.to_api_error().message, "Internal server error");
    }
}
