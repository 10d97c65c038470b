use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 海报静态资源前缀
pub const POSTER_PATH_PREFIX: &str = "/static/images/poster/";
/// 用户头像静态资源前缀
pub const AVATAR_PATH_PREFIX: &str = "/static/images/user/";

pub fn poster_path(file: &str) -> String {
    format!("{POSTER_PATH_PREFIX}{file}")
}

pub fn avatar_path(file: &str) -> String {
    format!("{AVATAR_PATH_PREFIX}{file}")
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message),
            error: None,
        }
    }

    pub fn error(error: ApiError) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: None,
            error: Some(error),
        }
    }
}

impl<T> From<crate::error::AppResult<T>> for ApiResponse<T> {
    fn from(result: crate::error::AppResult<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(e) => Self {
                success: false,
                data: None,
                message: None,
                error: Some(e.to_api_error()),
            },
        }
    }
}
