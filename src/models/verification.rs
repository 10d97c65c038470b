use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 验证码校验结果
///
/// 所有分支都是正常返回值，由调用方决定如何呈现给用户。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VerifyOutcome {
    /// 验证通过，验证码已被消费
    Pass,
    /// 手机号不是 11 位数字，或验证码不是 6 位数字
    InvalidArguments,
    /// 该手机号没有待验证的验证码
    NoCodeIssued,
    /// 验证码不匹配（待验证记录保留）
    WrongCode,
    /// 验证码匹配但已超过有效期（记录已删除）
    Expired,
}

impl VerifyOutcome {
    pub fn is_pass(self) -> bool {
        self == VerifyOutcome::Pass
    }

    /// 非 Pass 结果转换为校验错误，便于在业务流程中使用 `?`
    pub fn into_result(self) -> AppResult<()> {
        let msg = match self {
            VerifyOutcome::Pass => return Ok(()),
            VerifyOutcome::InvalidArguments => "Invalid phone number or verification code",
            VerifyOutcome::NoCodeIssued => "Verification code not found",
            VerifyOutcome::WrongCode => "Incorrect verification code",
            VerifyOutcome::Expired => "Verification code expired",
        };
        Err(AppError::ValidationError(msg.to_string()))
    }
}

impl std::fmt::Display for VerifyOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerifyOutcome::Pass => write!(f, "pass"),
            VerifyOutcome::InvalidArguments => write!(f, "invalid_arguments"),
            VerifyOutcome::NoCodeIssued => write!(f, "no_code_issued"),
            VerifyOutcome::WrongCode => write!(f, "wrong_code"),
            VerifyOutcome::Expired => write!(f, "expired"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendCodeRequest {
    #[schema(example = "13800138000")]
    pub phone: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendCodeResponse {
    /// 有效期（秒）
    pub expires_in: u64,
}
