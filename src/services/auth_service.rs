use super::{UserService, VerificationService};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{validate_password, validate_phone, verify_password};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// 注册/登录流程：短信验证码 + 密码
#[derive(Clone)]
pub struct AuthService {
    user_service: UserService,
    verification: VerificationService,
}

impl AuthService {
    pub fn new(pool: Arc<DatabaseConnection>, verification: VerificationService) -> Self {
        Self {
            user_service: UserService::new(pool),
            verification,
        }
    }

    /// 为手机号签发验证码，返回验证码（交给短信发送方）及有效期
    pub async fn send_code(&self, phone: &str) -> AppResult<(String, SendCodeResponse)> {
        let code = self.verification.issue_new(phone).await?;
        log::info!("Verification code issued: {phone}");
        Ok((
            code,
            SendCodeResponse {
                expires_in: self.verification.ttl_secs(),
            },
        ))
    }

    /// 注册；参数与手机号检查在消费验证码之前完成
    pub async fn register(&self, request: RegisterRequest) -> AppResult<UserView> {
        validate_phone(&request.phone)?;
        validate_password(&request.password)?;
        validate_password(&request.pay_password)?;
        self.user_service
            .ensure_phone_available(&request.phone)
            .await?;

        let outcome = self
            .verification
            .validate(&request.phone, &request.verification_code)
            .await;
        if !outcome.is_pass() {
            log::warn!("Registration code check failed for {}: {outcome}", request.phone);
        }
        outcome.into_result()?;

        self.user_service
            .insert_user(&request.phone, &request.password, &request.pay_password)
            .await
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<UserView> {
        validate_phone(&request.phone)?;

        let user = self
            .user_service
            .find_user(&request.phone)
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid phone number or password".to_string()))?;

        if !verify_password(&request.password, &user.password)? {
            return Err(AppError::AuthError(
                "Invalid phone number or password".to_string(),
            ));
        }

        Ok(user.into())
    }
}
