//! 短信验证码缓存
//!
//! 手机号 -> (验证码, 签发时间) 的内存映射，由一把互斥锁保护：
//! - 签发新验证码会覆盖该手机号尚未使用的旧验证码
//! - 校验成功后验证码立即被消费，同一个验证码最多通过一次
//! - 验证码输错时保留记录，用户可在有效期内重试
//! - 过期记录在校验时或定期清理时删除

use crate::config::VerificationConfig;
use crate::error::AppResult;
use crate::models::VerifyOutcome;
use crate::utils::{PHONE_LEN, generate_six_digit_code, is_digits, validate_phone};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// 验证码位数
pub const CODE_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingCode {
    code: String,
    issued_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct VerificationService {
    ttl: Duration,
    codes: Arc<Mutex<HashMap<String, PendingCode>>>,
}

impl VerificationService {
    pub fn new(ttl: std::time::Duration) -> Self {
        Self {
            ttl: Duration::from_std(ttl).unwrap_or(Duration::MAX),
            codes: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn from_config(config: &VerificationConfig) -> Self {
        Self::new(std::time::Duration::from_secs(config.code_ttl_secs))
    }

    /// 验证码有效期（秒）
    pub fn ttl_secs(&self) -> u64 {
        self.ttl.num_seconds().max(0) as u64
    }

    /// 记录已发送给手机号的验证码，覆盖该手机号之前未使用的验证码
    pub async fn issue(&self, phone: &str, code: &str) {
        self.issue_at(phone, code, Utc::now()).await;
    }

    pub async fn issue_at(&self, phone: &str, code: &str, issued_at: DateTime<Utc>) {
        let pending = PendingCode {
            code: code.to_string(),
            issued_at,
        };
        let mut codes = self.codes.lock().await;
        if codes.insert(phone.to_string(), pending).is_some() {
            log::debug!("Replaced pending verification code for {phone}");
        }
    }

    /// 为手机号生成并记录一个新的 6 位验证码，返回给短信发送方
    pub async fn issue_new(&self, phone: &str) -> AppResult<String> {
        validate_phone(phone)?;
        let code = generate_six_digit_code();
        self.issue(phone, &code).await;
        Ok(code)
    }

    /// 校验手机号与验证码
    pub async fn validate(&self, phone: &str, code: &str) -> VerifyOutcome {
        self.validate_at(phone, code, Utc::now()).await
    }

    pub async fn validate_at(&self, phone: &str, code: &str, now: DateTime<Utc>) -> VerifyOutcome {
        if !is_digits(phone, PHONE_LEN) || !is_digits(code, CODE_LEN) {
            return VerifyOutcome::InvalidArguments;
        }

        // 查找、比较、删除在同一次加锁内完成
        let mut codes = self.codes.lock().await;
        let Some(pending) = codes.get(phone) else {
            return VerifyOutcome::NoCodeIssued;
        };
        if pending.code != code {
            return VerifyOutcome::WrongCode;
        }

        let issued_at = pending.issued_at;
        codes.remove(phone);
        drop(codes);

        if now.signed_duration_since(issued_at) < self.ttl {
            VerifyOutcome::Pass
        } else {
            log::debug!("Verification code for {phone} expired");
            VerifyOutcome::Expired
        }
    }

    /// 删除所有超过有效期的记录，返回删除数量
    pub async fn sweep(&self) -> usize {
        self.sweep_at(Utc::now()).await
    }

    pub async fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let mut codes = self.codes.lock().await;
        let before = codes.len();
        codes.retain(|_, pending| now.signed_duration_since(pending.issued_at) <= self.ttl);
        before - codes.len()
    }

    /// 当前待验证的记录数
    pub async fn pending_count(&self) -> usize {
        self.codes.lock().await.len()
    }
}

impl Default for VerificationService {
    fn default() -> Self {
        Self::from_config(&VerificationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: &str = "13800138000";

    fn service() -> VerificationService {
        VerificationService::new(std::time::Duration::from_secs(600))
    }

    #[tokio::test]
    async fn test_invalid_arguments_regardless_of_state() {
        let svc = service();
        svc.issue(PHONE, "123456").await;

        for (phone, code) in [
            ("1380013800", "123456"),
            ("138001380001", "123456"),
            ("1380013800a", "123456"),
            (PHONE, "12345"),
            (PHONE, "1234567"),
            (PHONE, "12345a"),
            ("", ""),
        ] {
            assert_eq!(
                svc.validate(phone, code).await,
                VerifyOutcome::InvalidArguments
            );
        }
        // 参数错误不会消费记录
        assert_eq!(svc.pending_count().await, 1);
    }

    #[tokio::test]
    async fn test_pass_consumes_code() {
        let svc = service();
        svc.issue(PHONE, "123456").await;

        assert_eq!(svc.validate(PHONE, "123456").await, VerifyOutcome::Pass);
        assert_eq!(svc.pending_count().await, 0);
        assert_eq!(
            svc.validate(PHONE, "123456").await,
            VerifyOutcome::NoCodeIssued
        );
    }

    #[tokio::test]
    async fn test_no_code_issued() {
        let svc = service();
        assert_eq!(
            svc.validate(PHONE, "123456").await,
            VerifyOutcome::NoCodeIssued
        );
    }

    #[tokio::test]
    async fn test_expired_code_is_removed() {
        let svc = service();
        let issued_at = Utc::now();
        svc.issue_at(PHONE, "123456", issued_at).await;

        let later = issued_at + Duration::seconds(601);
        assert_eq!(
            svc.validate_at(PHONE, "123456", later).await,
            VerifyOutcome::Expired
        );
        assert_eq!(svc.pending_count().await, 0);
    }

    #[tokio::test]
    async fn test_ttl_boundary() {
        let svc = service();
        let issued_at = Utc::now();

        svc.issue_at(PHONE, "123456", issued_at).await;
        let just_before = issued_at + Duration::seconds(599);
        assert_eq!(
            svc.validate_at(PHONE, "123456", just_before).await,
            VerifyOutcome::Pass
        );

        svc.issue_at(PHONE, "123456", issued_at).await;
        let at_ttl = issued_at + Duration::seconds(600);
        assert_eq!(
            svc.validate_at(PHONE, "123456", at_ttl).await,
            VerifyOutcome::Expired
        );
    }

    #[tokio::test]
    async fn test_reissue_overwrites_previous_code() {
        let svc = service();
        svc.issue(PHONE, "111111").await;
        svc.issue(PHONE, "222222").await;

        assert_eq!(svc.pending_count().await, 1);
        assert_eq!(
            svc.validate(PHONE, "111111").await,
            VerifyOutcome::WrongCode
        );
        assert_eq!(svc.validate(PHONE, "222222").await, VerifyOutcome::Pass);
    }

    #[tokio::test]
    async fn test_wrong_code_keeps_entry_for_retry() {
        let svc = service();
        svc.issue(PHONE, "123456").await;

        assert_eq!(
            svc.validate(PHONE, "654321").await,
            VerifyOutcome::WrongCode
        );
        assert_eq!(svc.pending_count().await, 1);
        assert_eq!(svc.validate(PHONE, "123456").await, VerifyOutcome::Pass);
    }

    #[tokio::test]
    async fn test_wrong_code_after_expiry_reports_wrong_code() {
        let svc = service();
        let issued_at = Utc::now();
        svc.issue_at(PHONE, "123456", issued_at).await;

        let later = issued_at + Duration::seconds(900);
        assert_eq!(
            svc.validate_at(PHONE, "000000", later).await,
            VerifyOutcome::WrongCode
        );
        assert_eq!(svc.pending_count().await, 1);
    }

    #[tokio::test]
    async fn test_sweep_removes_only_stale_entries() {
        let svc = service();
        let now = Utc::now();
        svc.issue_at("13800000001", "111111", now - Duration::seconds(601))
            .await;
        svc.issue_at("13800000002", "222222", now - Duration::seconds(3600))
            .await;
        svc.issue_at("13800000003", "333333", now - Duration::seconds(599))
            .await;
        svc.issue_at("13800000004", "444444", now).await;

        assert_eq!(svc.sweep_at(now).await, 2);
        assert_eq!(svc.pending_count().await, 2);
        assert_eq!(
            svc.validate_at("13800000001", "111111", now).await,
            VerifyOutcome::NoCodeIssued
        );
        assert_eq!(
            svc.validate_at("13800000003", "333333", now).await,
            VerifyOutcome::Pass
        );
        assert_eq!(
            svc.validate_at("13800000004", "444444", now).await,
            VerifyOutcome::Pass
        );
    }

    #[tokio::test]
    async fn test_issue_new_generates_valid_code() {
        let svc = service();
        let code = svc.issue_new(PHONE).await.unwrap();
        assert_eq!(code.len(), CODE_LEN);
        assert_eq!(svc.validate(PHONE, &code).await, VerifyOutcome::Pass);

        assert!(svc.issue_new("123").await.is_err());
        assert_eq!(svc.pending_count().await, 0);
    }

    #[tokio::test]
    async fn test_default_uses_configured_ttl() {
        assert_eq!(VerificationService::default().ttl_secs(), 600);
        let svc = VerificationService::from_config(&VerificationConfig {
            code_ttl_secs: 60,
            sweep_interval_secs: 10,
        });
        assert_eq!(svc.ttl_secs(), 60);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_validate_passes_once() {
        let svc = service();
        svc.issue(PHONE, "123456").await;

        let mut handles = Vec::new();
        for _ in 0..32 {
            let svc = svc.clone();
            handles.push(tokio::spawn(async move {
                svc.validate(PHONE, "123456").await
            }));
        }

        let mut passes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                VerifyOutcome::Pass => passes += 1,
                other => assert_eq!(other, VerifyOutcome::NoCodeIssued),
            }
        }
        assert_eq!(passes, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_issue_validate_sweep() {
        let svc = service();
        let mut handles = Vec::new();

        for i in 0..16 {
            let svc = svc.clone();
            handles.push(tokio::spawn(async move {
                let code = format!("{:06}", 100000 + i);
                svc.issue(PHONE, &code).await;
                (code.clone(), svc.validate(PHONE, &code).await)
            }));
        }
        let sweeper = {
            let svc = svc.clone();
            tokio::spawn(async move {
                for _ in 0..16 {
                    svc.sweep().await;
                    tokio::task::yield_now().await;
                }
            })
        };

        let mut passed_codes = Vec::new();
        for handle in handles {
            let (code, outcome) = handle.await.unwrap();
            assert_ne!(outcome, VerifyOutcome::Expired);
            assert_ne!(outcome, VerifyOutcome::InvalidArguments);
            if outcome.is_pass() {
                passed_codes.push(code);
            }
        }
        sweeper.await.unwrap();

        // 每个验证码最多通过一次，且最多留下一条待验证记录
        let mut unique = passed_codes.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), passed_codes.len());
        assert!(svc.pending_count().await <= 1);
    }
}
