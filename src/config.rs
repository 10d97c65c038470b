use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub verification: VerificationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// 验证码有效期（秒）
    #[serde(default = "default_code_ttl_secs")]
    pub code_ttl_secs: u64,
    /// 过期验证码清理间隔（秒）
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_secs: default_code_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_code_ttl_secs() -> u64 {
    600
}

fn default_sweep_interval_secs() -> u64 {
    3600
}

impl Config {
    pub fn from_toml() -> AppResult<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，如果不存在则完全依赖环境变量
        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => Self::parse(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // 数据库 URL 在无配置文件时必须提供
                let database_url = env::var("DATABASE_URL")
                    .map_err(|_| {
                        AppError::ConfigError(
                            "DATABASE_URL is not set and config.toml was not found".to_string(),
                        )
                    })?;

                Config {
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: default_max_connections(),
                    },
                    verification: VerificationConfig::default(),
                }
            }
            Err(e) => {
                return Err(AppError::ConfigError(format!(
                    "Failed to read config file {config_path}: {e}"
                )));
            }
        };

        // 环境变量覆盖（即便文件存在时也覆盖）
        config.apply_env_overrides(|name| env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    pub fn parse(config_str: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(config_str)
            .map_err(|e| AppError::ConfigError(format!("Failed to parse config file: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        if self.verification.code_ttl_secs == 0 {
            return Err(AppError::ConfigError(
                "verification.code_ttl_secs must be greater than 0".to_string(),
            ));
        }
        if self.verification.sweep_interval_secs == 0 {
            return Err(AppError::ConfigError(
                "verification.sweep_interval_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    fn apply_env_overrides<F>(&mut self, get_env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = get_env("DATABASE_URL") {
            self.database.url = v;
        }
        if let Some(v) = get_env("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            self.database.max_connections = mc;
        }
        if let Some(v) = get_env("VERIFICATION_CODE_TTL_SECS")
            && let Ok(n) = v.parse()
        {
            self.verification.code_ttl_secs = n;
        }
        if let Some(v) = get_env("VERIFICATION_SWEEP_INTERVAL_SECS")
            && let Ok(n) = v.parse()
        {
            self.verification.sweep_interval_secs = n;
        }
    }
}
