use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use std::time::Duration;

use monkey_eye_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    services::VerificationService,
    tasks::spawn_verification_sweeper,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml()?;

    // 创建数据库连接池并运行迁移
    let pool = create_pool(&config.database).await?;
    run_migrations(&pool).await?;

    // 验证码缓存随进程创建，清理任务随进程退出而停止
    let verification = VerificationService::from_config(&config.verification);
    let sweeper = spawn_verification_sweeper(
        verification.clone(),
        Duration::from_secs(config.verification.sweep_interval_secs),
    );

    log::info!(
        "Data layer ready (code ttl: {}s, pending codes: {}), waiting for shutdown signal",
        verification.ttl_secs(),
        verification.pending_count().await
    );
    tokio::signal::ctrl_c().await?;

    log::info!("Shutting down");
    sweeper.shutdown().await;

    Ok(())
}
