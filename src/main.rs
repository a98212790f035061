use color_eyre::Result;
use database::{initialize_database, MemoryProjectRepository, ProjectRepository};
use shared_lib::{AppConfig, StorageBackend};
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = AppConfig::load()?;

    // RUST_LOG 优先，未设置时使用配置中的日志级别
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // 使用 watch 通道广播关闭信号
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("📴 收到关闭信号");
        let _ = shutdown_tx.send(true);
    });

    match config.storage {
        StorageBackend::Postgres => {
            let pool = initialize_database(config.clone()).await?;
            web_service::start_web_service(config, ProjectRepository::new(pool), shutdown_rx).await?;
        }
        StorageBackend::Memory => {
            warn!("⚠️ 未配置 DATABASE_URL，项目数据只保存在内存中，重启后丢失");
            web_service::start_web_service(config, MemoryProjectRepository::new(), shutdown_rx).await?;
        }
    }

    Ok(())
}

/// 等待 Ctrl-C 或 SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ 无法监听 Ctrl-C 信号: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("❌ 无法监听 SIGTERM 信号: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
