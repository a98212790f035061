//! Web服务模块
//!
//! 提供 HTTP API 接口和文档服务

use crate::services::{ProjectService, ProjectServiceTrait};
use axum::http::HeaderValue;
use axum::Router;
use color_eyre::eyre::Context;
use color_eyre::Result;
use database::ProjectRepositoryTrait;
use shared_lib::AppConfig;
use std::sync::Arc;
use tokio::sync::watch::Receiver;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod models;
pub mod routes;
pub mod services;

/// 应用共享状态
///
/// 服务以 trait object 的形式保存，路由函数不需要关心具体使用的是哪个仓库实现。
#[derive(Clone)]
pub struct AppState {
    pub project_service: Arc<dyn ProjectServiceTrait>,
}

impl AppState {
    pub fn new<PS: ProjectServiceTrait>(project_service: PS) -> Self {
        Self {
            project_service: Arc::new(project_service),
        }
    }

    /// 使用默认的 [`ProjectService`] 包装指定的仓库
    pub fn with_repository<PR: ProjectRepositoryTrait>(project_repository: PR) -> Self {
        Self::new(ProjectService::new(project_repository))
    }
}

/// 根据配置创建跨域中间件
///
/// 没有配置 `CORS_ORIGIN` 时允许任意来源
fn cors_layer(origin: Option<&str>) -> Result<CorsLayer> {
    let allow_origin = match origin {
        Some(origin) => AllowOrigin::exact(
            HeaderValue::from_str(origin).wrap_err_with(|| format!("Invalid CORS_ORIGIN `{origin}`"))?,
        ),
        None => AllowOrigin::any(),
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

/// 创建带有中间件的完整应用
pub fn build_app(config: &AppConfig, shared_state: AppState) -> Result<Router> {
    let router = routes::create_app_router(shared_state)
        .layer(cors_layer(config.cors_origin.as_deref())?)
        .layer(TraceLayer::new_for_http());

    Ok(router)
}

/// 启动 Web 服务
pub async fn start_web_service<PR: ProjectRepositoryTrait>(
    config: Arc<AppConfig>,
    project_repository: PR,
    shutdown_rx: Receiver<bool>,
) -> Result<()> {
    let shared_state = AppState::with_repository(project_repository);
    let router = build_app(&config, shared_state)?;

    info!("🚀 启动 Web Service 在 {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(wait_for_shutdown(shutdown_rx))
        .await?;

    info!("✅ Web Service 已停止");
    Ok(())
}

/// 等待关闭信号
async fn wait_for_shutdown(mut shutdown_rx: Receiver<bool>) {
    // 如果已经是 true，直接返回
    while !*shutdown_rx.borrow_and_update() {
        // 发送端被丢弃时也视为关闭
        if shutdown_rx.changed().await.is_err() {
            break;
        }
    }
    info!("🛑 Web Service 正在关闭...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer() {
        assert!(cors_layer(None).is_ok());
        assert!(cors_layer(Some("http://localhost:5173")).is_ok());
        assert!(cors_layer(Some("bad\norigin")).is_err());
    }

    #[tokio::test]
    async fn test_wait_for_shutdown() {
        let (tx, rx) = tokio::sync::watch::channel(false);
        let waiter = tokio::spawn(wait_for_shutdown(rx));

        tx.send(true).unwrap();
        waiter.await.unwrap();
    }
}
