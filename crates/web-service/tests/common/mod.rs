use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use database::MemoryProjectRepository;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use web_service::routes::create_app_router;
use web_service::AppState;

/// 使用内存仓库创建测试用的应用路由
pub fn test_app() -> Router {
    create_app_router(AppState::with_repository(MemoryProjectRepository::new()))
}

/// 发送请求并返回状态码和解析后的json
///
/// 响应体为空时返回 [`Value::Null`]
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = body.map(|json| serde_json::to_string(&json).unwrap());
    send_raw(app, method, uri, body.as_deref()).await
}

/// 发送原始字符串作为请求体，用于构造非法的json
pub async fn send_raw(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(raw) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(raw.to_owned())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, json)
}
