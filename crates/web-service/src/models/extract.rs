//! 自定义提取器
//!
//! 包装 axum 自带的提取器，解析失败时返回 [`AppError`]，
//! 保证所有错误都使用统一的json格式返回。

use crate::models::err::AppError;
use axum::extract::{FromRequest, FromRequestParts};

/// 请求体json提取器，替代 [`axum::Json`]
#[derive(FromRequest, Debug)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// 路径参数提取器，替代 [`axum::extract::Path`]
#[derive(FromRequestParts, Debug)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// 查询参数提取器，替代 [`axum::extract::Query`]
#[derive(FromRequestParts, Debug)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
