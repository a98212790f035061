use crate::models::common::ErrorReply;
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use color_eyre::eyre::Error;
use database::DatabaseError;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// 使用 [`thiserror`] 定义错误类型
/// 方便根据类型转换为相应的http错误码
#[derive(Error, Debug)]
pub enum AppError {
    /// 数据验证错误，这种错误通常都是用户参数不正确导致的，所以需要转换为400
    #[error(transparent)]
    ValidationFailed(#[from] ValidationErrors),

    /// 请求体解析错误，例如json格式错误或者缺少必填字段
    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),

    /// 路径参数解析错误
    #[error(transparent)]
    PathRejection(#[from] PathRejection),

    /// 查询参数解析错误
    #[error(transparent)]
    QueryRejection(#[from] QueryRejection),

    /// 数据库错误
    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),

    /// 仓库层数据库错误
    #[error(transparent)]
    RepositoryError(#[from] DatabaseError),

    /// 其他类型错误
    #[error(transparent)]
    InternalError(#[from] Error),
}

impl AppError {
    /// 错误对应的http状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            AppError::JsonRejection(JsonRejection::MissingJsonContentType(_)) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::JsonRejection(_) | AppError::PathRejection(_) | AppError::QueryRejection(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::DatabaseError(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            AppError::RepositoryError(err) => match err {
                DatabaseError::SqlxError(sqlx::Error::RowNotFound) | DatabaseError::NotFound(_) => StatusCode::NOT_FOUND,
                DatabaseError::ValidationError(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::ValidationFailed(err) => format!("Validate failed: {err}"),
            AppError::JsonRejection(err) => format!("Invalid JSON body: {}", err.body_text()),
            AppError::PathRejection(err) => format!("Invalid path: {}", err.body_text()),
            AppError::QueryRejection(err) => format!("Invalid query: {}", err.body_text()),
            AppError::DatabaseError(sqlx::Error::RowNotFound) => format!("Can not found resource: {self}"),
            AppError::DatabaseError(err) => format!("Database error: {err}"),
            AppError::RepositoryError(DatabaseError::NotFound(_)) => self.to_string(),
            AppError::RepositoryError(DatabaseError::ValidationError(msg)) => format!("Validation error: {msg}"),
            AppError::RepositoryError(err) => format!("Repository error: {err}"),
            AppError::InternalError(err) => format!("Something went wrong: {err}"),
        };

        if status.is_server_error() {
            error!("❌ {}", message);
        }

        let body = ErrorReply {
            error: message,
            status_code: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::eyre::eyre;
    use validator::ValidationError;

    #[test]
    fn test_status_codes() {
        let mut validation = ValidationErrors::new();
        validation.add("name", ValidationError::new("length"));

        assert_eq!(AppError::from(validation).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::from(DatabaseError::project_not_found(7)).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::from(sqlx::Error::RowNotFound).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::from(DatabaseError::SqlxError(sqlx::Error::RowNotFound)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(DatabaseError::ValidationError("bad".to_string())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(DatabaseError::connection("refused")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AppError::from(eyre!("boom")).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_response() {
        let response = AppError::from(DatabaseError::project_not_found(42)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_json_rejection_is_bad_request() {
        // 语法错误和缺少字段都返回400，而不是 axum 默认的422
        let syntax = Json::<serde_json::Value>::from_bytes(b"invalid json").unwrap_err();
        let response = AppError::from(syntax).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let missing = Json::<crate::models::projects::ProjectPayload>::from_bytes(br#"{"location":"City"}"#).unwrap_err();
        assert_eq!(AppError::from(missing).status_code(), StatusCode::BAD_REQUEST);
    }
}
