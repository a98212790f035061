use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 封装符合json-api的列表对象
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct ReplyList<T> {
    pub data: Vec<T>,
    #[schema(example = 146)]
    /// 分页查询总数
    pub total: u32,

    #[schema(example = 20)]
    /// 分页查询的每页大小
    pub page_size: u32,

    #[schema(example = 1)]
    /// 分页查询的开始页数
    pub page_index: u32,
}

/// 错误返回对象
#[derive(Deserialize, Debug, ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReply {
    #[schema(example = "Project 42 not found")]
    /// 错误信息
    pub error: String,

    #[schema(example = 404)]
    /// HTTP状态码
    pub status_code: u16,
}

/// 健康检查返回对象
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct HealthReply {
    #[schema(example = "healthy")]
    pub status: String,
    pub timestamp: DateTime<Utc>,
}
