use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// 未指定状态时使用的默认状态
pub const DEFAULT_STATUS: &str = "planning";

/// 未指定分页大小时使用的默认值
pub const DEFAULT_PAGE_SIZE: u32 = 20;

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

fn default_page_index() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// 项目列表查询参数
///
/// - `name`/`status` 为可选的过滤条件
/// - 分页参数不传时使用默认值
#[derive(Deserialize, Debug, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct ProjectListQuery {
    /// 查询的项目名称（忽略大小写的模糊搜索）
    #[param(example = "tower")]
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    /// 查询的项目状态（精确匹配）
    #[param(example = "active")]
    #[validate(length(min = 1, max = 100))]
    pub status: Option<String>,

    /// 分页查询的开始页数，从1开始
    #[serde(default = "default_page_index")]
    #[validate(range(min = 1))]
    pub page_index: u32,

    /// 分页查询的每页大小
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: u32,
}

/// 创建或整体替换项目时提交的数据
///
/// 整体替换（PUT）时，未提交的可选字段会被清空，`status` 会恢复为默认值。
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct ProjectPayload {
    #[schema(example = "Test Project")]
    #[validate(length(min = 1, max = 255))]
    /// 项目名称
    pub name: String,

    #[schema(example = "Office building renovation")]
    /// 项目说明
    pub description: Option<String>,

    #[schema(example = "planned")]
    #[serde(default = "default_status")]
    #[validate(length(min = 1, max = 100))]
    /// 项目状态，默认为 `planning`
    pub status: String,

    #[schema(example = "2024-02-17")]
    /// 开始日期
    pub start_date: Option<NaiveDate>,

    #[schema(example = "2024-03-18")]
    /// 结束日期
    pub end_date: Option<NaiveDate>,

    #[schema(example = "City")]
    /// 项目所在地
    pub location: Option<String>,
}

impl From<ProjectPayload> for database::ProjectCreate {
    fn from(payload: ProjectPayload) -> Self {
        Self {
            name: payload.name,
            description: payload.description,
            status: payload.status,
            start_date: payload.start_date,
            end_date: payload.end_date,
            location: payload.location,
        }
    }
}

/// 部分更新项目时提交的数据
///
/// 只有提交了的字段会被修改
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct ProjectPatch {
    #[schema(example = "Renamed")]
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[schema(example = "active")]
    #[validate(length(min = 1, max = 100))]
    pub status: Option<String>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    pub location: Option<String>,
}

impl From<ProjectPatch> for database::ProjectUpdate {
    fn from(patch: ProjectPatch) -> Self {
        Self {
            name: patch.name,
            description: patch.description,
            status: patch.status,
            start_date: patch.start_date,
            end_date: patch.end_date,
            location: patch.location,
        }
    }
}

/// 项目信息
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct ProjectInfo {
    #[schema(example = 15)]
    /// 项目ID
    pub id: i32,

    #[schema(example = "Test Project")]
    /// 项目名称
    pub name: String,

    /// 项目说明
    pub description: Option<String>,

    #[schema(example = "planned")]
    /// 项目状态
    pub status: String,

    /// 开始日期
    pub start_date: Option<NaiveDate>,

    /// 结束日期
    pub end_date: Option<NaiveDate>,

    /// 项目所在地
    pub location: Option<String>,

    /// 创建时间
    pub created_at: DateTime<Utc>,

    /// 最后更新时间
    pub updated_at: DateTime<Utc>,
}

impl From<database::ProjectInfo> for ProjectInfo {
    fn from(project: database::ProjectInfo) -> Self {
        Self {
            id: project.id,
            name: project.name,
            description: project.description,
            status: project.status,
            start_date: project.start_date,
            end_date: project.end_date,
            location: project.location,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}
