//! 项目数据库模型
//!
//! 定义项目相关的数据库模型结构体

use chrono::{DateTime, NaiveDate, Utc};

/// 项目信息结构体
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ProjectInfo {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 项目搜索结果
#[derive(Debug, Clone)]
pub struct ProjectSearchResult {
    pub projects: Vec<ProjectInfo>,
    pub total: u32,
}

/// 项目搜索条件
///
/// 所有条件都是可选的，未设置的条件不参与过滤
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// 项目名称，忽略大小写的模糊匹配
    pub name: Option<String>,

    /// 项目状态，精确匹配
    pub status: Option<String>,
}

impl ProjectFilter {
    /// 判断项目是否满足搜索条件
    pub fn matches(&self, project: &ProjectInfo) -> bool {
        let name_ok = self
            .name
            .as_ref()
            .map_or(true, |n| project.name.to_lowercase().contains(&n.to_lowercase()));
        let status_ok = self.status.as_ref().map_or(true, |s| &project.status == s);

        name_ok && status_ok
    }
}

/// 项目创建参数
///
/// 整体替换（PUT）时也使用这个结构体，所有字段都会覆盖原有数据
#[derive(Debug, Clone)]
pub struct ProjectCreate {
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub location: Option<String>,
}

/// 项目更新参数
///
/// 为 `None` 的字段保持原值不变
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub location: Option<String>,
}
