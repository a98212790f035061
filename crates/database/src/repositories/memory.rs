//! 内存项目仓库
//!
//! 实现和 [`ProjectRepository`](super::ProjectRepository) 相同的接口，数据保存在进程内存中。
//! 没有配置数据库时用于本地调试，同时也是测试用的仓库实现。

use crate::models::project::{ProjectCreate, ProjectFilter, ProjectInfo, ProjectSearchResult, ProjectUpdate};
use crate::repositories::traits::ProjectRepositoryTrait;
use crate::{DatabaseError, DatabaseResult};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct MemoryStore {
    /// 上一次分配的ID，删除后不会复用
    last_id: i32,
    projects: BTreeMap<i32, ProjectInfo>,
}

/// 内存项目仓库
///
/// 克隆后的实例共享同一份数据
#[derive(Debug, Clone, Default)]
pub struct MemoryProjectRepository {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ProjectRepositoryTrait for MemoryProjectRepository {
    async fn find_projects(&self, filter: ProjectFilter, page_size: i64, offset: i64) -> DatabaseResult<ProjectSearchResult> {
        debug!(
            "🔍 搜索项目 - 条件: {:?}, 页面大小: {}, 偏移量: {}",
            filter, page_size, offset
        );

        let store = self.store.read().await;
        let matched: Vec<&ProjectInfo> = store.projects.values().filter(|p| filter.matches(p)).collect();
        let total = u32::try_from(matched.len()).unwrap_or(u32::MAX);

        let projects: Vec<ProjectInfo> = matched
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(page_size).unwrap_or(0))
            .cloned()
            .collect();

        debug!("✅ 搜索完成 - 找到 {} 个项目，总计 {} 个", projects.len(), total);

        Ok(ProjectSearchResult { projects, total })
    }

    async fn create_project(&self, project: ProjectCreate) -> DatabaseResult<ProjectInfo> {
        debug!("📝 创建项目: {:#?}", project);

        let mut store = self.store.write().await;
        let id = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| DatabaseError::ValidationError("project id space exhausted".to_string()))?;
        store.last_id = id;

        let now = Utc::now();
        let project_info = ProjectInfo {
            id,
            name: project.name,
            description: project.description,
            status: project.status,
            start_date: project.start_date,
            end_date: project.end_date,
            location: project.location,
            created_at: now,
            updated_at: now,
        };
        store.projects.insert(id, project_info.clone());

        debug!("✅ 项目创建成功: {:#?}", project_info);
        Ok(project_info)
    }

    async fn get_project_by_id(&self, id: i32) -> DatabaseResult<ProjectInfo> {
        debug!("🔍 根据 ID 获取项目: {}", id);

        let store = self.store.read().await;
        store
            .projects
            .get(&id)
            .cloned()
            .ok_or_else(|| DatabaseError::project_not_found(id))
    }

    async fn replace_project(&self, id: i32, project: ProjectCreate) -> DatabaseResult<ProjectInfo> {
        debug!("🔄 替换项目 {} 信息: {:#?}", id, project);

        let mut store = self.store.write().await;
        let existing = store
            .projects
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::project_not_found(id))?;

        existing.name = project.name;
        existing.description = project.description;
        existing.status = project.status;
        existing.start_date = project.start_date;
        existing.end_date = project.end_date;
        existing.location = project.location;
        existing.updated_at = Utc::now();

        debug!("✅ 项目替换成功: {:#?}", existing);
        Ok(existing.clone())
    }

    async fn update_project(&self, id: i32, update: ProjectUpdate) -> DatabaseResult<ProjectInfo> {
        debug!("🔄 更新项目 {} 信息: {:#?}", id, update);

        let mut store = self.store.write().await;
        let existing = store
            .projects
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::project_not_found(id))?;

        if let Some(name) = update.name {
            existing.name = name;
        }
        if let Some(description) = update.description {
            existing.description = Some(description);
        }
        if let Some(status) = update.status {
            existing.status = status;
        }
        if let Some(start_date) = update.start_date {
            existing.start_date = Some(start_date);
        }
        if let Some(end_date) = update.end_date {
            existing.end_date = Some(end_date);
        }
        if let Some(location) = update.location {
            existing.location = Some(location);
        }
        existing.updated_at = Utc::now();

        debug!("✅ 项目更新成功: {:#?}", existing);
        Ok(existing.clone())
    }

    async fn delete_project(&self, id: i32) -> DatabaseResult<ProjectInfo> {
        debug!("🗑️ 删除项目: {}", id);

        let mut store = self.store.write().await;
        store
            .projects
            .remove(&id)
            .ok_or_else(|| DatabaseError::project_not_found(id))
    }
}
