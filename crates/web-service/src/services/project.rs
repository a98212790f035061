//! 项目服务
//!
//! 提供项目相关的业务逻辑操作

use crate::services::traits::ProjectServiceTrait;
use database::{
    DatabaseResult, ProjectCreate, ProjectFilter, ProjectInfo, ProjectRepositoryTrait, ProjectSearchResult, ProjectUpdate,
};
use tracing::info;

#[derive(Debug, Clone)]
pub struct ProjectService<PR: ProjectRepositoryTrait> {
    project_repository: PR,
}

impl<PR: ProjectRepositoryTrait> ProjectService<PR> {
    pub fn new(project_repository: PR) -> Self {
        Self { project_repository }
    }
}

#[async_trait::async_trait]
impl<PR: ProjectRepositoryTrait> ProjectServiceTrait for ProjectService<PR> {
    async fn find_projects(&self, filter: ProjectFilter, page_size: i64, offset: i64) -> DatabaseResult<ProjectSearchResult> {
        self.project_repository.find_projects(filter, page_size, offset).await
    }

    async fn create_project(&self, project: ProjectCreate) -> DatabaseResult<ProjectInfo> {
        let project = self.project_repository.create_project(project).await?;
        info!("📝 项目已创建: id={}, name={}", project.id, project.name);
        Ok(project)
    }

    async fn get_project_by_id(&self, id: i32) -> DatabaseResult<ProjectInfo> {
        self.project_repository.get_project_by_id(id).await
    }

    async fn replace_project(&self, id: i32, project: ProjectCreate) -> DatabaseResult<ProjectInfo> {
        let project = self.project_repository.replace_project(id, project).await?;
        info!("🔄 项目已替换: id={}", project.id);
        Ok(project)
    }

    async fn update_project(&self, id: i32, update: ProjectUpdate) -> DatabaseResult<ProjectInfo> {
        let project = self.project_repository.update_project(id, update).await?;
        info!("🔄 项目已更新: id={}", project.id);
        Ok(project)
    }

    async fn delete_project(&self, id: i32) -> DatabaseResult<ProjectInfo> {
        let project = self.project_repository.delete_project(id).await?;
        info!("🗑️ 项目已删除: id={}, name={}", project.id, project.name);
        Ok(project)
    }
}
