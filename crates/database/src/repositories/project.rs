//! 项目仓库
//!
//! 负责项目相关的数据库操作

use crate::models::project::{ProjectCreate, ProjectFilter, ProjectInfo, ProjectSearchResult, ProjectUpdate};
use crate::repositories::traits::ProjectRepositoryTrait;
use crate::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::debug;

/// 查询返回的列，和 [`ProjectInfo`] 的字段一一对应
const PROJECT_COLUMNS: &str = "id, name, description, status, start_date, end_date, location, created_at, updated_at";

/// 搜索结果中的一行：项目信息 + 窗口函数计算的总数
#[derive(Debug, sqlx::FromRow)]
struct ProjectSearchRow {
    #[sqlx(flatten)]
    project: ProjectInfo,
    total_count: i64,
}

/// 转义 `LIKE` 模式中的通配符，使用户输入只做字面匹配
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 项目仓库结构体
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// 创建新的项目仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count_projects(&self, name_pattern: Option<&str>, status: Option<&str>) -> DatabaseResult<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM projects
            WHERE ($1::TEXT IS NULL OR name ILIKE $1)
              AND ($2::TEXT IS NULL OR status = $2)
            "#,
        )
        .bind(name_pattern)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }
}

#[async_trait::async_trait]
impl ProjectRepositoryTrait for ProjectRepository {
    /// 根据查询参数搜索项目
    ///
    /// # SQL 查询说明
    ///
    /// 使用 CTE（Common Table Expression）在一次查询中完成过滤、计数和分页：
    /// 1. `COUNT(*) OVER ()` 窗口函数在 `LIMIT` 之前计算，得到过滤后的总记录数
    /// 2. 未设置的搜索条件通过 `$n::TEXT IS NULL` 跳过
    /// 3. 名称使用 `ILIKE` 忽略大小写模糊匹配
    ///
    /// 如果偏移量超出结果范围，窗口函数没有行可以返回总数，这时单独再查一次总数。
    async fn find_projects(&self, filter: ProjectFilter, page_size: i64, offset: i64) -> DatabaseResult<ProjectSearchResult> {
        debug!(
            "🔍 搜索项目 - 条件: {:?}, 页面大小: {}, 偏移量: {}",
            filter, page_size, offset
        );

        let name_pattern = filter.name.as_deref().map(|n| format!("%{}%", escape_like(n)));

        let rows = sqlx::query_as::<_, ProjectSearchRow>(
            r#"
            WITH filtered_projects AS (
                SELECT id, name, description, status, start_date, end_date, location,
                       created_at, updated_at,
                       COUNT(*) OVER () AS total_count
                FROM projects
                WHERE ($1::TEXT IS NULL OR name ILIKE $1)
                  AND ($2::TEXT IS NULL OR status = $2)
                ORDER BY id
                LIMIT $3 OFFSET $4
            )
            SELECT * FROM filtered_projects
            ORDER BY id;
            "#,
        )
        .bind(name_pattern.as_deref())
        .bind(filter.status.as_deref())
        .bind(page_size)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = match rows.first() {
            Some(row) => row.total_count,
            None if offset > 0 => self.count_projects(name_pattern.as_deref(), filter.status.as_deref()).await?,
            None => 0,
        };

        let projects: Vec<ProjectInfo> = rows.into_iter().map(|r| r.project).collect();

        debug!("✅ 搜索完成 - 找到 {} 个项目，总计 {} 个", projects.len(), total);

        Ok(ProjectSearchResult {
            projects,
            total: u32::try_from(total).unwrap_or(u32::MAX),
        })
    }

    async fn create_project(&self, project: ProjectCreate) -> DatabaseResult<ProjectInfo> {
        debug!("📝 创建项目: {:#?}", project);

        let sql = format!(
            r#"
            INSERT INTO projects (name, description, status, start_date, end_date, location, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, now(), now())
            RETURNING {PROJECT_COLUMNS};
            "#
        );
        let project_info = sqlx::query_as::<_, ProjectInfo>(&sql)
            .bind(project.name)
            .bind(project.description)
            .bind(project.status)
            .bind(project.start_date)
            .bind(project.end_date)
            .bind(project.location)
            .fetch_one(&self.pool)
            .await?;

        debug!("✅ 项目创建成功: {:#?}", project_info);
        Ok(project_info)
    }

    async fn get_project_by_id(&self, id: i32) -> DatabaseResult<ProjectInfo> {
        debug!("🔍 根据 ID 获取项目: {}", id);

        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1 LIMIT 1");
        let project = sqlx::query_as::<_, ProjectInfo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::project_not_found(id))?;

        debug!("✅ 项目获取成功: {:#?}", project);
        Ok(project)
    }

    /// 整体替换项目信息
    ///
    /// 和 [`update_project`](Self::update_project) 不同，这里不使用 `coalesce`，
    /// 请求中缺失的可选字段会被置为 `NULL`。
    async fn replace_project(&self, id: i32, project: ProjectCreate) -> DatabaseResult<ProjectInfo> {
        debug!("🔄 替换项目 {} 信息: {:#?}", id, project);

        let sql = format!(
            r#"
            UPDATE projects
            SET name = $2,
                description = $3,
                status = $4,
                start_date = $5,
                end_date = $6,
                location = $7,
                updated_at = now()
            WHERE id = $1
            RETURNING {PROJECT_COLUMNS};
            "#
        );
        let project = sqlx::query_as::<_, ProjectInfo>(&sql)
            .bind(id)
            .bind(project.name)
            .bind(project.description)
            .bind(project.status)
            .bind(project.start_date)
            .bind(project.end_date)
            .bind(project.location)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::project_not_found(id))?;

        debug!("✅ 项目替换成功: {:#?}", project);
        Ok(project)
    }

    /// 更新项目信息
    ///
    /// ## SQL
    ///
    /// 由于更新数据中的字段都是[`Option`]，因此我们使用了`postgresql`中的`coalesce`函数，如果用户输入的值
    /// 为None，那么会被转换为数据库的null，最终被转换为之前值。
    async fn update_project(&self, id: i32, update: ProjectUpdate) -> DatabaseResult<ProjectInfo> {
        debug!("🔄 更新项目 {} 信息: {:#?}", id, update);

        let sql = format!(
            r#"
            UPDATE projects
            SET name = coalesce($2, name),
                description = coalesce($3, description),
                status = coalesce($4, status),
                start_date = coalesce($5, start_date),
                end_date = coalesce($6, end_date),
                location = coalesce($7, location),
                updated_at = now()
            WHERE id = $1
            RETURNING {PROJECT_COLUMNS};
            "#
        );
        let project = sqlx::query_as::<_, ProjectInfo>(&sql)
            .bind(id)
            .bind(update.name)
            .bind(update.description)
            .bind(update.status)
            .bind(update.start_date)
            .bind(update.end_date)
            .bind(update.location)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::project_not_found(id))?;

        debug!("✅ 项目更新成功: {:#?}", project);
        Ok(project)
    }

    async fn delete_project(&self, id: i32) -> DatabaseResult<ProjectInfo> {
        debug!("🗑️ 删除项目: {}", id);

        let sql = format!("DELETE FROM projects WHERE id = $1 RETURNING {PROJECT_COLUMNS};");
        let project = sqlx::query_as::<_, ProjectInfo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::project_not_found(id))?;

        debug!("✅ 项目删除成功: {:#?}", project);
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%_done"), "50\\%\\_done");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }

    fn full_project(name: &str, status: &str) -> ProjectCreate {
        ProjectCreate {
            name: name.to_string(),
            description: Some("Test project description".to_string()),
            status: status.to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 31),
            location: Some("City".to_string()),
        }
    }

    // 以下测试需要可用的 PostgreSQL，运行方式：
    // DATABASE_URL=postgres://... cargo test -p database -- --ignored

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore]
    async fn test_pg_create_and_get(pool: PgPool) {
        let repo = ProjectRepository::new(pool);

        let created = repo.create_project(full_project("Tower", "planned")).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.start_date, NaiveDate::from_ymd_opt(2024, 3, 1));

        let fetched = repo.get_project_by_id(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore]
    async fn test_pg_replace_clears_optional_fields(pool: PgPool) {
        let repo = ProjectRepository::new(pool);
        let created = repo.create_project(full_project("Tower", "planned")).await.unwrap();

        let replacement = ProjectCreate {
            name: "Renamed".to_string(),
            description: None,
            status: "active".to_string(),
            start_date: None,
            end_date: None,
            location: None,
        };
        let replaced = repo.replace_project(created.id, replacement).await.unwrap();

        assert_eq!(replaced.id, created.id);
        assert_eq!(replaced.name, "Renamed");
        assert_eq!(replaced.status, "active");
        assert!(replaced.description.is_none());
        assert!(replaced.start_date.is_none());
        assert!(replaced.end_date.is_none());
        assert!(replaced.location.is_none());
        assert_eq!(replaced.created_at, created.created_at);
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore]
    async fn test_pg_update_keeps_missing_fields(pool: PgPool) {
        let repo = ProjectRepository::new(pool);
        let created = repo.create_project(full_project("Tower", "planned")).await.unwrap();

        let update = ProjectUpdate {
            status: Some("active".to_string()),
            ..Default::default()
        };
        let updated = repo.update_project(created.id, update).await.unwrap();

        assert_eq!(updated.status, "active");
        assert_eq!(updated.name, "Tower");
        assert_eq!(updated.location, created.location);
        assert_eq!(updated.end_date, created.end_date);
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore]
    async fn test_pg_find_projects(pool: PgPool) {
        let repo = ProjectRepository::new(pool);
        repo.create_project(full_project("Active Tower", "active")).await.unwrap();
        repo.create_project(full_project("Planned Mall", "planning")).await.unwrap();
        repo.create_project(full_project("Active Annex", "active")).await.unwrap();
        repo.create_project(full_project("100%_Pure", "planning")).await.unwrap();

        let filter = ProjectFilter {
            status: Some("active".to_string()),
            ..Default::default()
        };
        let result = repo.find_projects(filter.clone(), 1, 0).await.unwrap();
        assert_eq!(result.total, 2);
        assert_eq!(result.projects.len(), 1);
        // flatten 后的行保留所有项目字段
        assert_eq!(result.projects[0].name, "Active Tower");
        assert_eq!(result.projects[0].location.as_deref(), Some("City"));

        let result = repo.find_projects(filter.clone(), 1, 1).await.unwrap();
        assert_eq!(result.total, 2);
        assert_eq!(result.projects[0].name, "Active Annex");

        // 偏移量超出范围时，总数由单独的计数查询得到
        let result = repo.find_projects(filter, 10, 10).await.unwrap();
        assert_eq!(result.total, 2);
        assert!(result.projects.is_empty());

        let by_name = ProjectFilter {
            name: Some("MALL".to_string()),
            ..Default::default()
        };
        let result = repo.find_projects(by_name, 20, 0).await.unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.projects[0].name, "Planned Mall");

        // 通配符按字面匹配
        let wildcard = ProjectFilter {
            name: Some("%_".to_string()),
            ..Default::default()
        };
        let result = repo.find_projects(wildcard, 20, 0).await.unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.projects[0].name, "100%_Pure");

        let none = ProjectFilter {
            status: Some("archived".to_string()),
            ..Default::default()
        };
        let result = repo.find_projects(none, 20, 0).await.unwrap();
        assert_eq!(result.total, 0);
        assert!(result.projects.is_empty());
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore]
    async fn test_pg_missing_project(pool: PgPool) {
        let repo = ProjectRepository::new(pool);
        let created = repo.create_project(full_project("Tower", "planned")).await.unwrap();

        let deleted = repo.delete_project(created.id).await.unwrap();
        assert_eq!(deleted.id, created.id);

        assert!(matches!(repo.get_project_by_id(created.id).await, Err(DatabaseError::NotFound(_))));
        assert!(matches!(repo.delete_project(created.id).await, Err(DatabaseError::NotFound(_))));
        assert!(matches!(
            repo.replace_project(created.id, full_project("Again", "planned")).await,
            Err(DatabaseError::NotFound(_))
        ));
        assert!(matches!(
            repo.update_project(created.id, ProjectUpdate::default()).await,
            Err(DatabaseError::NotFound(_))
        ));

        // id 不会被复用
        let next = repo.create_project(full_project("Next", "planned")).await.unwrap();
        assert!(next.id > created.id);
    }
}
