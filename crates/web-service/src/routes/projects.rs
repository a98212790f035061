//! 项目相关接口
//!

use crate::models::common::{ErrorReply, ReplyList};
use crate::models::err::AppError;
use crate::models::extract::{AppJson, AppPath, AppQuery};
use crate::models::projects::{ProjectInfo, ProjectListQuery, ProjectPatch, ProjectPayload};
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use database::ProjectFilter;
use tracing::debug;
use validator::Validate;

/// 根据查询参数搜索项目
///
/// 根据查询参数搜索符合要求的项目列表，支持分页.
///
/// 查询参数由 [`ProjectListQuery`] 决定，所有参数都是可选参数。
///
/// ## 返回值
///
/// 返回值的类型是 [`Result<Json<ReplyList<ProjectInfo>>, AppError>`]：
///
/// 1. [`Json`] 会对内部类型进行json序列化，保证返回的数据是一个合法的json字符串
/// 2. [`ReplyList`] 是我们封装的一个类型，表明结果是一个通用的`api-json`格式列表对象
/// 3. [`AppError`] 是错误时返回的Error类型，会根据错误类型转换为对应的http状态码
#[utoipa::path(get,
    path = "/projects",
    tag = "projects",
    params(ProjectListQuery),
    responses(
        (status = 200, description = "Search results", body = ReplyList<ProjectInfo>),
        (status = 400, description = "Invalid query", body = ErrorReply)
    ),
)]
pub async fn list_projects(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ProjectListQuery>,
) -> Result<Json<ReplyList<ProjectInfo>>, AppError> {
    debug!("🔍 搜索项目 {:#?}", query);

    // 验证输入参数，确保有效性
    query.validate()?;

    // 验证通过后page_index>=1，saturating_sub只是为了避免溢出
    let offset = i64::from(query.page_index.saturating_sub(1)) * i64::from(query.page_size);

    let filter = ProjectFilter {
        name: query.name,
        status: query.status,
    };
    let result = state
        .project_service
        .find_projects(filter, i64::from(query.page_size), offset)
        .await?;

    Ok(Json(ReplyList {
        total: result.total,
        data: result.projects.into_iter().map(Into::into).collect(),
        page_size: query.page_size,
        page_index: query.page_index,
    }))
}

/// 创建项目
///
/// 根据用户输入参数创建项目信息，返回的数据包含新分配的 `id`
#[utoipa::path(post,
    path = "/projects",
    tag = "projects",
    request_body = ProjectPayload,
    responses(
        (status = 201, description = "Project created", body = ProjectInfo),
        (status = 400, description = "Invalid project data", body = ErrorReply)
    )
)]
pub async fn create_project(
    State(state): State<AppState>,
    AppJson(project): AppJson<ProjectPayload>,
) -> Result<(StatusCode, Json<ProjectInfo>), AppError> {
    debug!("Creating project {:#?}", project);

    project.validate()?;

    let project = state.project_service.create_project(project.into()).await?;

    Ok((StatusCode::CREATED, Json(project.into())))
}

/// 查询指定项目信息
#[utoipa::path(get,
    path = "/projects/{id}",
    tag = "projects",
    params(("id" = i32, Path, description = "项目ID")),
    responses(
        (status = 200, description = "Project found", body = ProjectInfo),
        (status = 404, description = "Project not found", body = ErrorReply)
    )
)]
pub async fn get_project(
    State(state): State<AppState>,
    AppPath(project_id): AppPath<i32>,
) -> Result<Json<ProjectInfo>, AppError> {
    debug!("Getting project id {:#?}", project_id);

    let project = state.project_service.get_project_by_id(project_id).await?;

    Ok(Json(project.into()))
}

/// 整体替换项目信息
///
/// 用 [`ProjectPayload`] 覆盖项目的所有字段，请求中没有的可选字段会被清空。
#[utoipa::path(put,
    path = "/projects/{id}",
    tag = "projects",
    params(("id" = i32, Path, description = "项目ID")),
    request_body = ProjectPayload,
    responses(
        (status = 200, description = "Project replaced", body = ProjectInfo),
        (status = 400, description = "Invalid project data", body = ErrorReply),
        (status = 404, description = "Project not found", body = ErrorReply)
    )
)]
pub async fn replace_project(
    State(state): State<AppState>,
    AppPath(project_id): AppPath<i32>,
    AppJson(project): AppJson<ProjectPayload>,
) -> Result<Json<ProjectInfo>, AppError> {
    debug!("Replacing project {} with {:#?}", project_id, project);

    project.validate()?;

    let project = state.project_service.replace_project(project_id, project.into()).await?;

    Ok(Json(project.into()))
}

/// 更新项目信息
///
/// 根据用户指定的 `id` 和 修改信息 [`ProjectPatch`] 来更新项目信息，未提交的字段保持不变。
#[utoipa::path(patch,
    path = "/projects/{id}",
    tag = "projects",
    params(("id" = i32, Path, description = "项目ID")),
    request_body = ProjectPatch,
    responses(
        (status = 200, description = "Project updated", body = ProjectInfo),
        (status = 400, description = "Invalid project data", body = ErrorReply),
        (status = 404, description = "Project not found", body = ErrorReply)
    )
)]
pub async fn update_project(
    State(state): State<AppState>,
    AppPath(project_id): AppPath<i32>,
    AppJson(info): AppJson<ProjectPatch>,
) -> Result<Json<ProjectInfo>, AppError> {
    debug!("Updating project {} with {:#?}", project_id, info);

    info.validate()?;

    let project = state.project_service.update_project(project_id, info.into()).await?;

    Ok(Json(project.into()))
}

/// 删除指定的项目
#[utoipa::path(delete,
    path = "/projects/{id}",
    tag = "projects",
    params(("id" = i32, Path, description = "项目ID")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 404, description = "Project not found", body = ErrorReply)
    )
)]
pub async fn delete_project(
    State(state): State<AppState>,
    AppPath(project_id): AppPath<i32>,
) -> Result<StatusCode, AppError> {
    debug!("delete project {:#?}", project_id);

    state.project_service.delete_project(project_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
