//! Project handlers

use axum::{
    extract::{Extension, Path},
    Json,
};
use axum_extra::extract::WithRejection;

use super::log_handler_error;
use crate::{
    database::ConnectedStore,
    error::{Error, Result},
    models::{
        projects::{CreateProjectRequest, Project, UpdateProjectRequest},
        responses::ApiResponse,
    },
    services::projects,
};

/// GET /api/projects
pub async fn list_projects(
    Extension(store): Extension<ConnectedStore>,
) -> Result<Json<ApiResponse<Vec<Project>>>> {
    let projects = projects::list_projects(&*store)
        .await
        .inspect_err(|e| log_handler_error("list_projects", e))?;

    Ok(Json(ApiResponse::data(projects)))
}

/// POST /api/projects
///
/// `title` and `description` are required; `featured` defaults to false.
pub async fn create_project(
    Extension(store): Extension<ConnectedStore>,
    WithRejection(Json(request), _): WithRejection<Json<CreateProjectRequest>, Error>,
) -> Result<Json<ApiResponse<Project>>> {
    let project = projects::create_project(&*store, request)
        .await
        .inspect_err(|e| log_handler_error("create_project", e))?;

    Ok(Json(ApiResponse::data(project)))
}

/// PUT /api/projects/{id}
pub async fn update_project(
    Extension(store): Extension<ConnectedStore>,
    Path(id): Path<String>,
    WithRejection(Json(request), _): WithRejection<Json<UpdateProjectRequest>, Error>,
) -> Result<Json<ApiResponse<Project>>> {
    let project = projects::update_project(&*store, &id, request)
        .await
        .inspect_err(|e| log_handler_error("update_project", e))?;

    Ok(Json(ApiResponse::data(project)))
}

/// DELETE /api/projects/{id}
pub async fn delete_project(
    Extension(store): Extension<ConnectedStore>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    projects::delete_project(&*store, &id)
        .await
        .inspect_err(|e| log_handler_error("delete_project", e))?;

    Ok(Json(ApiResponse::message("Project has been deleted")))
}
