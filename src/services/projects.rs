use crate::{
    database::DocumentStore,
    error::{Error, Result},
    models::projects::{CreateProjectRequest, NewProject, Project, UpdateProjectRequest},
    queries::projects,
    validation::{parse_object_id, reject_blank, require_fields},
};

const NOT_FOUND: &str = "Project not found";

/// Lists all projects
pub async fn list_projects(store: &dyn DocumentStore) -> Result<Vec<Project>> {
    projects::list_projects(store).await
}

/// Creates a project. `title` and `description` are required.
pub async fn create_project(store: &dyn DocumentStore, request: CreateProjectRequest) -> Result<Project> {
    require_fields(&[("title", &request.title), ("description", &request.description)])?;

    let new_project = NewProject {
        title: request.title.unwrap_or_default().trim().to_string(),
        description: request.description.unwrap_or_default().trim().to_string(),
        technologies: request.technologies.unwrap_or_default(),
        image_url: request.image_url,
        github_link: request.github_link,
        live_link: request.live_link,
        featured: request.featured.unwrap_or(false),
    };

    let project = projects::create_project(store, new_project).await?;

    tracing::info!(project_id = %project.id, title = %project.title, "Project created");
    Ok(project)
}

/// Overwrites the allow-listed fields of a project.
pub async fn update_project(
    store: &dyn DocumentStore,
    id: &str,
    request: UpdateProjectRequest,
) -> Result<Project> {
    let project_id = parse_object_id(id, NOT_FOUND)?;

    reject_blank("title", &request.title)?;
    reject_blank("description", &request.description)?;

    let project = projects::update_project(store, &project_id, &request)
        .await?
        .ok_or_else(|| Error::NotFound(NOT_FOUND.to_string()))?;

    tracing::info!(project_id = %project.id, "Project updated");
    Ok(project)
}

/// Deletes a project. Unknown ids are `NotFound`.
pub async fn delete_project(store: &dyn DocumentStore, id: &str) -> Result<()> {
    let project_id = parse_object_id(id, NOT_FOUND)?;

    if !projects::delete_project(store, &project_id).await? {
        return Err(Error::NotFound(NOT_FOUND.to_string()));
    }

    tracing::info!(project_id = %project_id, "Project deleted");
    Ok(())
}
