use mongodb::bson::{self, oid::ObjectId};

use crate::{
    database::{DocumentStore, SortOrder, PROJECTS},
    error::Result,
    models::projects::{NewProject, Project, UpdateProjectRequest},
};

/// Creates a new project in the store.
pub async fn create_project(store: &dyn DocumentStore, new_project: NewProject) -> Result<Project> {
    let document = store.insert(PROJECTS, bson::to_document(&new_project)?).await?;
    Ok(bson::from_document(document)?)
}

/// Lists all projects in store order.
pub async fn list_projects(store: &dyn DocumentStore) -> Result<Vec<Project>> {
    let documents = store.find_all(PROJECTS, SortOrder::Natural).await?;
    let records = documents
        .into_iter()
        .map(bson::from_document)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Overwrites the provided fields. Returns `None` when the project does not exist.
pub async fn update_project(
    store: &dyn DocumentStore,
    id: &ObjectId,
    update: &UpdateProjectRequest,
) -> Result<Option<Project>> {
    let document = store.update_by_id(PROJECTS, id, bson::to_document(update)?).await?;
    Ok(document.map(bson::from_document).transpose()?)
}

/// Deletes a project by its ID. Returns whether it existed.
pub async fn delete_project(store: &dyn DocumentStore, id: &ObjectId) -> Result<bool> {
    store.delete_by_id(PROJECTS, id).await
}
