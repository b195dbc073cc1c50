//! Project Endpoints

use super::{with_query, ApiClient, ApiError, Multipart, RequestOptions};
use chrono::DateTime;

use crate::models::{CreatedProject, Project, ProjectList, ProjectRecord, ProjectRecordList};

pub async fn my_projects(client: &ApiClient, project_type: &str) -> Result<Vec<Project>, ApiError> {
    let path = with_query("/api/my-projects/", "project_type", project_type);
    let list: ProjectList = client.get_json(&path).await?;
    Ok(list.projects)
}

pub async fn list_projects(client: &ApiClient) -> Result<Vec<ProjectRecord>, ApiError> {
    let list: ProjectRecordList = client.get_json("/api/projects/").await?;
    Ok(list.projects)
}

/// Oldest first; records without a parseable `created_at` lead
pub fn sort_by_created(projects: &mut [ProjectRecord]) {
    let key = |p: &ProjectRecord| {
        p.created_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map_or(0, |d| d.timestamp_millis())
    };
    projects.sort_by_key(key);
}

pub async fn create_project(client: &ApiClient, name: &str, description: &str) -> Result<ProjectRecord, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::validation("Name is required"));
    }
    let form = Multipart::new()
        .text("name", name)
        .text_if("description", Some(description.to_string()).filter(|d| !d.is_empty()));
    let created: CreatedProject = client.send_json("/api/create-project/", RequestOptions::post_form(form)).await?;
    Ok(created.project)
}

pub fn find_project<'a>(projects: &'a [ProjectRecord], id: &str) -> Option<&'a ProjectRecord> {
    projects.iter().find(|p| p.id == id)
}

/// Rename a project's display name. An empty description clears it.
pub async fn rename_project(
    client: &ApiClient,
    schema_name: &str,
    display_name: &str,
    description: &str,
) -> Result<(), ApiError> {
    let display_name = display_name.trim();
    if display_name.is_empty() {
        return Err(ApiError::validation("New name cannot be empty"));
    }
    let form = Multipart::new()
        .text("schema_name", schema_name)
        .text("display_name", display_name)
        .text("description", description);
    client.send_ok("/api/rename-project/", RequestOptions::post_form(form)).await
}

pub async fn update_project(
    client: &ApiClient,
    project_id: &str,
    projectname: &str,
    description: &str,
) -> Result<(), ApiError> {
    let projectname = projectname.trim();
    if projectname.is_empty() {
        return Err(ApiError::validation("Project name cannot be empty"));
    }
    let form = Multipart::new()
        .text("project_id", project_id)
        .text("projectname", projectname)
        .text("description", description);
    client.send_ok("/api/update-project/", RequestOptions::post_form(form)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_project_by_id() {
        let projects: Vec<ProjectRecord> =
            serde_json::from_str(r#"[{"id": 1, "projectname": "A"}, {"id": "2", "projectname": "B"}]"#).unwrap();
        assert_eq!(find_project(&projects, "1").map(|p| p.projectname.as_str()), Some("A"));
        assert_eq!(find_project(&projects, "2").map(|p| p.projectname.as_str()), Some("B"));
        assert!(find_project(&projects, "3").is_none());
    }

    #[test]
    fn test_sort_by_created() {
        let mut projects: Vec<ProjectRecord> = serde_json::from_str(
            r#"[
                {"id": 1, "created_at": "2025-02-01T00:00:00Z"},
                {"id": 2, "created_at": "2024-12-31T23:00:00+00:00"},
                {"id": 3}
            ]"#,
        )
        .unwrap();
        sort_by_created(&mut projects);
        let ids: Vec<_> = projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
    }
}
