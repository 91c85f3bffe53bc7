use crate::domain::Project;

/// Body of `GET /`.
pub const LIVENESS_MESSAGE: &str = "API is running";

/// Body of `GET /api/projects` as the client reads it: the whole catalogue,
/// unfiltered.
pub type ProjectsResponse = Vec<Project>;

pub fn root_route() -> &'static str {
    "/"
}

pub fn projects_route() -> &'static str {
    "/api/projects"
}
