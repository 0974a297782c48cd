//! # API v1
//!
//! Versioned JSON routes and their OpenAPI description.

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::error::AppError;
use crate::state::SharedState;

pub mod projects;

use projects::{
    AppliedFilter, CategoriesResponse, FlavorInfo, FlavorsResponse, JumpResponse, LinksResponse,
    ProjectListResponse, ProjectResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Café Menu API",
        version = "1.0.0",
        description = "Read-only access to the portfolio catalog and its filter engine"
    ),
    paths(
        projects::list_projects,
        projects::get_project,
        projects::list_categories,
        projects::list_flavors,
        projects::jump_to_flavor
    ),
    components(
        schemas(
            AppliedFilter,
            CategoriesResponse,
            FlavorInfo,
            FlavorsResponse,
            JumpResponse,
            LinksResponse,
            ProjectListResponse,
            ProjectResponse
        )
    ),
    tags(
        (name = "menu", description = "Projects, categories and flavors")
    )
)]
pub struct ApiDoc;

pub fn api_routes() -> Router<SharedState> {
    projects::project_routes().route("/openapi.json", get(serve_openapi))
}

async fn serve_openapi() -> Result<Json<serde_json::Value>, AppError> {
    let spec = serde_json::to_value(ApiDoc::openapi()).map_err(anyhow::Error::from)?;
    Ok(Json(spec))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_openapi_lists_menu_paths() {
        let Json(spec) = serve_openapi().await.unwrap();
        let paths = spec["paths"].as_object().unwrap();
        assert!(paths.contains_key("/api/v1/projects"));
        assert!(paths.contains_key("/api/v1/projects/{id}"));
        assert!(paths.contains_key("/api/v1/jump/{flavor}"));
    }
}
