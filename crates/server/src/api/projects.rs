//! # Menu API
//!
//! JSON view of the catalog and the filter engine. Query parameters match
//! the page: `q`, `category`, `flavor`.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use cafe_core::filter::{apply, FilterState};
use cafe_core::quick_jump::jump_target;
use cafe_core::{Flavor, ProjectRecord};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::state::SharedState;

/// Filter parameters shared by the page and the API
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MenuQuery {
    /// Free-text search over name, description, technologies and badges
    pub q: Option<String>,
    /// `All` or a category label
    pub category: Option<String>,
    /// `All` or a flavor key
    pub flavor: Option<String>,
}

impl MenuQuery {
    pub fn filter_state(&self) -> FilterState {
        FilterState::from_params(
            self.q.as_deref(),
            self.category.as_deref(),
            self.flavor.as_deref(),
        )
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LinksResponse {
    primary: String,
    writeup: Option<String>,
    demo: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    id: String,
    flavor_key: String,
    name: String,
    category: String,
    description: String,
    technologies: Vec<String>,
    badges: Vec<String>,
    impact: String,
    links: LinksResponse,
    long_description: Option<String>,
    image: Option<String>,
}

impl From<&ProjectRecord> for ProjectResponse {
    fn from(p: &ProjectRecord) -> Self {
        Self {
            id: p.id.clone(),
            flavor_key: p.flavor_key.key().to_string(),
            name: p.name.clone(),
            category: p.category.label().to_string(),
            description: p.description.clone(),
            technologies: p.technologies.clone(),
            badges: p.badges.clone(),
            impact: p.impact.clone(),
            links: LinksResponse {
                primary: p.links.primary.clone(),
                writeup: p.links.writeup.clone(),
                demo: p.links.demo.clone(),
            },
            long_description: p.long_description.clone(),
            image: p.image_ref().map(str::to_string),
        }
    }
}

/// The filter as the server understood it
#[derive(Debug, Serialize, ToSchema)]
pub struct AppliedFilter {
    query: String,
    category: String,
    flavor: String,
}

impl From<&FilterState> for AppliedFilter {
    fn from(state: &FilterState) -> Self {
        Self {
            query: state.query.clone(),
            category: state.active_category.to_string(),
            flavor: state.active_flavor.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectListResponse {
    filter: AppliedFilter,
    total: usize,
    projects: Vec<ProjectResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoriesResponse {
    tabs: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FlavorInfo {
    key: String,
    label: String,
    emoji: String,
    stroke: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FlavorsResponse {
    default: String,
    flavors: Vec<FlavorInfo>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JumpResponse {
    flavor: String,
    /// Card id to scroll to; null when no displayed card has the flavor
    id: Option<String>,
    anchor: Option<String>,
}

pub fn project_routes() -> Router<SharedState> {
    Router::new()
        .route("/projects", get(list_projects))
        .route("/projects/:id", get(get_project))
        .route("/categories", get(list_categories))
        .route("/flavors", get(list_flavors))
        .route("/jump/:flavor", get(jump_to_flavor))
}

/// List the visible projects for a filter
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    tag = "menu",
    params(MenuQuery),
    responses(
        (status = 200, description = "Visible projects in catalog order", body = ProjectListResponse)
    )
)]
pub async fn list_projects(
    State(state): State<SharedState>,
    Query(params): Query<MenuQuery>,
) -> Json<ProjectListResponse> {
    let filter = params.filter_state();
    let visible = apply(state.catalog.projects(), &filter);

    Json(ProjectListResponse {
        filter: AppliedFilter::from(&filter),
        total: state.catalog.len(),
        projects: visible.into_iter().map(ProjectResponse::from).collect(),
    })
}

/// Get a single project
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}",
    tag = "menu",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "The project", body = ProjectResponse),
        (status = 404, description = "No project with that id")
    )
)]
pub async fn get_project(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>, AppError> {
    state
        .catalog
        .get(&id)
        .map(|p| Json(ProjectResponse::from(p)))
        .ok_or(AppError::ProjectNotFound(id))
}

/// Category tabs, "All" first
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "menu",
    responses(
        (status = 200, description = "Category tab labels", body = CategoriesResponse)
    )
)]
pub async fn list_categories(State(state): State<SharedState>) -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        tabs: state.catalog.category_tabs(),
    })
}

/// The flavor menu
#[utoipa::path(
    get,
    path = "/api/v1/flavors",
    tag = "menu",
    responses(
        (status = 200, description = "Flavors in menu order", body = FlavorsResponse)
    )
)]
pub async fn list_flavors() -> Json<FlavorsResponse> {
    Json(FlavorsResponse {
        default: Flavor::default().key().to_string(),
        flavors: Flavor::all()
            .into_iter()
            .map(|f| FlavorInfo {
                key: f.key().to_string(),
                label: f.label().to_string(),
                emoji: f.emoji().to_string(),
                stroke: f.stroke().to_string(),
            })
            .collect(),
    })
}

/// First displayed card for a flavor
#[utoipa::path(
    get,
    path = "/api/v1/jump/{flavor}",
    tag = "menu",
    params(
        ("flavor" = String, Path, description = "Flavor key"),
        MenuQuery
    ),
    responses(
        (status = 200, description = "Jump target, or nulls when nothing matches", body = JumpResponse),
        (status = 404, description = "Unknown flavor key")
    )
)]
pub async fn jump_to_flavor(
    State(state): State<SharedState>,
    Path(flavor): Path<String>,
    Query(params): Query<MenuQuery>,
) -> Result<Json<JumpResponse>, AppError> {
    let flavor: Flavor = flavor
        .parse()
        .map_err(|_| AppError::UnknownFlavor(flavor.clone()))?;

    let filter = params.filter_state();
    let visible = apply(state.catalog.projects(), &filter);
    let target = jump_target(&visible, flavor);

    Ok(Json(JumpResponse {
        flavor: flavor.key().to_string(),
        id: target.as_ref().map(|t| t.id.clone()),
        anchor: target.map(|t| t.anchor),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    fn test_state() -> SharedState {
        AppState::for_tests()
    }

    fn query(q: Option<&str>, category: Option<&str>, flavor: Option<&str>) -> MenuQuery {
        MenuQuery {
            q: q.map(str::to_string),
            category: category.map(str::to_string),
            flavor: flavor.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_list_all_projects() {
        let Json(body) = list_projects(State(test_state()), Query(MenuQuery::default())).await;
        assert_eq!(body.total, 7);
        assert_eq!(body.projects.len(), 7);
        assert_eq!(body.filter.category, "All");
    }

    #[tokio::test]
    async fn test_list_projects_by_category() {
        let Json(body) =
            list_projects(State(test_state()), Query(query(None, Some("Pipelines"), None))).await;
        let ids: Vec<&str> = body.projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["citybike-full", "taxi-sp25"]);
        assert_eq!(body.filter.category, "Pipelines");
    }

    #[tokio::test]
    async fn test_unknown_filter_values_mean_all() {
        let Json(body) =
            list_projects(State(test_state()), Query(query(None, Some("Baking"), Some("mocha"))))
                .await;
        assert_eq!(body.projects.len(), 7);
        assert_eq!(body.filter.flavor, "All");
    }

    #[tokio::test]
    async fn test_get_project() {
        let Json(project) = get_project(State(test_state()), Path("landmine-r".to_string()))
            .await
            .unwrap();
        assert_eq!(project.flavor_key, "taro");
        assert_eq!(project.category, "Research");

        let missing = get_project(State(test_state()), Path("nope".to_string())).await;
        assert!(matches!(missing, Err(AppError::ProjectNotFound(id)) if id == "nope"));
    }

    #[tokio::test]
    async fn test_categories_and_flavors() {
        let Json(categories) = list_categories(State(test_state())).await;
        assert_eq!(categories.tabs.first().map(String::as_str), Some("All"));
        assert_eq!(categories.tabs.len(), 6);

        let Json(flavors) = list_flavors().await;
        assert_eq!(flavors.flavors.len(), 6);
        assert_eq!(flavors.default, "taro");
    }

    #[tokio::test]
    async fn test_jump_to_flavor() {
        let Json(jump) = jump_to_flavor(
            State(test_state()),
            Path("latte".to_string()),
            Query(MenuQuery::default()),
        )
        .await
        .unwrap();
        assert_eq!(jump.id.as_deref(), Some("serverless-etl"));
        assert_eq!(jump.anchor.as_deref(), Some("#serverless-etl"));
    }

    #[tokio::test]
    async fn test_jump_without_visible_card_is_noop() {
        let Json(jump) = jump_to_flavor(
            State(test_state()),
            Path("latte".to_string()),
            Query(query(None, Some("Markets"), None)),
        )
        .await
        .unwrap();
        assert!(jump.id.is_none());
        assert!(jump.anchor.is_none());
    }

    #[tokio::test]
    async fn test_jump_with_unknown_flavor() {
        let result = jump_to_flavor(
            State(test_state()),
            Path("mocha".to_string()),
            Query(MenuQuery::default()),
        )
        .await;
        assert!(matches!(result, Err(AppError::UnknownFlavor(_))));
    }
}
