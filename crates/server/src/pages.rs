//! # Page Routes
//!
//! The rendered café page plus the crawler documents.

use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use cafe_core::page::render_page;
use cafe_core::site::{robots_txt, sitemap_xml};
use chrono::Utc;

use crate::api::projects::MenuQuery;
use crate::state::SharedState;

pub fn page_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(index))
        .route("/robots.txt", get(robots))
        .route("/sitemap.xml", get(sitemap))
}

async fn index(State(state): State<SharedState>, Query(params): Query<MenuQuery>) -> Html<String> {
    let filter = params.filter_state();
    Html(render_page(&state.page_context(), &filter))
}

async fn robots(State(state): State<SharedState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        robots_txt(&state.config.base_url),
    )
}

async fn sitemap(State(state): State<SharedState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/xml")],
        sitemap_xml(&state.config.base_url, Utc::now()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{tests::static_dir_with, SiteAssets};
    use crate::state::AppState;
    use axum::http::StatusCode;
    use cafe_core::{Catalog, SiteConfig};

    fn test_state() -> SharedState {
        AppState::for_tests()
    }

    #[tokio::test]
    async fn test_index_applies_query() {
        let params = MenuQuery {
            q: Some("forecast".to_string()),
            ..Default::default()
        };
        let Html(html) = index(State(test_state()), Query(params)).await;
        assert!(html.contains("id=\"taxi-sp25\""));
        assert!(!html.contains("id=\"blockchain-explorer\""));
    }

    #[tokio::test]
    async fn test_present_images_render_normally() {
        let dir = static_dir_with("page", &["hero.jpeg", "cafe/matcha.jpeg"]).await;
        let assets = SiteAssets::scan(&dir).await.unwrap();
        let state = AppState::new(SiteConfig::default(), Catalog::builtin(), assets);

        let Html(html) = index(State(state), Query(MenuQuery::default())).await;
        assert!(html.contains("class=\"polaroid-img\" src=\"/cafe/matcha.jpeg\""));
        assert!(html.contains("class=\"polaroid-img is-fallback\" src=\"/cafe/chai.jpeg\""));
        assert_eq!(html.matches("polaroid-img is-fallback").count(), 5);
        assert!(html.contains("src=\"/hero.jpeg\""));
        assert!(!html.contains("/about-side.png"));

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_robots_and_sitemap() {
        let response = robots(State(test_state())).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );

        let response = sitemap(State(test_state())).await.into_response();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/xml"
        );
    }
}
