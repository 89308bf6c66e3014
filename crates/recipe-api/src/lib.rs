//! recipe-api
//!
//! HTTP surface of the recipe store. The router is built here so the binary
//! and the integration tests serve the same application.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod translate;

use axum::middleware as axum_mw;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/kinds", get(routes::kinds::list_kinds))
        .route(
            "/recipes",
            get(routes::recipes::list_recipes).delete(routes::recipes::delete_all_recipes),
        )
        .route("/recipe", post(routes::recipes::create_recipe))
        .route(
            "/recipe/{id}",
            get(routes::recipes::get_recipe)
                .put(routes::recipes::update_recipe)
                .delete(routes::recipes::delete_recipe),
        )
        .route(
            "/{kind}",
            get(routes::recipes::list_recipes_of_kind).post(routes::recipes::create_recipe_of_kind),
        )
        .route("/{kind}/{id}", put(routes::recipes::update_recipe_of_kind))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
