//! HTTP API Layer
//!
//! This crate provides the REST API for the pokedex catalog using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each catalog resource
//! - **Middleware**: Request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//! - **Seed**: Sample catalog loaded by `pokedex-api seeddata`
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(database, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod seed;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use infra_db::{Database, Session};

use crate::config::ApiConfig;
use crate::handlers::{category, country, health, owner, pokemon, review, reviewer};
use crate::middleware::request_log_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub config: ApiConfig,
}

impl AppState {
    /// Opens a fresh store session for one request
    pub fn session(&self) -> Session {
        self.database.session()
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `database` - Backing catalog store
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(database: Database, config: ApiConfig) -> Router {
    let state = AppState { database, config };

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let category_routes = Router::new()
        .route("/", get(category::list_categories).post(category::create_category))
        .route(
            "/:id",
            get(category::get_category)
                .put(category::update_category)
                .delete(category::delete_category),
        )
        .route("/:id/pokemon", get(category::get_pokemon_by_category));

    let country_routes = Router::new()
        .route("/", get(country::list_countries).post(country::create_country))
        .route(
            "/:id",
            get(country::get_country)
                .put(country::update_country)
                .delete(country::delete_country),
        )
        .route("/:id/owners", get(country::get_owners_from_country));

    let owner_routes = Router::new()
        .route("/", get(owner::list_owners).post(owner::create_owner))
        .route(
            "/:id",
            get(owner::get_owner)
                .put(owner::update_owner)
                .delete(owner::delete_owner),
        )
        .route("/:id/pokemon", get(owner::get_pokemon_by_owner))
        .route("/:id/country", get(owner::get_country_of_owner));

    let pokemon_routes = Router::new()
        .route("/", get(pokemon::list_pokemon).post(pokemon::create_pokemon))
        .route(
            "/:id",
            get(pokemon::get_pokemon)
                .put(pokemon::update_pokemon)
                .delete(pokemon::delete_pokemon),
        )
        .route("/:id/rating", get(pokemon::get_rating))
        .route("/:id/owners", get(pokemon::get_owners_of_pokemon));

    let review_routes = Router::new()
        .route("/", get(review::list_reviews).post(review::create_review))
        .route(
            "/:id",
            get(review::get_review)
                .put(review::update_review)
                .delete(review::delete_review),
        )
        .route("/pokemon/:id", get(review::get_reviews_of_pokemon))
        .route("/reviewer/:id", delete(review::delete_reviews_by_reviewer));

    let reviewer_routes = Router::new()
        .route("/", get(reviewer::list_reviewers).post(reviewer::create_reviewer))
        .route(
            "/:id",
            get(reviewer::get_reviewer)
                .put(reviewer::update_reviewer)
                .delete(reviewer::delete_reviewer),
        )
        .route("/:id/reviews", get(reviewer::get_reviews_by_reviewer));

    let api_routes = Router::new()
        .nest("/categories", category_routes)
        .nest("/countries", country_routes)
        .nest("/owners", owner_routes)
        .nest("/pokemon", pokemon_routes)
        .nest("/reviews", review_routes)
        .nest("/reviewers", reviewer_routes)
        .layer(axum_middleware::from_fn(request_log_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}
