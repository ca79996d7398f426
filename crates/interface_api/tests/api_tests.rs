//! HTTP tests for the catalog API
//!
//! Every test serves the router over a freshly seeded in-memory database:
//! one country (Kanto), owner Jack London, category Electric, reviewer Teddy
//! Smith and Pikachu linked to Jack and Electric.

use axum::http::StatusCode;
use axum_test::TestServer;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use infra_db::{Database, ReviewRepository};
use interface_api::config::{ApiConfig, StoreBackend};
use interface_api::create_router;
use interface_api::dto::owner::OwnerResponse;
use interface_api::dto::pokemon::{PokemonResponse, RatingResponse};
use interface_api::dto::review::ReviewResponse;
use test_utils::{seeded_memory_database, SeededCatalog};

fn memory_config() -> ApiConfig {
    ApiConfig {
        store: StoreBackend::Memory,
        ..ApiConfig::default()
    }
}

async fn server_with(config: ApiConfig) -> (TestServer, Database, SeededCatalog) {
    let (memory, seeded) = seeded_memory_database().await.unwrap();
    let database = Database::from(memory);
    let server = TestServer::new(create_router(database.clone(), config)).unwrap();
    (server, database, seeded)
}

async fn server() -> (TestServer, Database, SeededCatalog) {
    server_with(memory_config()).await
}

fn squirtle() -> Value {
    json!({ "name": "Squirtle", "birth_date": "1996-02-27", "height": 5, "weight": 90 })
}

async fn post_review(server: &TestServer, seeded: &SeededCatalog, title: &str, rating: i32) {
    server
        .post("/api/v1/reviews")
        .add_query_param("reviewer_id", seeded.reviewer.id.value())
        .add_query_param("pokemon_id", seeded.pokemon.id.value())
        .json(&json!({ "title": title, "text": "seen in the wild", "rating": rating }))
        .await
        .assert_status(StatusCode::CREATED);
}

// ============================================================================
// Health
// ============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_reports_backend() {
        let (server, _, _) = server().await;

        let response = server.get("/health").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["store"], "memory");

        server.get("/health/ready").await.assert_status_ok();
    }
}

// ============================================================================
// Pokemon
// ============================================================================

mod pokemon_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_and_get() {
        let (server, _, seeded) = server().await;

        let listed: Vec<PokemonResponse> = server.get("/api/v1/pokemon").await.json();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Pikachu");

        let fetched: PokemonResponse = server
            .get(&format!("/api/v1/pokemon/{}", seeded.pokemon.id.value()))
            .await
            .json();
        assert_eq!(fetched.id, seeded.pokemon.id);
    }

    #[tokio::test]
    async fn test_missing_pokemon_is_not_found() {
        let (server, _, _) = server().await;
        server
            .get("/api/v1/pokemon/999")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_links_owner() {
        let (server, _, seeded) = server().await;

        let response = server
            .post("/api/v1/pokemon")
            .add_query_param("owner_id", seeded.owner.id.value())
            .add_query_param("category_id", seeded.category.id.value())
            .json(&squirtle())
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: PokemonResponse = response.json();
        assert_eq!(created.name, "Squirtle");

        let owners: Vec<OwnerResponse> = server
            .get(&format!("/api/v1/pokemon/{}/owners", created.id.value()))
            .await
            .json();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].id, seeded.owner.id);
    }

    #[tokio::test]
    async fn test_create_duplicate_name_conflicts() {
        let (server, _, seeded) = server().await;

        server
            .post("/api/v1/pokemon")
            .add_query_param("owner_id", seeded.owner.id.value())
            .add_query_param("category_id", seeded.category.id.value())
            .json(&json!({ "name": "pikachu ", "birth_date": "1996-02-27" }))
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_unknown_owner_depends_on_policy() {
        let (lenient, _, seeded) = server().await;
        lenient
            .post("/api/v1/pokemon")
            .add_query_param("owner_id", 404)
            .add_query_param("category_id", seeded.category.id.value())
            .json(&squirtle())
            .await
            .assert_status(StatusCode::CREATED);

        let strict_config = ApiConfig {
            strict_references: true,
            ..memory_config()
        };
        let (strict, _, seeded) = server_with(strict_config).await;
        strict
            .post("/api/v1/pokemon")
            .add_query_param("owner_id", 404)
            .add_query_param("category_id", seeded.category.id.value())
            .json(&squirtle())
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected() {
        let (server, _, seeded) = server().await;
        server
            .post("/api/v1/pokemon")
            .add_query_param("owner_id", seeded.owner.id.value())
            .add_query_param("category_id", seeded.category.id.value())
            .json(&json!({ "name": "", "birth_date": "1996-02-27" }))
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_update_keeps_links() {
        let (server, _, seeded) = server().await;
        let id = seeded.pokemon.id.value();

        server
            .put(&format!("/api/v1/pokemon/{}", id))
            .add_query_param("owner_id", 404)
            .add_query_param("category_id", 404)
            .json(&json!({ "id": id, "name": "Raichu", "birth_date": "1996-02-27", "height": 8, "weight": 300 }))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let fetched: PokemonResponse = server.get(&format!("/api/v1/pokemon/{}", id)).await.json();
        assert_eq!(fetched.name, "Raichu");
        let owners: Vec<OwnerResponse> = server
            .get(&format!("/api/v1/pokemon/{}/owners", id))
            .await
            .json();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].id, seeded.owner.id);
    }

    #[tokio::test]
    async fn test_update_with_mismatched_id_is_bad_request() {
        let (server, _, seeded) = server().await;

        server
            .put(&format!("/api/v1/pokemon/{}", seeded.pokemon.id.value()))
            .add_query_param("owner_id", seeded.owner.id.value())
            .add_query_param("category_id", seeded.category.id.value())
            .json(&json!({ "id": 999, "name": "Raichu", "birth_date": "1996-02-27" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rating_is_mean_of_reviews() {
        let (server, _, seeded) = server().await;
        let path = format!("/api/v1/pokemon/{}/rating", seeded.pokemon.id.value());

        let unrated: RatingResponse = server.get(&path).await.json();
        assert_eq!(unrated.rating, dec!(0));

        post_review(&server, &seeded, "Fine", 3).await;
        post_review(&server, &seeded, "Good", 4).await;
        post_review(&server, &seeded, "Great", 5).await;

        let rated: RatingResponse = server.get(&path).await.json();
        assert_eq!(rated.rating, dec!(4));
    }

    #[tokio::test]
    async fn test_delete_removes_reviews_first() {
        let (server, database, seeded) = server().await;
        post_review(&server, &seeded, "Shocking", 5).await;

        server
            .delete(&format!("/api/v1/pokemon/{}", seeded.pokemon.id.value()))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(&format!("/api/v1/pokemon/{}", seeded.pokemon.id.value()))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        let remaining = ReviewRepository::new(database.session())
            .get_reviews_of_a_pokemon(seeded.pokemon.id)
            .await
            .unwrap();
        assert!(remaining.is_empty());
    }
}

// ============================================================================
// Categories, countries, owners
// ============================================================================

mod catalog_tests {
    use super::*;

    #[tokio::test]
    async fn test_category_crud() {
        let (server, _, _) = server().await;

        let response = server
            .post("/api/v1/categories")
            .json(&json!({ "name": "Water" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: Value = response.json();
        let id = created["id"].as_i64().unwrap();

        server
            .put(&format!("/api/v1/categories/{}", id))
            .json(&json!({ "name": "Ocean" }))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        let fetched: Value = server.get(&format!("/api/v1/categories/{}", id)).await.json();
        assert_eq!(fetched["name"], "Ocean");

        server
            .delete(&format!("/api/v1/categories/{}", id))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .get(&format!("/api/v1/categories/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_duplicate_category_conflicts() {
        let (server, _, _) = server().await;
        server
            .post("/api/v1/categories")
            .json(&json!({ "name": " ELECTRIC" }))
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_deleting_referenced_category_conflicts() {
        let (server, _, seeded) = server().await;
        server
            .delete(&format!("/api/v1/categories/{}", seeded.category.id.value()))
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_category_lists_its_pokemon() {
        let (server, _, seeded) = server().await;
        let pokemon: Vec<PokemonResponse> = server
            .get(&format!("/api/v1/categories/{}/pokemon", seeded.category.id.value()))
            .await
            .json();
        assert_eq!(pokemon.len(), 1);
        assert_eq!(pokemon[0].id, seeded.pokemon.id);
    }

    #[tokio::test]
    async fn test_owner_country_and_pokemon() {
        let (server, _, seeded) = server().await;
        let owner = seeded.owner.id.value();

        let country: Value = server
            .get(&format!("/api/v1/owners/{}/country", owner))
            .await
            .json();
        assert_eq!(country["name"], "Kanto");

        let pokemon: Vec<PokemonResponse> = server
            .get(&format!("/api/v1/owners/{}/pokemon", owner))
            .await
            .json();
        assert_eq!(pokemon.len(), 1);

        let owners: Vec<OwnerResponse> = server
            .get(&format!("/api/v1/countries/{}/owners", seeded.country.id.value()))
            .await
            .json();
        assert_eq!(owners.len(), 1);
    }

    #[tokio::test]
    async fn test_owner_needs_existing_country() {
        let (server, _, seeded) = server().await;
        let body = json!({ "first_name": "Harry", "last_name": "Potter", "gym": "Mistys Gym" });

        server
            .post("/api/v1/owners")
            .add_query_param("country_id", 404)
            .json(&body)
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let response = server
            .post("/api/v1/owners")
            .add_query_param("country_id", seeded.country.id.value())
            .json(&body)
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: OwnerResponse = response.json();
        assert_eq!(created.country_id, seeded.country.id);
    }
}

// ============================================================================
// Reviews and reviewers
// ============================================================================

mod review_tests {
    use super::*;

    #[tokio::test]
    async fn test_out_of_range_rating_is_rejected() {
        let (server, _, seeded) = server().await;
        server
            .post("/api/v1/reviews")
            .add_query_param("reviewer_id", seeded.reviewer.id.value())
            .add_query_param("pokemon_id", seeded.pokemon.id.value())
            .json(&json!({ "title": "Too much", "text": "", "rating": 6 }))
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_reviews_by_pokemon_and_reviewer() {
        let (server, _, seeded) = server().await;
        post_review(&server, &seeded, "Shocking", 5).await;

        let of_pokemon: Vec<ReviewResponse> = server
            .get(&format!("/api/v1/reviews/pokemon/{}", seeded.pokemon.id.value()))
            .await
            .json();
        assert_eq!(of_pokemon.len(), 1);
        assert_eq!(of_pokemon[0].reviewer_id, seeded.reviewer.id);

        let by_reviewer: Vec<ReviewResponse> = server
            .get(&format!("/api/v1/reviewers/{}/reviews", seeded.reviewer.id.value()))
            .await
            .json();
        assert_eq!(by_reviewer.len(), 1);
    }

    #[tokio::test]
    async fn test_update_review_keeps_subject() {
        let (server, _, seeded) = server().await;
        post_review(&server, &seeded, "Shocking", 5).await;
        let reviews: Vec<ReviewResponse> = server.get("/api/v1/reviews").await.json();
        let id = reviews[0].id.value();

        server
            .put(&format!("/api/v1/reviews/{}", id))
            .json(&json!({ "title": "Shocking", "text": "changed my mind", "rating": 2 }))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let updated: ReviewResponse = server.get(&format!("/api/v1/reviews/{}", id)).await.json();
        assert_eq!(updated.rating, 2);
        assert_eq!(updated.pokemon_id, seeded.pokemon.id);
        assert_eq!(updated.reviewer_id, seeded.reviewer.id);
    }

    #[tokio::test]
    async fn test_delete_reviews_by_reviewer() {
        let (server, _, seeded) = server().await;
        post_review(&server, &seeded, "Shocking", 5).await;
        post_review(&server, &seeded, "Electric", 4).await;

        server
            .delete(&format!("/api/v1/reviews/reviewer/{}", seeded.reviewer.id.value()))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        let remaining: Vec<ReviewResponse> = server.get("/api/v1/reviews").await.json();
        assert!(remaining.is_empty());

        server
            .delete("/api/v1/reviews/reviewer/999")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reviewer_with_reviews_cannot_be_deleted() {
        let (server, _, seeded) = server().await;
        post_review(&server, &seeded, "Shocking", 5).await;

        server
            .delete(&format!("/api/v1/reviewers/{}", seeded.reviewer.id.value()))
            .await
            .assert_status(StatusCode::CONFLICT);
    }
}
