//! Review handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::{PokemonId, ReviewId, ReviewerId};
use infra_db::{ReviewRepository, ReviewerRepository};

use crate::dto::review::{ReviewRequest, ReviewResponse};
use crate::dto::{check_path_id, ReviewLinks};
use crate::handlers::ensure_saved;
use crate::{error::ApiError, AppState};

/// Lists reviews
pub async fn list_reviews(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let reviews = ReviewRepository::new(state.session()).list().await?;
    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}

/// Gets a review by ID
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<ReviewId>,
) -> Result<Json<ReviewResponse>, ApiError> {
    ReviewRepository::new(state.session())
        .get(id)
        .await?
        .map(|review| Json(review.into()))
        .ok_or_else(|| ApiError::not_found("Review", id))
}

/// Lists the reviews of a pokemon
pub async fn get_reviews_of_pokemon(
    State(state): State<AppState>,
    Path(pokemon_id): Path<PokemonId>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let reviews = ReviewRepository::new(state.session())
        .get_reviews_of_a_pokemon(pokemon_id)
        .await?;
    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}

/// Creates a review of `pokemon_id` written by `reviewer_id`
pub async fn create_review(
    State(state): State<AppState>,
    Query(links): Query<ReviewLinks>,
    Json(request): Json<ReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    request.validate()?;
    let repository = ReviewRepository::new(state.session());
    let review = request.into_review();

    ensure_saved(
        repository
            .create(links.reviewer_id, links.pokemon_id, review.clone())
            .await?,
        "saving the review",
    )?;
    let created = repository
        .find_duplicate(&review)
        .await?
        .ok_or_else(|| ApiError::not_saved("reading back the review"))?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Replaces a review's title, text and rating
pub async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<ReviewId>,
    Json(request): Json<ReviewRequest>,
) -> Result<StatusCode, ApiError> {
    request.validate()?;
    check_path_id(id, request.id)?;
    let repository = ReviewRepository::new(state.session());
    let existing = repository
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Review", id))?;

    let mut review = request
        .into_review()
        .attach(existing.pokemon_id, existing.reviewer_id);
    review.id = id;
    ensure_saved(repository.update(review).await?, "updating the review")?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deletes a review
pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<ReviewId>,
) -> Result<StatusCode, ApiError> {
    let repository = ReviewRepository::new(state.session());
    let review = repository
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Review", id))?;

    ensure_saved(repository.delete(review).await?, "deleting the review")?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deletes every review written by a reviewer
pub async fn delete_reviews_by_reviewer(
    State(state): State<AppState>,
    Path(reviewer_id): Path<ReviewerId>,
) -> Result<StatusCode, ApiError> {
    let session = state.session();
    let reviewers = ReviewerRepository::new(session.clone());
    if !reviewers.exists(reviewer_id).await? {
        return Err(ApiError::not_found("Reviewer", reviewer_id));
    }

    let written = reviewers.get_reviews_by_reviewer(reviewer_id).await?;
    if written.is_empty() {
        return Ok(StatusCode::NO_CONTENT);
    }
    ensure_saved(
        ReviewRepository::new(session).remove_reviews(written).await?,
        "deleting the reviews",
    )?;
    Ok(StatusCode::NO_CONTENT)
}
