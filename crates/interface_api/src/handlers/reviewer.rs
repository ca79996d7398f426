//! Reviewer handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::ReviewerId;
use infra_db::ReviewerRepository;

use crate::dto::check_path_id;
use crate::dto::review::ReviewResponse;
use crate::dto::reviewer::{ReviewerRequest, ReviewerResponse};
use crate::handlers::ensure_saved;
use crate::{error::ApiError, AppState};

/// Lists reviewers
pub async fn list_reviewers(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReviewerResponse>>, ApiError> {
    let reviewers = ReviewerRepository::new(state.session()).list().await?;
    Ok(Json(reviewers.into_iter().map(Into::into).collect()))
}

/// Gets a reviewer by ID
pub async fn get_reviewer(
    State(state): State<AppState>,
    Path(id): Path<ReviewerId>,
) -> Result<Json<ReviewerResponse>, ApiError> {
    ReviewerRepository::new(state.session())
        .get(id)
        .await?
        .map(|reviewer| Json(reviewer.into()))
        .ok_or_else(|| ApiError::not_found("Reviewer", id))
}

/// Lists the reviews a reviewer wrote
pub async fn get_reviews_by_reviewer(
    State(state): State<AppState>,
    Path(id): Path<ReviewerId>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let repository = ReviewerRepository::new(state.session());
    if !repository.exists(id).await? {
        return Err(ApiError::not_found("Reviewer", id));
    }
    let reviews = repository.get_reviews_by_reviewer(id).await?;
    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}

/// Creates a reviewer
pub async fn create_reviewer(
    State(state): State<AppState>,
    Json(request): Json<ReviewerRequest>,
) -> Result<(StatusCode, Json<ReviewerResponse>), ApiError> {
    request.validate()?;
    let repository = ReviewerRepository::new(state.session());
    let reviewer = request.into_reviewer(ReviewerId::UNASSIGNED);

    ensure_saved(repository.create(reviewer.clone()).await?, "saving the reviewer")?;
    let created = repository
        .find_duplicate(&reviewer)
        .await?
        .ok_or_else(|| ApiError::not_saved("reading back the reviewer"))?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Replaces a reviewer's names
pub async fn update_reviewer(
    State(state): State<AppState>,
    Path(id): Path<ReviewerId>,
    Json(request): Json<ReviewerRequest>,
) -> Result<StatusCode, ApiError> {
    request.validate()?;
    check_path_id(id, request.id)?;
    let repository = ReviewerRepository::new(state.session());
    if !repository.exists(id).await? {
        return Err(ApiError::not_found("Reviewer", id));
    }

    ensure_saved(repository.update(request.into_reviewer(id)).await?, "updating the reviewer")?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deletes a reviewer who has no reviews left
pub async fn delete_reviewer(
    State(state): State<AppState>,
    Path(id): Path<ReviewerId>,
) -> Result<StatusCode, ApiError> {
    let repository = ReviewerRepository::new(state.session());
    let reviewer = repository
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Reviewer", id))?;

    ensure_saved(repository.delete(reviewer).await?, "deleting the reviewer")?;
    Ok(StatusCode::NO_CONTENT)
}
