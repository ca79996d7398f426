//! Category handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::CategoryId;
use infra_db::CategoryRepository;

use crate::dto::category::{CategoryRequest, CategoryResponse};
use crate::dto::check_path_id;
use crate::dto::pokemon::PokemonResponse;
use crate::handlers::ensure_saved;
use crate::{error::ApiError, AppState};

/// Lists categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = CategoryRepository::new(state.session()).list().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// Gets a category by ID
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<CategoryResponse>, ApiError> {
    CategoryRepository::new(state.session())
        .get(id)
        .await?
        .map(|category| Json(category.into()))
        .ok_or_else(|| ApiError::not_found("Category", id))
}

/// Lists the pokemon filed under a category
pub async fn get_pokemon_by_category(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<Vec<PokemonResponse>>, ApiError> {
    let repository = CategoryRepository::new(state.session());
    if !repository.exists(id).await? {
        return Err(ApiError::not_found("Category", id));
    }
    let pokemon = repository.get_pokemon_by_category(id).await?;
    Ok(Json(pokemon.into_iter().map(Into::into).collect()))
}

/// Creates a category
pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    request.validate()?;
    let repository = CategoryRepository::new(state.session());
    let category = request.into_category(CategoryId::UNASSIGNED);

    ensure_saved(repository.create(category.clone()).await?, "saving the category")?;
    let created = repository
        .find_duplicate(&category)
        .await?
        .ok_or_else(|| ApiError::not_saved("reading back the category"))?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Replaces a category's name
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Json(request): Json<CategoryRequest>,
) -> Result<StatusCode, ApiError> {
    request.validate()?;
    check_path_id(id, request.id)?;
    let repository = CategoryRepository::new(state.session());
    if !repository.exists(id).await? {
        return Err(ApiError::not_found("Category", id));
    }

    ensure_saved(repository.update(request.into_category(id)).await?, "updating the category")?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deletes a category no pokemon is filed under
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<StatusCode, ApiError> {
    let repository = CategoryRepository::new(state.session());
    let category = repository
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category", id))?;

    ensure_saved(repository.delete(category).await?, "deleting the category")?;
    Ok(StatusCode::NO_CONTENT)
}
