//! Pokemon handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use validator::Validate;

use core_kernel::PokemonId;
use infra_db::{OwnerRepository, PokemonRepository, ReviewRepository, Session};

use crate::dto::owner::OwnerResponse;
use crate::dto::pokemon::{PokemonRequest, PokemonResponse, RatingResponse};
use crate::dto::{check_path_id, PokemonLinks};
use crate::handlers::ensure_saved;
use crate::{error::ApiError, AppState};

fn repository(state: &AppState, session: Session) -> PokemonRepository<Session> {
    PokemonRepository::new(session).with_reference_policy(state.config.reference_policy())
}

/// Lists pokemon
pub async fn list_pokemon(
    State(state): State<AppState>,
) -> Result<Json<Vec<PokemonResponse>>, ApiError> {
    let pokemon = repository(&state, state.session()).list().await?;
    Ok(Json(pokemon.into_iter().map(Into::into).collect()))
}

/// Gets a pokemon by ID
pub async fn get_pokemon(
    State(state): State<AppState>,
    Path(id): Path<PokemonId>,
) -> Result<Json<PokemonResponse>, ApiError> {
    repository(&state, state.session())
        .get(id)
        .await?
        .map(|pokemon| Json(pokemon.into()))
        .ok_or_else(|| ApiError::not_found("Pokemon", id))
}

/// Gets the mean review rating of a pokemon
pub async fn get_rating(
    State(state): State<AppState>,
    Path(id): Path<PokemonId>,
) -> Result<Json<RatingResponse>, ApiError> {
    let repository = repository(&state, state.session());
    if !repository.exists(id).await? {
        return Err(ApiError::not_found("Pokemon", id));
    }
    let rating = repository.get_rating(id).await?;
    Ok(Json(RatingResponse { pokemon_id: id, rating }))
}

/// Lists the owners of a pokemon
pub async fn get_owners_of_pokemon(
    State(state): State<AppState>,
    Path(id): Path<PokemonId>,
) -> Result<Json<Vec<OwnerResponse>>, ApiError> {
    let session = state.session();
    if !repository(&state, session.clone()).exists(id).await? {
        return Err(ApiError::not_found("Pokemon", id));
    }
    let owners = OwnerRepository::new(session).get_owners_of_a_pokemon(id).await?;
    Ok(Json(owners.into_iter().map(Into::into).collect()))
}

/// Creates a pokemon linked to one owner and one category
pub async fn create_pokemon(
    State(state): State<AppState>,
    Query(links): Query<PokemonLinks>,
    Json(request): Json<PokemonRequest>,
) -> Result<(StatusCode, Json<PokemonResponse>), ApiError> {
    request.validate()?;
    let repository = repository(&state, state.session());
    let pokemon = request.into_pokemon(PokemonId::UNASSIGNED);
    let name = pokemon.name.clone();

    ensure_saved(
        repository.create(links.owner_id, links.category_id, pokemon).await?,
        "saving the pokemon",
    )?;
    let created = repository
        .find_by_name_case_insensitive(&name)
        .await?
        .ok_or_else(|| ApiError::not_saved("reading back the pokemon"))?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Replaces a pokemon's attributes; its owner and category links are kept
pub async fn update_pokemon(
    State(state): State<AppState>,
    Path(id): Path<PokemonId>,
    Query(links): Query<PokemonLinks>,
    Json(request): Json<PokemonRequest>,
) -> Result<StatusCode, ApiError> {
    request.validate()?;
    check_path_id(id, request.id)?;
    let repository = repository(&state, state.session());
    if !repository.exists(id).await? {
        return Err(ApiError::not_found("Pokemon", id));
    }

    let saved = repository
        .update(links.owner_id, links.category_id, request.into_pokemon(id))
        .await?;
    ensure_saved(saved, "updating the pokemon")?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deletes a pokemon after removing its reviews
pub async fn delete_pokemon(
    State(state): State<AppState>,
    Path(id): Path<PokemonId>,
) -> Result<StatusCode, ApiError> {
    let session = state.session();
    let pokemon_repository = repository(&state, session.clone());
    let pokemon = pokemon_repository
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Pokemon", id))?;

    // Reviews go in their own commit; they stay removed if the pokemon delete then fails
    let reviews = ReviewRepository::new(session);
    let written = reviews.get_reviews_of_a_pokemon(id).await?;
    if !written.is_empty() {
        info!(pokemon = %id, count = written.len(), "removing reviews before delete");
        ensure_saved(reviews.remove_reviews(written).await?, "deleting the reviews")?;
    }

    ensure_saved(pokemon_repository.delete(pokemon).await?, "deleting the pokemon")?;
    Ok(StatusCode::NO_CONTENT)
}
