//! Owner handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::OwnerId;
use infra_db::{CountryRepository, OwnerRepository};

use crate::dto::country::CountryResponse;
use crate::dto::owner::{OwnerRequest, OwnerResponse};
use crate::dto::pokemon::PokemonResponse;
use crate::dto::{check_path_id, CountryParam};
use crate::handlers::ensure_saved;
use crate::{error::ApiError, AppState};

/// Lists owners
pub async fn list_owners(
    State(state): State<AppState>,
) -> Result<Json<Vec<OwnerResponse>>, ApiError> {
    let owners = OwnerRepository::new(state.session()).list().await?;
    Ok(Json(owners.into_iter().map(Into::into).collect()))
}

/// Gets an owner by ID
pub async fn get_owner(
    State(state): State<AppState>,
    Path(id): Path<OwnerId>,
) -> Result<Json<OwnerResponse>, ApiError> {
    OwnerRepository::new(state.session())
        .get(id)
        .await?
        .map(|owner| Json(owner.into()))
        .ok_or_else(|| ApiError::not_found("Owner", id))
}

/// Lists the pokemon an owner is linked to
pub async fn get_pokemon_by_owner(
    State(state): State<AppState>,
    Path(id): Path<OwnerId>,
) -> Result<Json<Vec<PokemonResponse>>, ApiError> {
    let repository = OwnerRepository::new(state.session());
    if !repository.exists(id).await? {
        return Err(ApiError::not_found("Owner", id));
    }
    let pokemon = repository.get_pokemon_by_owner(id).await?;
    Ok(Json(pokemon.into_iter().map(Into::into).collect()))
}

/// Gets the country an owner lives in
pub async fn get_country_of_owner(
    State(state): State<AppState>,
    Path(id): Path<OwnerId>,
) -> Result<Json<CountryResponse>, ApiError> {
    OwnerRepository::new(state.session())
        .get_country_of_owner(id)
        .await?
        .map(|country| Json(country.into()))
        .ok_or_else(|| ApiError::not_found("Owner", id))
}

/// Creates an owner living in `country_id`
pub async fn create_owner(
    State(state): State<AppState>,
    Query(param): Query<CountryParam>,
    Json(request): Json<OwnerRequest>,
) -> Result<(StatusCode, Json<OwnerResponse>), ApiError> {
    request.validate()?;
    let session = state.session();
    if !CountryRepository::new(session.clone()).exists(param.country_id).await? {
        return Err(ApiError::Validation(
            format!("Country {} does not exist", param.country_id),
            Vec::new(),
        ));
    }

    let repository = OwnerRepository::new(session);
    let owner = request.into_owner(OwnerId::UNASSIGNED, param.country_id);
    ensure_saved(repository.create(owner.clone()).await?, "saving the owner")?;
    let created = repository
        .find_duplicate(&owner)
        .await?
        .ok_or_else(|| ApiError::not_saved("reading back the owner"))?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Replaces an owner's names and gym; the country stays as it was
pub async fn update_owner(
    State(state): State<AppState>,
    Path(id): Path<OwnerId>,
    Json(request): Json<OwnerRequest>,
) -> Result<StatusCode, ApiError> {
    request.validate()?;
    check_path_id(id, request.id)?;
    let repository = OwnerRepository::new(state.session());
    let existing = repository
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Owner", id))?;

    let owner = request.into_owner(id, existing.country_id);
    ensure_saved(repository.update(owner).await?, "updating the owner")?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deletes an owner no pokemon is linked to
pub async fn delete_owner(
    State(state): State<AppState>,
    Path(id): Path<OwnerId>,
) -> Result<StatusCode, ApiError> {
    let repository = OwnerRepository::new(state.session());
    let owner = repository
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Owner", id))?;

    ensure_saved(repository.delete(owner).await?, "deleting the owner")?;
    Ok(StatusCode::NO_CONTENT)
}
