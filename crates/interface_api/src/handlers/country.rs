//! Country handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::CountryId;
use infra_db::CountryRepository;

use crate::dto::check_path_id;
use crate::dto::country::{CountryRequest, CountryResponse};
use crate::dto::owner::OwnerResponse;
use crate::handlers::ensure_saved;
use crate::{error::ApiError, AppState};

/// Lists countries
pub async fn list_countries(
    State(state): State<AppState>,
) -> Result<Json<Vec<CountryResponse>>, ApiError> {
    let countries = CountryRepository::new(state.session()).list().await?;
    Ok(Json(countries.into_iter().map(Into::into).collect()))
}

/// Gets a country by ID
pub async fn get_country(
    State(state): State<AppState>,
    Path(id): Path<CountryId>,
) -> Result<Json<CountryResponse>, ApiError> {
    CountryRepository::new(state.session())
        .get(id)
        .await?
        .map(|country| Json(country.into()))
        .ok_or_else(|| ApiError::not_found("Country", id))
}

/// Lists the owners living in a country
pub async fn get_owners_from_country(
    State(state): State<AppState>,
    Path(id): Path<CountryId>,
) -> Result<Json<Vec<OwnerResponse>>, ApiError> {
    let repository = CountryRepository::new(state.session());
    if !repository.exists(id).await? {
        return Err(ApiError::not_found("Country", id));
    }
    let owners = repository.get_owners_from_country(id).await?;
    Ok(Json(owners.into_iter().map(Into::into).collect()))
}

/// Creates a country
pub async fn create_country(
    State(state): State<AppState>,
    Json(request): Json<CountryRequest>,
) -> Result<(StatusCode, Json<CountryResponse>), ApiError> {
    request.validate()?;
    let repository = CountryRepository::new(state.session());
    let country = request.into_country(CountryId::UNASSIGNED);

    ensure_saved(repository.create(country.clone()).await?, "saving the country")?;
    let created = repository
        .find_duplicate(&country)
        .await?
        .ok_or_else(|| ApiError::not_saved("reading back the country"))?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Replaces a country's name
pub async fn update_country(
    State(state): State<AppState>,
    Path(id): Path<CountryId>,
    Json(request): Json<CountryRequest>,
) -> Result<StatusCode, ApiError> {
    request.validate()?;
    check_path_id(id, request.id)?;
    let repository = CountryRepository::new(state.session());
    if !repository.exists(id).await? {
        return Err(ApiError::not_found("Country", id));
    }

    ensure_saved(repository.update(request.into_country(id)).await?, "updating the country")?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deletes a country no owner lives in
pub async fn delete_country(
    State(state): State<AppState>,
    Path(id): Path<CountryId>,
) -> Result<StatusCode, ApiError> {
    let repository = CountryRepository::new(state.session());
    let country = repository
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Country", id))?;

    ensure_saved(repository.delete(country).await?, "deleting the country")?;
    Ok(StatusCode::NO_CONTENT)
}
