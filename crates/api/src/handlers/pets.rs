//! Handlers for the `/pets` resource.

use axum::extract::{OriginalUri, State};
use axum::http::StatusCode;
use axum::Json;
use petkare_core::error::CoreError;
use petkare_core::pagination::{resolve_page_size, PageWindow};
use petkare_core::types::DbId;
use petkare_db::models::pet::{CreatePet, NewPet, PetChanges, PetDetail, UpdatePet};
use petkare_db::repositories::PetRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::pagination::Paginated;
use crate::query::PetListParams;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Pet", id })
}

/// GET /api/pets
///
/// One page of pets in insertion order, optionally filtered by trait name.
pub async fn list(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    QueryParams(params): QueryParams<PetListParams>,
) -> AppResult<Json<Paginated<PetDetail>>> {
    let trait_filter = params.trait_filter();
    let page_size = resolve_page_size(params.page_size.as_deref());

    let count = PetRepo::count(&state.pool, trait_filter).await?;
    let page = PageWindow::resolve(params.pagina.as_deref(), page_size, count)?;
    let pets = PetRepo::list_page(&state.pool, trait_filter, page.size, page.offset()).await?;

    Ok(Json(Paginated::new(
        page,
        pets,
        &state.config.public_base_url,
        &uri,
    )))
}

/// POST /api/pets
///
/// Group and traits are matched by name, ignoring case, and created on first use.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreatePet>,
) -> AppResult<(StatusCode, Json<PetDetail>)> {
    let new_pet = NewPet::try_from(input)?;
    let pet = PetRepo::create(&state.pool, &new_pet).await?;

    tracing::info!(
        pet_id = pet.id,
        group_id = pet.group.id,
        traits = pet.traits.len(),
        "Pet created",
    );

    Ok((StatusCode::CREATED, Json(pet)))
}

/// GET /api/pets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<PetDetail>> {
    let pet = PetRepo::find_detail_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(pet))
}

/// PATCH /api/pets/{id}
///
/// Merges the supplied fields. A non-empty `traits` list replaces the pet's
/// whole trait set; a supplied `group` is resolved and reassigned.
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
    JsonBody(input): JsonBody<UpdatePet>,
) -> AppResult<Json<PetDetail>> {
    PetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let changes = PetChanges::try_from(input)?;
    let pet = PetRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        pet_id = id,
        group_reassigned = changes.group_name.is_some(),
        traits_replaced = changes.trait_names.is_some(),
        "Pet updated",
    );

    Ok(Json(pet))
}

/// DELETE /api/pets/{id}
///
/// Removes the pet and its trait links. Groups and traits are kept.
pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<StatusCode> {
    if PetRepo::delete(&state.pool, id).await? {
        tracing::info!(pet_id = id, "Pet deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
