use crate::{error::AppError, AppState};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, OriginalUri, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use core_types::Planet;
use serde_json::{json, Value};
use std::sync::Arc;

/// # GET /api/
pub async fn index() -> &'static str {
    "api v1"
}

/// # GET /api/planets
/// Every stored planet; an empty array when there are none.
pub async fn list_planets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Planet>>, AppError> {
    tracing::debug!("Finding all planets");
    let planets = state.planets.find_all().await?;
    Ok(Json(planets))
}

/// # POST /api/planets
/// Stores the decoded planet and answers 201 with its assigned id and a
/// `Location` header pointing at it. The body is decoded as JSON whatever its
/// `Content-Type`, before the store is touched; any decoding failure is a 400.
pub async fn create_planet(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body.map_err(|rejection| AppError::InvalidPayload(rejection.body_text()))?;
    let planet: Planet = serde_json::from_slice(&body)
        .map_err(|e| AppError::InvalidPayload(e.to_string()))?;

    tracing::info!(name = %planet.name, "Creating a planet");
    let id = state.planets.create(&planet).await?;

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), id);
    let planet = planet.with_id(id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(planet)))
}

/// # GET /api/planets/:id
pub async fn get_planet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Planet>, AppError> {
    tracing::info!(%id, "Finding a planet by ID");
    let planet = state.planets.find_by_id(&id).await?;
    Ok(Json(planet))
}

/// # GET /api/planets/findByName?name=...
/// Case-insensitive substring search. A missing or empty `name` matches every
/// planet; no match at all is a 404.
pub async fn find_planets_by_name(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Planet>>, AppError> {
    // First occurrence wins when `name` is repeated.
    let name = params
        .into_iter()
        .find_map(|(key, value)| (key == "name").then_some(value))
        .unwrap_or_default();

    tracing::info!(%name, "Finding planets by name");
    let planets = state.planets.find_by_name(&name).await?;
    if planets.is_empty() {
        return Err(AppError::NotFound);
    }
    Ok(Json(planets))
}

/// # DELETE /api/planets/:id
pub async fn delete_planet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    tracing::info!(%id, "Deleting a planet");
    state.planets.delete(&id).await?;
    Ok(Json(json!({ "result": "success" })))
}
