//! HTTP handlers for content, gallery and route endpoints.
//!
//! # Responsibility
//! - Decode requests, run one service call, encode the envelope.
//! - Move synchronous storage work off the async executor.
//!
//! # Invariants
//! - Handlers never hold state across requests beyond `AppState`.
//! - Decode failures (bad JSON, non-integer ids) are `invalid_input`.

use crate::envelope::{ApiError, ApiResult, Success};
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use phrygian_core::{
    ContentPatch, Fields, GalleryImage, GalleryImageId, MissingEntity, Route, ServiceError,
    ServiceResult, SiteContent,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Removed {
    pub removed: usize,
}

pub async fn health() -> Success<Health> {
    Success(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn get_content(State(state): State<AppState>) -> ApiResult<SiteContent> {
    blocking(move || state.content.read()).await
}

pub async fn put_content(
    State(state): State<AppState>,
    body: Result<Json<ContentPatch>, JsonRejection>,
) -> ApiResult<SiteContent> {
    let Json(patch) = body.map_err(json_rejection)?;
    blocking(move || state.content.patch(patch)).await
}

pub async fn list_gallery(State(state): State<AppState>) -> ApiResult<Vec<GalleryImage>> {
    blocking(move || state.content.gallery().list()).await
}

pub async fn create_gallery_image(
    State(state): State<AppState>,
    body: Result<Json<Fields>, JsonRejection>,
) -> ApiResult<GalleryImage> {
    let Json(fields) = body.map_err(json_rejection)?;
    blocking(move || state.content.gallery().create(fields)).await
}

pub async fn update_gallery_image(
    State(state): State<AppState>,
    id: Result<Path<GalleryImageId>, PathRejection>,
    body: Result<Json<Fields>, JsonRejection>,
) -> ApiResult<GalleryImage> {
    let Path(id) = id.map_err(path_rejection)?;
    let Json(partial) = body.map_err(json_rejection)?;
    blocking(move || state.content.gallery().update(id, partial)).await
}

pub async fn delete_gallery_image(
    State(state): State<AppState>,
    id: Result<Path<GalleryImageId>, PathRejection>,
) -> ApiResult<Removed> {
    let Path(id) = id.map_err(path_rejection)?;
    blocking(move || {
        let removed = state.content.gallery().delete(id)?;
        Ok(Removed { removed })
    })
    .await
}

pub async fn list_routes(State(state): State<AppState>) -> ApiResult<Vec<Route>> {
    blocking(move || state.catalog.with_routes(|routes| routes.list_all())).await
}

pub async fn get_route(
    State(state): State<AppState>,
    Path(route_id): Path<String>,
) -> ApiResult<Route> {
    blocking(move || {
        state
            .catalog
            .with_routes(|routes| routes.get_by_id(&route_id))?
            .ok_or(ServiceError::NotFound(MissingEntity::Route(route_id)))
    })
    .await
}

async fn blocking<T, F>(work: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(result) => result.map(Success).map_err(ApiError::from),
        Err(err) => {
            log::error!("event=blocking_task module=api status=error error={err}");
            Err(ApiError::internal())
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    log::warn!("event=decode_body module=api status=rejected error={rejection}");
    ApiError::invalid_input("Request body must be a JSON object")
}

fn path_rejection(rejection: PathRejection) -> ApiError {
    log::warn!("event=decode_path module=api status=rejected error={rejection}");
    ApiError::invalid_input("Image id must be an integer")
}
