use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::info;

use models::{Poll, PollOption, PollUpdate};
use service::stores::PollStore;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct PollState {
    pub store: PollStore,
}

pub fn router(state: PollState) -> Router {
    Router::new()
        .route("/polls", get(list_polls).post(create_poll))
        .route(
            "/polls/:poll_id",
            get(get_poll).put(update_poll).delete(delete_poll),
        )
        .route("/polls/:poll_id/options", post(add_option))
        .route("/polls/:poll_id/options/:option_id", delete(delete_option))
        .with_state(state)
}

async fn list_polls(State(state): State<PollState>) -> Result<Json<Vec<Poll>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

async fn get_poll(
    State(state): State<PollState>,
    Path(poll_id): Path<u32>,
) -> Result<Json<Poll>, ApiError> {
    Ok(Json(state.store.get(poll_id).await?))
}

async fn create_poll(
    State(state): State<PollState>,
    body: Result<Json<Poll>, JsonRejection>,
) -> Result<Json<Poll>, ApiError> {
    let Json(poll) = body?;
    let created = state.store.add(poll).await?;
    info!(poll_id = created.poll_id, "poll created");
    Ok(Json(created))
}

async fn update_poll(
    State(state): State<PollState>,
    Path(poll_id): Path<u32>,
    body: Result<Json<PollUpdate>, JsonRejection>,
) -> Result<Json<Poll>, ApiError> {
    let Json(update) = body?;
    let updated = state.store.update(poll_id, update).await?;
    info!(poll_id, "poll updated");
    Ok(Json(updated))
}

async fn delete_poll(
    State(state): State<PollState>,
    Path(poll_id): Path<u32>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(poll_id).await?;
    info!(poll_id, "poll deleted");
    Ok(StatusCode::OK)
}

async fn add_option(
    State(state): State<PollState>,
    Path(poll_id): Path<u32>,
    body: Result<Json<PollOption>, JsonRejection>,
) -> Result<Json<Poll>, ApiError> {
    let Json(option) = body?;
    let option_id = option.option_id;
    let poll = state.store.add_option(poll_id, option).await?;
    info!(poll_id, option_id, "poll option added");
    Ok(Json(poll))
}

async fn delete_option(
    State(state): State<PollState>,
    Path((poll_id, option_id)): Path<(u32, u32)>,
) -> Result<Json<Poll>, ApiError> {
    let poll = state.store.remove_option(poll_id, option_id).await?;
    info!(poll_id, option_id, "poll option deleted");
    Ok(Json(poll))
}
