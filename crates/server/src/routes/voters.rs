use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::info;

use models::{Voter, VoterPoll, VoterUpdate};
use service::stores::VoterStore;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct VoterState {
    pub store: VoterStore,
}

pub fn router(state: VoterState) -> Router {
    Router::new()
        .route("/voters", get(list_voters).post(create_voter))
        .route(
            "/voters/:voter_id",
            get(get_voter).put(update_voter).delete(delete_voter),
        )
        .route("/voters/:voter_id/polls", get(get_history))
        .route(
            "/voters/:voter_id/polls/:poll_id",
            get(get_history_entry)
                .post(add_history_entry)
                .put(refresh_history_entry)
                .delete(delete_history_entry),
        )
        .with_state(state)
}

async fn list_voters(State(state): State<VoterState>) -> Result<Json<Vec<Voter>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

async fn get_voter(
    State(state): State<VoterState>,
    Path(voter_id): Path<u32>,
) -> Result<Json<Voter>, ApiError> {
    Ok(Json(state.store.get(voter_id).await?))
}

async fn create_voter(
    State(state): State<VoterState>,
    body: Result<Json<Voter>, JsonRejection>,
) -> Result<Json<Voter>, ApiError> {
    let Json(voter) = body?;
    let created = state.store.add(voter).await?;
    info!(voter_id = created.voter_id, "voter created");
    Ok(Json(created))
}

async fn update_voter(
    State(state): State<VoterState>,
    Path(voter_id): Path<u32>,
    body: Result<Json<VoterUpdate>, JsonRejection>,
) -> Result<Json<Voter>, ApiError> {
    let Json(update) = body?;
    let updated = state.store.update(voter_id, update).await?;
    info!(voter_id, "voter updated");
    Ok(Json(updated))
}

async fn delete_voter(
    State(state): State<VoterState>,
    Path(voter_id): Path<u32>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(voter_id).await?;
    info!(voter_id, "voter deleted");
    Ok(StatusCode::OK)
}

async fn get_history(
    State(state): State<VoterState>,
    Path(voter_id): Path<u32>,
) -> Result<Json<Vec<VoterPoll>>, ApiError> {
    Ok(Json(state.store.history(voter_id).await?))
}

async fn get_history_entry(
    State(state): State<VoterState>,
    Path((voter_id, poll_id)): Path<(u32, u32)>,
) -> Result<Json<VoterPoll>, ApiError> {
    Ok(Json(state.store.history_entry(voter_id, poll_id).await?))
}

async fn add_history_entry(
    State(state): State<VoterState>,
    Path((voter_id, poll_id)): Path<(u32, u32)>,
) -> Result<Json<VoterPoll>, ApiError> {
    let entry = state.store.add_history(voter_id, poll_id).await?;
    info!(voter_id, poll_id, "history entry added");
    Ok(Json(entry))
}

async fn refresh_history_entry(
    State(state): State<VoterState>,
    Path((voter_id, poll_id)): Path<(u32, u32)>,
) -> Result<Json<VoterPoll>, ApiError> {
    let entry = state.store.refresh_history(voter_id, poll_id).await?;
    info!(voter_id, poll_id, "history entry refreshed");
    Ok(Json(entry))
}

async fn delete_history_entry(
    State(state): State<VoterState>,
    Path((voter_id, poll_id)): Path<(u32, u32)>,
) -> Result<StatusCode, ApiError> {
    state.store.remove_history(voter_id, poll_id).await?;
    info!(voter_id, poll_id, "history entry deleted");
    Ok(StatusCode::OK)
}
