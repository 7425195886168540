use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::info;

use models::Vote;
use service::{stores::VoteStore, validator::VoteValidator};

use crate::errors::ApiError;

#[derive(Clone)]
pub struct VoteState {
    pub store: VoteStore,
    pub validator: VoteValidator,
}

pub fn router(state: VoteState) -> Router {
    Router::new()
        .route("/votes", get(list_votes).post(create_vote))
        .route("/votes/:vote_id", get(get_vote).delete(delete_vote))
        .route("/votes/voter/:voter_id", get(list_votes_for_voter))
        .with_state(state)
}

async fn list_votes(State(state): State<VoteState>) -> Result<Json<Vec<Vote>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

async fn get_vote(
    State(state): State<VoteState>,
    Path(vote_id): Path<u32>,
) -> Result<Json<Vote>, ApiError> {
    Ok(Json(state.store.get(vote_id).await?))
}

async fn list_votes_for_voter(
    State(state): State<VoteState>,
    Path(voter_id): Path<u32>,
) -> Result<Json<Vec<Vote>>, ApiError> {
    Ok(Json(state.store.list_for_voter(voter_id).await?))
}

/// Accept a vote only after its voter, poll, and chosen option have been
/// confirmed against the peer services.
async fn create_vote(
    State(state): State<VoteState>,
    body: Result<Json<Vote>, JsonRejection>,
) -> Result<Json<Vote>, ApiError> {
    let Json(vote) = body?;
    state.validator.check(&vote).await?;
    let created = state.store.add(vote).await?;
    info!(
        vote_id = created.vote_id,
        voter_id = created.voter_id,
        poll_id = created.poll_id,
        "vote recorded"
    );
    Ok(Json(created))
}

async fn delete_vote(
    State(state): State<VoteState>,
    Path(vote_id): Path<u32>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(vote_id).await?;
    info!(vote_id, "vote deleted");
    Ok(StatusCode::OK)
}
