//! Cross-service referential check for incoming votes.
//!
//! Fetches the complete voter and poll lists from the peer services and
//! scans them for the referenced ids. A fetch failure rejects the vote
//! (fail closed); the `Upstream` variant keeps the cause visible in logs
//! even though the HTTP layer reports it the same as a missing reference.

use common::peers::PeerClient;
use models::Vote;
use tracing::warn;

use crate::errors::ServiceError;

#[derive(Clone)]
pub struct VoteValidator {
    peers: PeerClient,
}

impl VoteValidator {
    pub fn new(peers: PeerClient) -> Self {
        Self { peers }
    }

    /// Verify that the vote's voter, poll, and chosen option all exist.
    pub async fn check(&self, vote: &Vote) -> Result<(), ServiceError> {
        let voters = self.peers.fetch_voters().await.map_err(|e| {
            warn!(error = %e, vote_id = vote.vote_id, "voter list fetch failed, rejecting vote");
            ServiceError::Upstream(e.to_string())
        })?;
        if !voters.iter().any(|v| v.voter_id == vote.voter_id) {
            return Err(ServiceError::not_found("voter", vote.voter_id));
        }

        let polls = self.peers.fetch_polls().await.map_err(|e| {
            warn!(error = %e, vote_id = vote.vote_id, "poll list fetch failed, rejecting vote");
            ServiceError::Upstream(e.to_string())
        })?;
        let poll = polls
            .iter()
            .find(|p| p.poll_id == vote.poll_id)
            .ok_or_else(|| ServiceError::not_found("poll", vote.poll_id))?;
        if poll.option(vote.vote_value).is_none() {
            return Err(ServiceError::not_found("poll option", vote.vote_value));
        }

        Ok(())
    }
}
