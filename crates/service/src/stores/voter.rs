use chrono::Utc;
use models::{Voter, VoterPoll, VoterUpdate};

use crate::errors::ServiceError;
use crate::storage::{CacheHandle, Documents};

const KEY_PREFIX: &str = "voter:";
const HISTORY_ENTITY: &str = "history entry for poll";

/// Voter documents plus vote-history sub-entity operations.
///
/// History mutations are read-modify-write: fetch the voter, scan the
/// history list, mutate the copy, write the whole document back. Concurrent
/// writers to the same voter can lose updates; there is no locking here.
#[derive(Clone)]
pub struct VoterStore {
    docs: Documents<Voter>,
}

impl VoterStore {
    pub fn new(cache: CacheHandle) -> Self {
        Self { docs: Documents::new(cache, KEY_PREFIX) }
    }

    pub async fn add(&self, voter: Voter) -> Result<Voter, ServiceError> {
        voter.validate()?;
        self.docs.insert(voter.voter_id, &voter).await?;
        Ok(voter)
    }

    pub async fn get(&self, voter_id: u32) -> Result<Voter, ServiceError> {
        self.docs.fetch(voter_id).await
    }

    pub async fn list(&self) -> Result<Vec<Voter>, ServiceError> {
        self.docs.list().await
    }

    /// Overwrite names; history follows the payload's intent — omitted
    /// keeps the stored history, an explicit list (even empty) replaces it.
    pub async fn update(&self, voter_id: u32, update: VoterUpdate) -> Result<Voter, ServiceError> {
        let mut voter = self.docs.fetch(voter_id).await?;
        voter.first_name = update.first_name;
        voter.last_name = update.last_name;
        if let Some(history) = update.vote_history {
            voter.vote_history = history;
            voter.validate()?;
        }
        self.docs.replace(voter_id, &voter).await?;
        Ok(voter)
    }

    pub async fn delete(&self, voter_id: u32) -> Result<(), ServiceError> {
        self.docs.delete(voter_id).await
    }

    pub async fn history(&self, voter_id: u32) -> Result<Vec<VoterPoll>, ServiceError> {
        Ok(self.docs.fetch(voter_id).await?.vote_history)
    }

    pub async fn history_entry(
        &self,
        voter_id: u32,
        poll_id: u32,
    ) -> Result<VoterPoll, ServiceError> {
        self.docs
            .fetch(voter_id)
            .await?
            .vote_history
            .into_iter()
            .find(|entry| entry.poll_id == poll_id)
            .ok_or_else(|| ServiceError::not_found(HISTORY_ENTITY, poll_id))
    }

    /// Record participation in a poll, stamped with the current time.
    pub async fn add_history(&self, voter_id: u32, poll_id: u32) -> Result<VoterPoll, ServiceError> {
        let mut voter = self.docs.fetch(voter_id).await?;
        if voter.vote_history.iter().any(|entry| entry.poll_id == poll_id) {
            return Err(ServiceError::already_exists(HISTORY_ENTITY, poll_id));
        }
        let entry = VoterPoll { poll_id, vote_date: Utc::now() };
        voter.vote_history.push(entry.clone());
        self.docs.replace(voter_id, &voter).await?;
        Ok(entry)
    }

    /// Re-stamp an existing history entry with the current time.
    pub async fn refresh_history(
        &self,
        voter_id: u32,
        poll_id: u32,
    ) -> Result<VoterPoll, ServiceError> {
        let mut voter = self.docs.fetch(voter_id).await?;
        let entry = voter
            .vote_history
            .iter_mut()
            .find(|entry| entry.poll_id == poll_id)
            .ok_or_else(|| ServiceError::not_found(HISTORY_ENTITY, poll_id))?;
        entry.vote_date = Utc::now();
        let refreshed = entry.clone();
        self.docs.replace(voter_id, &voter).await?;
        Ok(refreshed)
    }

    pub async fn remove_history(&self, voter_id: u32, poll_id: u32) -> Result<(), ServiceError> {
        let mut voter = self.docs.fetch(voter_id).await?;
        let before = voter.vote_history.len();
        voter.vote_history.retain(|entry| entry.poll_id != poll_id);
        if voter.vote_history.len() == before {
            return Err(ServiceError::not_found(HISTORY_ENTITY, poll_id));
        }
        self.docs.replace(voter_id, &voter).await?;
        Ok(())
    }
}
