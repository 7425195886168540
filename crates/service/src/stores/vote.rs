use models::Vote;

use crate::errors::ServiceError;
use crate::storage::{CacheHandle, Documents};

const KEY_PREFIX: &str = "vote:";

/// Vote documents. Referential checks against the voter and poll services
/// happen in the validator before `add` is called, not here.
#[derive(Clone)]
pub struct VoteStore {
    docs: Documents<Vote>,
}

impl VoteStore {
    pub fn new(cache: CacheHandle) -> Self {
        Self { docs: Documents::new(cache, KEY_PREFIX) }
    }

    pub async fn add(&self, vote: Vote) -> Result<Vote, ServiceError> {
        self.docs.insert(vote.vote_id, &vote).await?;
        Ok(vote)
    }

    pub async fn get(&self, vote_id: u32) -> Result<Vote, ServiceError> {
        self.docs.fetch(vote_id).await
    }

    pub async fn list(&self) -> Result<Vec<Vote>, ServiceError> {
        self.docs.list().await
    }

    /// Every vote cast by one voter. An unknown voter yields an empty list.
    pub async fn list_for_voter(&self, voter_id: u32) -> Result<Vec<Vote>, ServiceError> {
        let mut votes = self.docs.list().await?;
        votes.retain(|v| v.voter_id == voter_id);
        Ok(votes)
    }

    pub async fn delete(&self, vote_id: u32) -> Result<(), ServiceError> {
        self.docs.delete(vote_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryCache;
    use std::sync::Arc;

    fn store() -> VoteStore {
        VoteStore::new(Arc::new(MemoryCache::new()))
    }

    #[tokio::test]
    async fn add_get_list_delete() {
        let store = store();
        let vote = Vote::new(100, 1, 10, 1);
        store.add(vote.clone()).await.unwrap();

        assert_eq!(store.get(100).await.unwrap(), vote);
        assert_eq!(store.list().await.unwrap(), vec![vote]);

        store.delete(100).await.unwrap();
        assert!(matches!(store.get(100).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn listing_by_voter_filters_other_voters_out() {
        let store = store();
        store.add(Vote::new(100, 1, 10, 1)).await.unwrap();
        store.add(Vote::new(101, 2, 10, 2)).await.unwrap();
        store.add(Vote::new(102, 1, 11, 1)).await.unwrap();

        let mut ids: Vec<u32> = store
            .list_for_voter(1)
            .await
            .unwrap()
            .iter()
            .map(|v| v.vote_id)
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![100, 102]);

        assert!(store.list_for_voter(9).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_vote_id_is_conflict() {
        let store = store();
        store.add(Vote::new(100, 1, 10, 1)).await.unwrap();

        let dup = store.add(Vote::new(100, 2, 10, 2)).await;
        assert!(matches!(dup, Err(ServiceError::AlreadyExists(_))));
        assert_eq!(store.get(100).await.unwrap().voter_id, 1);
    }
}
