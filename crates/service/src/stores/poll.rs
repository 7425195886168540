use models::{poll::validate_options, Poll, PollOption, PollUpdate};

use crate::errors::ServiceError;
use crate::storage::{CacheHandle, Documents};

const KEY_PREFIX: &str = "poll:";
const OPTION_ENTITY: &str = "poll option";

/// Poll documents plus option sub-entity operations.
///
/// Option mutations rewrite the whole poll document, same caveat as the
/// voter history ops: not atomic under concurrent writers.
#[derive(Clone)]
pub struct PollStore {
    docs: Documents<Poll>,
}

impl PollStore {
    pub fn new(cache: CacheHandle) -> Self {
        Self { docs: Documents::new(cache, KEY_PREFIX) }
    }

    pub async fn add(&self, poll: Poll) -> Result<Poll, ServiceError> {
        poll.validate()?;
        self.docs.insert(poll.poll_id, &poll).await?;
        Ok(poll)
    }

    pub async fn get(&self, poll_id: u32) -> Result<Poll, ServiceError> {
        self.docs.fetch(poll_id).await
    }

    pub async fn list(&self) -> Result<Vec<Poll>, ServiceError> {
        self.docs.list().await
    }

    /// Overwrite title and question; options follow the payload's intent —
    /// omitted keeps the stored options, an explicit list replaces them.
    pub async fn update(&self, poll_id: u32, update: PollUpdate) -> Result<Poll, ServiceError> {
        let mut poll = self.docs.fetch(poll_id).await?;
        poll.title = update.title;
        poll.question = update.question;
        if let Some(options) = update.options {
            validate_options(&options)?;
            poll.options = options;
        }
        self.docs.replace(poll_id, &poll).await?;
        Ok(poll)
    }

    pub async fn delete(&self, poll_id: u32) -> Result<(), ServiceError> {
        self.docs.delete(poll_id).await
    }

    pub async fn add_option(&self, poll_id: u32, option: PollOption) -> Result<Poll, ServiceError> {
        let mut poll = self.docs.fetch(poll_id).await?;
        if poll.option(option.option_id).is_some() {
            return Err(ServiceError::already_exists(OPTION_ENTITY, option.option_id));
        }
        poll.options.push(option);
        self.docs.replace(poll_id, &poll).await?;
        Ok(poll)
    }

    pub async fn remove_option(&self, poll_id: u32, option_id: u32) -> Result<Poll, ServiceError> {
        let mut poll = self.docs.fetch(poll_id).await?;
        let before = poll.options.len();
        poll.options.retain(|option| option.option_id != option_id);
        if poll.options.len() == before {
            return Err(ServiceError::not_found(OPTION_ENTITY, option_id));
        }
        self.docs.replace(poll_id, &poll).await?;
        Ok(poll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryCache;
    use std::sync::Arc;

    fn store() -> PollStore {
        PollStore::new(Arc::new(MemoryCache::new()))
    }

    fn lunch_poll() -> Poll {
        let mut poll = Poll::new(10, "Lunch", "Where should we eat?");
        poll.options = vec![
            PollOption { option_id: 1, text: "Tacos".into() },
            PollOption { option_id: 2, text: "Ramen".into() },
        ];
        poll
    }

    #[tokio::test]
    async fn add_then_get_returns_equal_poll() {
        let store = store();
        let poll = lunch_poll();
        store.add(poll.clone()).await.unwrap();
        assert_eq!(store.get(10).await.unwrap(), poll);
    }

    #[tokio::test]
    async fn add_rejects_duplicate_option_ids() {
        let store = store();
        let mut poll = lunch_poll();
        poll.options.push(PollOption { option_id: 1, text: "Pizza".into() });

        assert!(matches!(store.add(poll).await, Err(ServiceError::Model(_))));
        assert!(matches!(store.get(10).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn duplicate_poll_id_is_conflict() {
        let store = store();
        store.add(lunch_poll()).await.unwrap();
        assert!(matches!(
            store.add(Poll::new(10, "Other", "Other?")).await,
            Err(ServiceError::AlreadyExists(_))
        ));
        assert_eq!(store.get(10).await.unwrap().title, "Lunch");
    }

    #[tokio::test]
    async fn update_without_options_preserves_them() {
        let store = store();
        store.add(lunch_poll()).await.unwrap();

        let update = PollUpdate {
            title: "Dinner".into(),
            question: "Where to eat tonight?".into(),
            options: None,
        };
        let updated = store.update(10, update).await.unwrap();
        assert_eq!(updated.title, "Dinner");
        assert_eq!(updated.options.len(), 2);
    }

    #[tokio::test]
    async fn update_with_explicit_options_replaces_them() {
        let store = store();
        store.add(lunch_poll()).await.unwrap();

        let update = PollUpdate {
            title: "Lunch".into(),
            question: "Where should we eat?".into(),
            options: Some(vec![PollOption { option_id: 5, text: "Sushi".into() }]),
        };
        let updated = store.update(10, update).await.unwrap();
        assert_eq!(updated.options.len(), 1);
        assert_eq!(updated.options[0].option_id, 5);
    }

    #[tokio::test]
    async fn option_add_and_remove() {
        let store = store();
        store.add(lunch_poll()).await.unwrap();

        let dup = store
            .add_option(10, PollOption { option_id: 1, text: "Pizza".into() })
            .await;
        assert!(matches!(dup, Err(ServiceError::AlreadyExists(_))));

        let poll = store
            .add_option(10, PollOption { option_id: 3, text: "Pizza".into() })
            .await
            .unwrap();
        assert_eq!(poll.options.len(), 3);

        let poll = store.remove_option(10, 3).await.unwrap();
        assert_eq!(poll.options.len(), 2);
        assert!(matches!(
            store.remove_option(10, 3).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn option_ops_on_missing_poll_are_not_found() {
        let store = store();
        assert!(matches!(
            store.add_option(77, PollOption { option_id: 1, text: "X".into() }).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            store.remove_option(77, 1).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_removes_the_poll() {
        let store = store();
        store.add(lunch_poll()).await.unwrap();
        store.delete(10).await.unwrap();
        assert!(matches!(store.get(10).await, Err(ServiceError::NotFound(_))));
        assert!(store.list().await.unwrap().is_empty());
    }
}
