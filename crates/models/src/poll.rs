use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PollOption {
    pub option_id: u32,
    pub text: String,
}

/// A poll and its answer options. Option ids are unique within a poll.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Poll {
    pub poll_id: u32,
    pub title: String,
    pub question: String,
    #[serde(default)]
    pub options: Vec<PollOption>,
}

/// Update payload for a poll. `options: None` keeps the stored options;
/// `Some(vec![])` clears them explicitly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PollUpdate {
    pub title: String,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<PollOption>>,
}

impl Poll {
    pub fn new(poll_id: u32, title: impl Into<String>, question: impl Into<String>) -> Self {
        Self { poll_id, title: title.into(), question: question.into(), options: Vec::new() }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        validate_options(&self.options)
    }

    /// Linear scan of the option list for a matching id.
    pub fn option(&self, option_id: u32) -> Option<&PollOption> {
        self.options.iter().find(|o| o.option_id == option_id)
    }
}

pub fn validate_options(options: &[PollOption]) -> Result<(), ModelError> {
    let mut seen = Vec::with_capacity(options.len());
    for option in options {
        if seen.contains(&option.option_id) {
            return Err(ModelError::invalid(
                "poll",
                format!("duplicate option id {}", option.option_id),
            ));
        }
        seen.push(option.option_id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poll_with_options(ids: &[u32]) -> Poll {
        let mut poll = Poll::new(1, "Lunch", "Where to?");
        poll.options = ids
            .iter()
            .map(|&id| PollOption { option_id: id, text: format!("option {id}") })
            .collect();
        poll
    }

    #[test]
    fn option_ids_must_be_unique() {
        assert!(poll_with_options(&[1, 2, 3]).validate().is_ok());
        assert!(poll_with_options(&[1, 2, 1]).validate().is_err());
    }

    #[test]
    fn option_lookup_scans_by_id() {
        let poll = poll_with_options(&[1, 2]);
        assert_eq!(poll.option(2).map(|o| o.option_id), Some(2));
        assert!(poll.option(9).is_none());
    }
}
