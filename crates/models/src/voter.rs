use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// One entry in a voter's participation history.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoterPoll {
    pub poll_id: u32,
    pub vote_date: DateTime<Utc>,
}

/// A registered voter and the polls they have participated in.
/// History entries are unique by poll id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Voter {
    pub voter_id: u32,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub vote_history: Vec<VoterPoll>,
}

/// Update payload for a voter. `vote_history: None` (field omitted) keeps
/// the stored history; `Some(vec![])` clears it explicitly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoterUpdate {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_history: Option<Vec<VoterPoll>>,
}

impl Voter {
    pub fn new(voter_id: u32, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            voter_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            vote_history: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        let mut seen = Vec::with_capacity(self.vote_history.len());
        for entry in &self.vote_history {
            if seen.contains(&entry.poll_id) {
                return Err(ModelError::invalid(
                    "voter",
                    format!("duplicate poll id {} in vote history", entry.poll_id),
                ));
            }
            seen.push(entry.poll_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_must_be_unique_by_poll_id() {
        let mut voter = Voter::new(1, "Ada", "Lovelace");
        voter.vote_history.push(VoterPoll { poll_id: 7, vote_date: Utc::now() });
        voter.vote_history.push(VoterPoll { poll_id: 7, vote_date: Utc::now() });
        assert!(voter.validate().is_err());

        voter.vote_history.pop();
        assert!(voter.validate().is_ok());
    }

    #[test]
    fn update_payload_distinguishes_omitted_from_empty_history() {
        let omitted: VoterUpdate =
            serde_json::from_str(r#"{"first_name":"A","last_name":"B"}"#).unwrap();
        assert!(omitted.vote_history.is_none());

        let cleared: VoterUpdate =
            serde_json::from_str(r#"{"first_name":"A","last_name":"B","vote_history":[]}"#)
                .unwrap();
        assert_eq!(cleared.vote_history, Some(Vec::new()));
    }
}
