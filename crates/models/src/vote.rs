use serde::{Deserialize, Serialize};

/// A cast vote. References a voter, a poll, and the chosen option by id;
/// the references are resolved by the vote service at submission time.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vote {
    pub vote_id: u32,
    pub voter_id: u32,
    pub poll_id: u32,
    pub vote_value: u32,
}

impl Vote {
    pub fn new(vote_id: u32, voter_id: u32, poll_id: u32, vote_value: u32) -> Self {
        Self { vote_id, voter_id, poll_id, vote_value }
    }
}
