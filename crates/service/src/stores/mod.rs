pub mod poll;
pub mod vote;
pub mod voter;

pub use poll::PollStore;
pub use vote::VoteStore;
pub use voter::VoterStore;
