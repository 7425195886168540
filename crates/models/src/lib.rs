pub mod errors;
pub mod poll;
pub mod vote;
pub mod voter;

pub use poll::{Poll, PollOption, PollUpdate};
pub use vote::Vote;
pub use voter::{Voter, VoterPoll, VoterUpdate};
