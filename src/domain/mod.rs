//! Per-item result records exchanged between the client, the scheduler
//! and the aggregator.
mod poll;
mod submission;


pub use poll::{PollResult, StatusCheck};
pub use submission::SubmissionResult;
