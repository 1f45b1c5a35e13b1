//! Test submissions and history.
//!
//! Sits between the HTTP layer and the scoring core: tallies submitted
//! answers, turns them into a [`TestReport`], and summarizes a user's stored
//! history, estimating IQs for entries recorded without one.

mod history;
mod report;
mod tally;

pub use history::{HistoryEntry, HistorySummary, interpretation};
pub use report::{TestReport, TestSubmission};
pub use tally::{AnswerOutcome, AnswerRecord, SubmissionTally, TIMED_OUT_OPTION};
