// Publication: the gate the post-creation workflow calls before persisting.

pub mod gate;
pub mod submission;

pub use gate::{ModerationRecord, PublicationDecision, PublicationGate};
pub use submission::{ActionType, Submission, SubmissionError};
