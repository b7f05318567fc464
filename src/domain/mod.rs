pub mod new_submission;
pub mod pagination;
pub mod submission;
pub mod submission_message;
pub mod submission_subject;
pub mod submitter_email;
pub mod submitter_name;
pub mod validation;

pub use new_submission::{NewSubmission, NewSubmissionBody};
pub use pagination::{PageRequest, Pagination};
pub use submission::{Submission, SubmissionPage};
pub use submission_message::SubmissionMessage;
pub use submission_subject::SubmissionSubject;
pub use submitter_email::SubmitterEmail;
pub use submitter_name::SubmitterName;
pub use validation::ValidationError;
