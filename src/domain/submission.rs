use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::new_submission::NewSubmission;
use crate::domain::pagination::Pagination;

/// A stored contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

impl Submission {
    /// Builds the record a store persists for `new_submission`. New records
    /// are always unread.
    pub fn new(new_submission: &NewSubmission, id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new_submission.name.as_ref().to_string(),
            email: new_submission.email.as_ref().to_string(),
            subject: new_submission.subject.as_ref().to_string(),
            message: new_submission.message.as_ref().to_string(),
            created_at,
            read: false,
        }
    }
}

/// One page of submissions, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionPage {
    pub contacts: Vec<Submission>,
    pub pagination: Pagination,
}
