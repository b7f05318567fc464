use serde::Deserialize;

use crate::domain::submission_message::SubmissionMessage;
use crate::domain::submission_subject::SubmissionSubject;
use crate::domain::submitter_email::SubmitterEmail;
use crate::domain::submitter_name::SubmitterName;
use crate::domain::validation::ValidationError;

/// A submission that passed validation and can be handed to the store.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub name: SubmitterName,
    pub email: SubmitterEmail,
    pub subject: SubmissionSubject,
    pub message: SubmissionMessage,
}

/// Raw contact form payload. Every field is optional so a missing field is
/// reported as a validation error rather than a malformed body.
#[derive(Deserialize, Debug, Default)]
pub struct NewSubmissionBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl TryFrom<NewSubmissionBody> for NewSubmission {
    type Error = ValidationError;

    fn try_from(body: NewSubmissionBody) -> Result<Self, Self::Error> {
        let name = SubmitterName::parse(required("name", body.name)?)?;
        let email = SubmitterEmail::parse(required("email", body.email)?)?;
        let subject = SubmissionSubject::parse(required("subject", body.subject)?)?;
        let message = SubmissionMessage::parse(required("message", body.message)?)?;

        Ok(NewSubmission {
            name,
            email,
            subject,
            message,
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    value.ok_or(ValidationError::MissingField(field))
}
