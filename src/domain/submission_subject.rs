use crate::domain::validation::{parse_text_field, ValidationError};

const MIN_CHAR_LENGTH: usize = 5;
const MAX_CHAR_LENGTH: usize = 256;

#[derive(Debug, Clone)]
pub struct SubmissionSubject(String);

impl SubmissionSubject {
    pub fn parse(subject: String) -> Result<SubmissionSubject, ValidationError> {
        parse_text_field("subject", subject, MIN_CHAR_LENGTH, MAX_CHAR_LENGTH).map(Self)
    }
}

impl AsRef<str> for SubmissionSubject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
