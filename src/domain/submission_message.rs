use crate::domain::validation::{parse_text_field, ValidationError};

const MIN_CHAR_LENGTH: usize = 10;
const MAX_CHAR_LENGTH: usize = 5000;

#[derive(Debug, Clone)]
pub struct SubmissionMessage(String);

impl SubmissionMessage {
    pub fn parse(message: String) -> Result<SubmissionMessage, ValidationError> {
        parse_text_field("message", message, MIN_CHAR_LENGTH, MAX_CHAR_LENGTH).map(Self)
    }
}

impl AsRef<str> for SubmissionMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
