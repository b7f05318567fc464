use crate::domain::validation::{parse_text_field, ValidationError};

const MIN_CHAR_LENGTH: usize = 2;
const MAX_CHAR_LENGTH: usize = 256;

#[derive(Debug, Clone)]
pub struct SubmitterName(String);

impl SubmitterName {
    pub fn parse(name: String) -> Result<SubmitterName, ValidationError> {
        parse_text_field("name", name, MIN_CHAR_LENGTH, MAX_CHAR_LENGTH).map(Self)
    }
}

impl AsRef<str> for SubmitterName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
