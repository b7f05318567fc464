use unicode_segmentation::UnicodeSegmentation;
use validator::validate_email;

use crate::domain::validation::ValidationError;

const MAX_CHAR_LENGTH: usize = 320;

#[derive(Debug, Clone)]
pub struct SubmitterEmail(String);

impl SubmitterEmail {
    pub fn parse(email: String) -> Result<SubmitterEmail, ValidationError> {
        let email = email.trim();

        if email.is_empty() {
            return Err(ValidationError::MissingField("email"));
        }

        if email.graphemes(true).count() > MAX_CHAR_LENGTH {
            return Err(ValidationError::TooLong {
                field: "email",
                max: MAX_CHAR_LENGTH,
            });
        }

        if !has_address_shape(email) || !validate_email(email) {
            return Err(ValidationError::InvalidFormat("email"));
        }

        Ok(Self(email.to_string()))
    }
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dotted domain.
fn has_address_shape(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    !local.is_empty() && domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

impl AsRef<str> for SubmitterEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
