use unicode_segmentation::UnicodeSegmentation;

/// Reasons a contact form submission is rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("All fields are required: {0} is missing")]
    MissingField(&'static str),
    #[error("Invalid {0} format")]
    InvalidFormat(&'static str),
    #[error("The {field} must be at least {min} characters long")]
    TooShort { field: &'static str, min: usize },
    #[error("The {field} must be at most {max} characters long")]
    TooLong { field: &'static str, max: usize },
}

/// Trims a free text field and checks its length in grapheme clusters.
pub(crate) fn parse_text_field(
    field: &'static str,
    value: String,
    min: usize,
    max: usize,
) -> Result<String, ValidationError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }

    let length = value.graphemes(true).count();

    if length < min {
        return Err(ValidationError::TooShort { field, min });
    }

    if length > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(value.to_string())
}
