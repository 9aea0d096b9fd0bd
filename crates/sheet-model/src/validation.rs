//! Content validation helpers

use crate::error::ValidationError;

/// Check whether text has any non-whitespace content
#[inline]
#[must_use]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Validate a row title
///
/// # Errors
/// [`ValidationError::EmptyTitle`] when the title is blank.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if is_blank(title) {
        Err(ValidationError::EmptyTitle)
    } else {
        Ok(())
    }
}

/// Validate chat text
///
/// # Errors
/// [`ValidationError::EmptyMessage`] when the text is blank.
pub fn validate_message(text: &str) -> Result<(), ValidationError> {
    if is_blank(text) {
        Err(ValidationError::EmptyMessage)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\n"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn title_and_message_checks() {
        assert_eq!(validate_title("  "), Err(ValidationError::EmptyTitle));
        assert!(validate_title("Check-in").is_ok());
        assert_eq!(validate_message("   "), Err(ValidationError::EmptyMessage));
        assert!(validate_message("hi").is_ok());
    }
}
