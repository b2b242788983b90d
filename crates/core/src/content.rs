//! Text rules for article and comment content.
//!
//! Length bounds are enforced on the request DTOs; these checks cover what a
//! plain length rule cannot express.

use crate::error::CoreError;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_ARTICLE_BODY_LEN: usize = 20_000;
pub const MAX_COMMENT_BODY_LEN: usize = 2_000;

/// Trim a title, rejecting one that is blank or too long once trimmed.
pub fn normalize_title(title: &str) -> Result<String, CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Title must not be blank".into()));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Reject a body made only of whitespace.
pub fn require_body(body: &str) -> Result<(), CoreError> {
    if body.trim().is_empty() {
        return Err(CoreError::Validation("Body must not be blank".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_trimmed() {
        assert_eq!(normalize_title("  Hello  ").unwrap(), "Hello");
    }

    #[test]
    fn blank_title_rejected() {
        assert!(matches!(normalize_title("   "), Err(CoreError::Validation(_))));
    }

    #[test]
    fn over_long_title_rejected() {
        let title = "x".repeat(MAX_TITLE_LEN + 1);
        assert!(normalize_title(&title).is_err());
        assert!(normalize_title(&format!("  {}  ", "x".repeat(MAX_TITLE_LEN))).is_ok());
    }

    #[test]
    fn blank_body_rejected() {
        assert!(require_body("\n\t ").is_err());
        assert!(require_body("hi").is_ok());
    }
}
