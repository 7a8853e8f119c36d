//! Request-boundary checks.
//!
//! The transport layer is expected to reject out-of-bounds input before
//! dispatching into the core; these helpers are the single source of truth
//! for those bounds, and the registry applies them defensively as well.

use crate::error::AnalysisError;

pub const MAX_TEXT_CHARS: usize = 5000;
pub const MAX_SUMMARY_CHARS: usize = 500;
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;
pub const MAX_BATCH_ITEMS: usize = 100;

/// Review text must be 1..=5000 characters.
pub fn review_text(text: &str) -> Result<(), AnalysisError> {
    let n = text.chars().count();
    if n == 0 {
        return Err(AnalysisError::InvalidInput(
            "text must not be empty".to_string(),
        ));
    }
    if n > MAX_TEXT_CHARS {
        return Err(AnalysisError::InvalidInput(format!(
            "text is {n} characters, maximum is {MAX_TEXT_CHARS}"
        )));
    }
    Ok(())
}

/// Optional summary must be at most 500 characters.
pub fn summary(summary: Option<&str>) -> Result<(), AnalysisError> {
    if let Some(s) = summary {
        let n = s.chars().count();
        if n > MAX_SUMMARY_CHARS {
            return Err(AnalysisError::InvalidInput(format!(
                "summary is {n} characters, maximum is {MAX_SUMMARY_CHARS}"
            )));
        }
    }
    Ok(())
}

/// Rating, when supplied, must be 1..=5.
pub fn rating(rating: Option<u8>) -> Result<(), AnalysisError> {
    if let Some(r) = rating {
        if !(MIN_RATING..=MAX_RATING).contains(&r) {
            return Err(AnalysisError::InvalidInput(format!(
                "rating {r} is outside {MIN_RATING}..={MAX_RATING}"
            )));
        }
    }
    Ok(())
}

/// Batch requests carry 1..=100 items.
pub fn batch_size(len: usize) -> Result<(), AnalysisError> {
    if len == 0 {
        return Err(AnalysisError::InvalidInput(
            "batch must contain at least one text".to_string(),
        ));
    }
    if len > MAX_BATCH_ITEMS {
        return Err(AnalysisError::InvalidInput(format!(
            "batch has {len} items, maximum is {MAX_BATCH_ITEMS}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_bounds() {
        assert!(review_text("x").is_ok());
        assert!(review_text(&"x".repeat(MAX_TEXT_CHARS)).is_ok());
        assert_eq!(review_text("").unwrap_err().kind(), "invalid_input");
        assert_eq!(
            review_text(&"x".repeat(MAX_TEXT_CHARS + 1)).unwrap_err().kind(),
            "invalid_input"
        );
    }

    #[test]
    fn summary_bounds() {
        assert!(summary(None).is_ok());
        assert!(summary(Some("")).is_ok());
        assert!(summary(Some(&"s".repeat(MAX_SUMMARY_CHARS))).is_ok());
        assert!(summary(Some(&"s".repeat(MAX_SUMMARY_CHARS + 1))).is_err());
    }

    #[test]
    fn rating_bounds() {
        assert!(rating(None).is_ok());
        assert!(rating(Some(1)).is_ok());
        assert!(rating(Some(5)).is_ok());
        assert!(rating(Some(0)).is_err());
        assert!(rating(Some(6)).is_err());
    }

    #[test]
    fn batch_bounds() {
        assert!(batch_size(1).is_ok());
        assert!(batch_size(MAX_BATCH_ITEMS).is_ok());
        assert!(batch_size(0).is_err());
        assert!(batch_size(MAX_BATCH_ITEMS + 1).is_err());
    }
}
