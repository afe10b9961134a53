use crate::server::error::AppError;

/// Parses an entity id from a path segment.
///
/// Ids are server-assigned auto-increment values, so only positive integers are accepted.
///
/// # Arguments
/// - `value` - The raw path segment
///
/// # Returns
/// - `Ok(i32)` - Successfully parsed positive id
/// - `Err(AppError::BadRequest)` - The segment is not a positive integer
pub fn parse_id(value: &str) -> Result<i32, AppError> {
    match value.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::BadRequest(format!(
            "Invalid id '{}': expected a positive integer",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests parsing a well-formed id.
    ///
    /// Expected: Ok with the numeric id
    #[test]
    fn test_parse_valid_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
    }

    /// Tests rejecting ids that are not positive integers.
    ///
    /// Verifies that text, zero, negative numbers and values overflowing `i32` are refused.
    ///
    /// Expected: Err(BadRequest) for every input
    #[test]
    fn test_parse_invalid_ids() {
        for raw in ["abc", "0", "-3", "1.5", "", "99999999999"] {
            assert!(
                matches!(parse_id(raw), Err(AppError::BadRequest(_))),
                "expected '{}' to be rejected",
                raw
            );
        }
    }
}
