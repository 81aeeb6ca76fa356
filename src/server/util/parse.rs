//! Input validation helpers shared by the service layer.
//!
//! Each helper returns the validation message on failure; services wrap it in their own
//! `Validation` variant.

/// Checks that a record id is positive.
///
/// # Arguments
/// - `field` - Name of the argument, used in the error message
/// - `id` - Candidate id
///
/// # Returns
/// - `Ok(i32)` - The id unchanged
/// - `Err(String)` - Message describing the invalid id
pub fn require_id(field: &str, id: i32) -> Result<i32, String> {
    if id > 0 {
        Ok(id)
    } else {
        Err(format!("{field} must be a positive id, got {id}"))
    }
}

/// Trims a required text argument and rejects blank input.
pub fn require_text(field: &str, value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(format!("{field} must not be blank"))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Normalises an optional free-text search term; whitespace-only input means no search.
pub fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
}
