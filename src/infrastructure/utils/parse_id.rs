use crate::errors::AppError;

/// Parses a positive integer primary key from a path segment.
pub fn parse_id(id: &str) -> Result<i32, AppError> {
    id.trim()
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::InvalidInput("Invalid ID format".to_string()))
}
