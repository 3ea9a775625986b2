//! Validation of dot-separated paths.

use crate::{components, PathError};

/// Maximum allowed number of components in a path.
pub const MAX_PATH_DEPTH: usize = 256;

/// Validate a path string.
///
/// # Errors
///
/// Returns an error if:
/// - The path is empty
/// - Any component is empty (`a..b`, a leading or trailing `.`)
/// - The path has more than [`MAX_PATH_DEPTH`] components
///
/// List components are not checked here: whether a component is a list step
/// depends on the tree it is resolved against.
///
/// # Example
///
/// ```
/// use arbor_path::validate_path;
///
/// validate_path("childNodes.0:div.id").unwrap();
/// validate_path("").unwrap_err();
/// validate_path("a..b").unwrap_err();
/// ```
pub fn validate_path(path: &str) -> Result<(), PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    let mut depth = 0;
    for component in components(path) {
        if component.is_empty() {
            return Err(PathError::EmptyComponent);
        }
        depth += 1;
        if depth > MAX_PATH_DEPTH {
            return Err(PathError::TooDeep);
        }
    }
    Ok(())
}
