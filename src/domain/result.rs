//! Result type alias for lexmask

use super::errors::LexmaskError;

/// Result type alias for lexmask operations
///
/// # Examples
///
/// ```
/// use lexmask::domain::result::Result;
/// use lexmask::domain::errors::LexmaskError;
///
/// fn failing_function() -> Result<()> {
///     Err(LexmaskError::Other("nothing to do".to_string()))
/// }
///
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, LexmaskError>;
