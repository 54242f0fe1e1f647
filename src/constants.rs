//! Constants for link rendering.

/// Base URI used when none is configured.
pub const DEFAULT_BASE_URI: &str = "http://localhost";

/// Separator between path and query string.
pub const QUERY_SEPARATOR: char = '?';

/// Separator between query parameters.
pub const PARAM_SEPARATOR: char = '&';

/// Separator between elements of a collection bound to one path variable.
pub const ELEMENT_SEPARATOR: &str = ",";
