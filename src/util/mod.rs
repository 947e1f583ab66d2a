//! Utility functions for common operations.
//!
//! - **URL validation**: policy for the catalog API base URL
//! - **Text processing**: Unicode-aware width, truncation and sanitizing of
//!   remote text before it reaches the terminal

mod text;
mod url_validator;

pub use text::{display_width, strip_control_chars, truncate_to_width};
pub use url_validator::{validate_base_url, UrlValidationError};

/// Maximum search box length, enforced by the input handler
pub const MAX_SEARCH_QUERY_LENGTH: usize = 256;
