//! Category Model
//!
//! Categories are plain strings, unique within the list. The sentinel
//! `"All"` is always present and can never be deleted; it is the
//! public page's "show everything" filter, not a real category.

/// Reserved category that always exists and cannot be deleted.
pub const RESERVED_CATEGORY: &str = "All";

/// The category list a fresh installation starts with.
pub fn default_categories() -> Vec<String> {
    vec![RESERVED_CATEGORY.to_string()]
}

/// Ensure the reserved category is present and first.
pub fn with_reserved(mut categories: Vec<String>) -> Vec<String> {
    categories.retain(|c| c != RESERVED_CATEGORY);
    categories.insert(0, RESERVED_CATEGORY.to_string());
    categories
}
