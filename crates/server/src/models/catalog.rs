//! Category and brand domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tindahan_core::{BrandId, CategoryId};

/// A product category.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// URL slug (unique).
    pub slug: String,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
    /// When the category was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A product brand.
#[derive(Debug, Clone, Serialize)]
pub struct Brand {
    /// Unique brand ID.
    pub id: BrandId,
    /// Display name.
    pub name: String,
    /// URL slug (unique).
    pub slug: String,
    /// When the brand was created.
    pub created_at: DateTime<Utc>,
    /// When the brand was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or updating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryInput {
    /// Display name; the slug is derived from it when absent.
    pub name: String,
    /// Explicit slug override.
    pub slug: Option<String>,
}

/// Input for creating or updating a brand.
#[derive(Debug, Deserialize)]
pub struct CreateBrandInput {
    /// Display name; the slug is derived from it when absent.
    pub name: String,
    /// Explicit slug override.
    pub slug: Option<String>,
}

/// Derive a URL slug from a display name (lowercase, hyphens).
#[must_use]
pub fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Skin Care"), "skin-care");
        assert_eq!(slugify("  Hair & Body  "), "hair-body");
        assert_eq!(slugify("ALREADY-SLUG"), "already-slug");
    }
}
