//! Database operations for categories and brands.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tindahan_core::{BrandId, CategoryId};

use super::RepositoryError;
use crate::models::catalog::{Brand, Category};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i32,
    name: String,
    slug: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            name: row.name,
            slug: row.slug,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BrandRow {
    id: i32,
    name: String,
    slug: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BrandRow> for Brand {
    fn from(row: BrandRow) -> Self {
        Self {
            id: BrandId::new(row.id),
            name: row.name,
            slug: row.slug,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// =============================================================================
// Category Repository
// =============================================================================

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug, created_at, updated_at FROM categories ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a category by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug, created_at, updated_at FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, name: &str, slug: &str) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            INSERT INTO categories (name, slug)
            VALUES ($1, $2)
            RETURNING id, name, slug, created_at, updated_at
            ",
        )
        .bind(name)
        .bind(slug)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_slug_conflict(e, "categories_slug_key"))?;

        Ok(row.into())
    }

    /// Update a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new slug is taken.
    pub async fn update(
        &self,
        id: CategoryId,
        name: &str,
        slug: &str,
    ) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            UPDATE categories
            SET name = $2, slug = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, slug, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(name)
        .bind(slug)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| map_slug_conflict(e, "categories_slug_key"))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a category.
    ///
    /// # Returns
    ///
    /// Returns `true` if the category was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if products still reference it.
    pub async fn delete(&self, id: CategoryId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| map_fk_conflict(e, "category still has products"))?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all categories (dashboard stat).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Brand Repository
// =============================================================================

/// Repository for brand database operations.
pub struct BrandRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BrandRepository<'a> {
    /// Create a new brand repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all brands by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Brand>, RepositoryError> {
        let rows = sqlx::query_as::<_, BrandRow>(
            "SELECT id, name, slug, created_at, updated_at FROM brands ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a brand by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: BrandId) -> Result<Option<Brand>, RepositoryError> {
        let row = sqlx::query_as::<_, BrandRow>(
            "SELECT id, name, slug, created_at, updated_at FROM brands WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a brand.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is already taken.
    pub async fn create(&self, name: &str, slug: &str) -> Result<Brand, RepositoryError> {
        let row = sqlx::query_as::<_, BrandRow>(
            r"
            INSERT INTO brands (name, slug)
            VALUES ($1, $2)
            RETURNING id, name, slug, created_at, updated_at
            ",
        )
        .bind(name)
        .bind(slug)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_slug_conflict(e, "brands_slug_key"))?;

        Ok(row.into())
    }

    /// Update a brand.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the brand doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new slug is taken.
    pub async fn update(
        &self,
        id: BrandId,
        name: &str,
        slug: &str,
    ) -> Result<Brand, RepositoryError> {
        let row = sqlx::query_as::<_, BrandRow>(
            r"
            UPDATE brands
            SET name = $2, slug = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, slug, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(name)
        .bind(slug)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| map_slug_conflict(e, "brands_slug_key"))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a brand.
    ///
    /// # Returns
    ///
    /// Returns `true` if the brand was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if products still reference it.
    pub async fn delete(&self, id: BrandId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM brands WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| map_fk_conflict(e, "brand still has products"))?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all brands (dashboard stat).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM brands")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Error Mapping
// =============================================================================

fn map_slug_conflict(e: sqlx::Error, constraint: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.constraint() == Some(constraint)
    {
        return RepositoryError::Conflict("Slug already taken".to_string());
    }
    RepositoryError::Database(e)
}

fn map_fk_conflict(e: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::Conflict(message.to_string());
    }
    RepositoryError::Database(e)
}
