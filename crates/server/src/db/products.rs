//! Database operations for products.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use tindahan_core::{BrandId, CategoryId, ProductId};

use super::RepositoryError;
use crate::models::product::{
    CreateProductInput, Product, ProductFilter, ProductSort, UpdateProductInput,
};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    slug: String,
    sku: Option<String>,
    description: Option<String>,
    price: Decimal,
    quantity: i32,
    category_id: i32,
    brand_id: Option<i32>,
    is_active: bool,
    is_featured: bool,
    in_stock: bool,
    on_sale: bool,
    discount_percentage: Option<Decimal>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            slug: row.slug,
            sku: row.sku,
            description: row.description,
            price: row.price,
            quantity: row.quantity,
            category_id: CategoryId::new(row.category_id),
            brand_id: row.brand_id.map(BrandId::new),
            is_active: row.is_active,
            is_featured: row.is_featured,
            in_stock: row.in_stock,
            on_sale: row.on_sale,
            discount_percentage: row.discount_percentage,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// Prefixed for queries that join categories (both tables have a `name`).
const PRODUCT_COLUMNS_QUALIFIED: &str =
    "p.id, p.name, p.slug, p.sku, p.description, p.price, p.quantity, \
     p.category_id, p.brand_id, p.is_active, p.is_featured, p.in_stock, p.on_sale, \
     p.discount_percentage, p.created_at, p.updated_at";

const PRODUCT_COLUMNS: &str = "id, name, slug, sku, description, price, quantity, \
     category_id, brand_id, is_active, is_featured, in_stock, on_sale, \
     discount_percentage, created_at, updated_at";

/// A page of products with the total match count.
#[derive(Debug)]
pub struct ProductPage {
    /// The page of products.
    pub products: Vec<Product>,
    /// Total rows matching the filter, across all pages.
    pub total: i64,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub per_page: u32,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products with filtering, sorting, and pagination.
    ///
    /// `only_active` restricts to sellable products (the storefront view);
    /// the admin view passes `false` to see everything.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        filter: &ProductFilter,
        only_active: bool,
    ) -> Result<ProductPage, RepositoryError> {
        let page = filter.page.unwrap_or(1).max(1);
        let per_page = filter.per_page.unwrap_or(12).clamp(1, 100);
        let offset = page_offset(page, per_page);

        let search = filter
            .search
            .as_ref()
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{s}%"));
        let category = filter
            .category
            .as_ref()
            .filter(|c| !c.is_empty() && c.as_str() != "ALL");

        // ORDER BY cannot be a bind parameter; the clause comes from a
        // fixed set of strings, never from user input.
        let order_clause = match filter.sort {
            ProductSort::Az => "p.name ASC",
            ProductSort::PriceLowHigh => "p.price ASC",
            ProductSort::PriceHighLow => "p.price DESC",
            ProductSort::Featured => "p.is_featured DESC, p.created_at DESC",
            ProductSort::Newest => "p.created_at DESC",
        };

        let where_clause = "($1::bool = false OR p.is_active)
                AND ($2::text IS NULL
                     OR p.name ILIKE $2 OR p.description ILIKE $2 OR p.sku ILIKE $2)
                AND ($3::text IS NULL OR c.name = $3)";

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS_QUALIFIED}
             FROM products p
             LEFT JOIN categories c ON c.id = p.category_id
             WHERE {where_clause}
             ORDER BY {order_clause}
             LIMIT $4 OFFSET $5"
        );

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(only_active)
            .bind(search.as_deref())
            .bind(category)
            .bind(i64::from(per_page))
            .bind(offset)
            .fetch_all(self.pool)
            .await?;

        let count_sql = format!(
            "SELECT COUNT(*)
             FROM products p
             LEFT JOIN categories c ON c.id = p.category_id
             WHERE {where_clause}"
        );
        let (total,): (i64,) = sqlx::query_as(&count_sql)
            .bind(only_active)
            .bind(search.as_deref())
            .bind(category)
            .fetch_one(self.pool)
            .await?;

        Ok(ProductPage {
            products: rows.into_iter().map(Into::into).collect(),
            total,
            page,
            per_page,
        })
    }

    /// Name suggestions for search-as-you-type, capped at 10.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn suggestions(&self, search: &str) -> Result<Vec<String>, RepositoryError> {
        let pattern = format!("%{search}%");
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM products WHERE name ILIKE $1 ORDER BY name LIMIT 10",
        )
        .bind(&pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug or SKU is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &CreateProductInput) -> Result<Product, RepositoryError> {
        let sql = format!(
            "INSERT INTO products
                 (name, slug, sku, description, price, quantity, category_id, brand_id,
                  is_active, is_featured, in_stock, on_sale, discount_percentage)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {PRODUCT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.sku)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.quantity)
            .bind(input.category_id)
            .bind(input.brand_id)
            .bind(input.is_active)
            .bind(input.is_featured)
            .bind(input.in_stock)
            .bind(input.on_sale)
            .bind(input.discount_percentage)
            .fetch_one(self.pool)
            .await
            .map_err(map_product_conflict)?;

        Ok(row.into())
    }

    /// Update a product. `None` fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new slug or SKU is taken.
    pub async fn update(
        &self,
        id: ProductId,
        input: &UpdateProductInput,
    ) -> Result<Product, RepositoryError> {
        let sql = format!(
            "UPDATE products SET
                 name = COALESCE($2, name),
                 slug = COALESCE($3, slug),
                 sku = COALESCE($4, sku),
                 description = COALESCE($5, description),
                 price = COALESCE($6, price),
                 quantity = COALESCE($7, quantity),
                 category_id = COALESCE($8, category_id),
                 brand_id = COALESCE($9, brand_id),
                 is_active = COALESCE($10, is_active),
                 is_featured = COALESCE($11, is_featured),
                 in_stock = COALESCE($12, in_stock),
                 on_sale = COALESCE($13, on_sale),
                 discount_percentage = COALESCE($14, discount_percentage),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.sku)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.quantity)
            .bind(input.category_id)
            .bind(input.brand_id)
            .bind(input.is_active)
            .bind(input.is_featured)
            .bind(input.in_stock)
            .bind(input.on_sale)
            .bind(input.discount_percentage)
            .fetch_optional(self.pool)
            .await
            .map_err(map_product_conflict)?
            .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Set a product's stock quantity to an absolute value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Conflict` if `quantity` is negative (the
    /// `CHECK` constraint rejects it).
    pub async fn update_stock(
        &self,
        id: ProductId,
        quantity: i32,
    ) -> Result<Product, RepositoryError> {
        let sql = format!(
            "UPDATE products
             SET quantity = $2, in_stock = ($2 > 0), updated_at = NOW()
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .bind(quantity)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_check_violation()
                {
                    return RepositoryError::Conflict("Stock cannot be negative".to_string());
                }
                RepositoryError::Database(e)
            })?
            .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a product.
    ///
    /// # Returns
    ///
    /// Returns `true` if the product was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if order items reference it.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_foreign_key_violation()
                {
                    return RepositoryError::Conflict(
                        "Product appears on existing orders".to_string(),
                    );
                }
                RepositoryError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all products (dashboard stat).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

/// Row offset for a 1-based page; widened to i64 so extreme page numbers
/// cannot overflow before the bind.
fn page_offset(page: u32, per_page: u32) -> i64 {
    (i64::from(page) - 1) * i64::from(per_page)
}

fn map_product_conflict(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e {
        match db_err.constraint() {
            Some("products_slug_key") => {
                return RepositoryError::Conflict("Slug already taken".to_string());
            }
            Some("products_sku_key") => {
                return RepositoryError::Conflict("SKU already taken".to_string());
            }
            _ => {}
        }
    }
    RepositoryError::Database(e)
}

#[cfg(test)]
mod tests {
    use super::page_offset;

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(1, 12), 0);
        assert_eq!(page_offset(3, 12), 24);
        // Extreme page numbers must not wrap.
        assert_eq!(
            page_offset(u32::MAX, 100),
            (i64::from(u32::MAX) - 1) * 100
        );
    }
}
