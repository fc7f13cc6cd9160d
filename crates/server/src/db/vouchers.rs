//! Database operations for vouchers and voucher requests.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use tindahan_core::{
    OrderId, UserId, VoucherId, VoucherRequestId, VoucherRequestStatus, VoucherType,
};

use super::{RepositoryError, parse_db_enum};
use crate::models::voucher::{CreateVoucherInput, Voucher, VoucherRequest, VoucherRequestDetail};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct VoucherRow {
    id: i32,
    code: String,
    voucher_type: String,
    discount_amount: Decimal,
    expires_at: Option<NaiveDate>,
    active: bool,
    used: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<VoucherRow> for Voucher {
    type Error = RepositoryError;

    fn try_from(row: VoucherRow) -> Result<Self, Self::Error> {
        let voucher_type: VoucherType = parse_db_enum(&row.voucher_type, "vouchers.voucher_type")?;
        Ok(Self {
            id: VoucherId::new(row.id),
            code: row.code,
            voucher_type,
            discount_amount: row.discount_amount,
            expires_at: row.expires_at,
            active: row.active,
            used: row.used,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VoucherRequestRow {
    id: i32,
    order_id: i32,
    user_id: i32,
    voucher_id: i32,
    status: String,
    admin_note: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    voucher_code: String,
    user_name: String,
}

impl TryFrom<VoucherRequestRow> for VoucherRequestDetail {
    type Error = RepositoryError;

    fn try_from(row: VoucherRequestRow) -> Result<Self, Self::Error> {
        let status: VoucherRequestStatus = parse_db_enum(&row.status, "voucher_requests.status")?;
        Ok(Self {
            request: VoucherRequest {
                id: VoucherRequestId::new(row.id),
                order_id: OrderId::new(row.order_id),
                user_id: UserId::new(row.user_id),
                voucher_id: VoucherId::new(row.voucher_id),
                status,
                admin_note: row.admin_note,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            voucher_code: row.voucher_code,
            user_name: row.user_name,
        })
    }
}

const VOUCHER_COLUMNS: &str =
    "id, code, voucher_type, discount_amount, expires_at, active, used, created_at, updated_at";

// =============================================================================
// Repositories
// =============================================================================

/// Repository for voucher database operations.
pub struct VoucherRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> VoucherRepository<'a> {
    /// Create a new voucher repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all vouchers, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Voucher>, RepositoryError> {
        let sql = format!("SELECT {VOUCHER_COLUMNS} FROM vouchers ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, VoucherRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Look up a voucher by code (case-sensitive, codes are stored uppercase).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Voucher>, RepositoryError> {
        let sql = format!("SELECT {VOUCHER_COLUMNS} FROM vouchers WHERE code = $1");
        let row = sqlx::query_as::<_, VoucherRow>(&sql)
            .bind(code)
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a voucher.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the code is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &CreateVoucherInput) -> Result<Voucher, RepositoryError> {
        let sql = format!(
            "INSERT INTO vouchers (code, voucher_type, discount_amount, expires_at, active)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {VOUCHER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, VoucherRow>(&sql)
            .bind(input.code.to_uppercase())
            .bind(input.voucher_type.to_string())
            .bind(input.discount_amount)
            .bind(input.expires_at)
            .bind(input.active)
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.constraint() == Some("vouchers_code_key")
                {
                    return RepositoryError::Conflict("Voucher code already exists".to_string());
                }
                RepositoryError::Database(e)
            })?;

        row.try_into()
    }

    /// Delete a voucher.
    ///
    /// # Returns
    ///
    /// Returns `true` if the voucher was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if voucher requests reference it.
    pub async fn delete(&self, id: VoucherId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM vouchers WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_foreign_key_violation()
                {
                    return RepositoryError::Conflict(
                        "Voucher has been used on orders".to_string(),
                    );
                }
                RepositoryError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}

/// Repository for voucher request review operations.
pub struct VoucherRequestRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> VoucherRequestRepository<'a> {
    /// Create a new voucher request repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all voucher requests with voucher code and buyer name, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_detailed(&self) -> Result<Vec<VoucherRequestDetail>, RepositoryError> {
        let rows = sqlx::query_as::<_, VoucherRequestRow>(
            "SELECT vr.id, vr.order_id, vr.user_id, vr.voucher_id, vr.status,
                    vr.admin_note, vr.created_at, vr.updated_at,
                    v.code AS voucher_code, u.name AS user_name
             FROM voucher_requests vr
             JOIN vouchers v ON v.id = vr.voucher_id
             JOIN users u ON u.id = vr.user_id
             ORDER BY vr.created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Set the review status (and optional note) of a voucher request.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the request doesn't exist.
    pub async fn set_status(
        &self,
        id: VoucherRequestId,
        status: VoucherRequestStatus,
        admin_note: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE voucher_requests
             SET status = $2, admin_note = COALESCE($3, admin_note), updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(status.to_string())
        .bind(admin_note)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
