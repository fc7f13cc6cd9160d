//! Integration tests for Tindahan.
//!
//! Most tests under `tests/` exercise the domain logic without a database:
//! the order status machine, voucher applicability and discount math,
//! checkout pricing, and the HTTP error contract.
//!
//! `tests/checkout_flow.rs` runs against `PostgreSQL` via `#[sqlx::test]`,
//! which creates a throwaway database per test from the server migrations;
//! it needs `DATABASE_URL` pointing at a reachable server.
//!
//! ```bash
//! cargo test -p tindahan-integration-tests
//! ```
