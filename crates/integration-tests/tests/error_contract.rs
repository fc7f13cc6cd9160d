//! The HTTP error contract the front end relies on.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use tindahan_server::AppError;
use tindahan_server::db::RepositoryError;
use tindahan_server::services::CheckoutError;

fn status_of(err: AppError) -> StatusCode {
    err.into_response().status()
}

#[test]
fn checkout_failures_map_to_their_statuses() {
    assert_eq!(
        status_of(CheckoutError::ProductUnavailable.into()),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        status_of(
            CheckoutError::InsufficientStock {
                name: "Sardinas".to_string()
            }
            .into()
        ),
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
        status_of(CheckoutError::InvalidVoucherCode.into()),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        status_of(CheckoutError::VoucherAlreadyUsed.into()),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        status_of(CheckoutError::VoucherNotApplicable.into()),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        status_of(CheckoutError::EmptyCart.into()),
        StatusCode::BAD_REQUEST
    );
}

#[test]
fn checkout_messages_match_the_storefront_contract() {
    assert_eq!(
        CheckoutError::ProductUnavailable.to_string(),
        "Product not found or inactive."
    );
    assert_eq!(
        CheckoutError::InsufficientStock {
            name: "Bigas 5kg".to_string()
        }
        .to_string(),
        "Not enough stock for Bigas 5kg."
    );
    assert_eq!(
        CheckoutError::InvalidVoucherCode.to_string(),
        "Invalid voucher code."
    );
    assert_eq!(
        CheckoutError::VoucherAlreadyUsed.to_string(),
        "This voucher has already been used."
    );
    assert_eq!(
        CheckoutError::VoucherNotApplicable.to_string(),
        "Invalid or expired voucher."
    );
}

#[test]
fn repository_failures_never_leak_details() {
    let err: AppError = RepositoryError::DataCorruption("orders.status: junk".to_string()).into();
    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn conflicts_surface_as_409() {
    let err: AppError = RepositoryError::Conflict("Slug already taken".to_string()).into();
    assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
}
