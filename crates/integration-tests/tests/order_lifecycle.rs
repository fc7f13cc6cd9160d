//! Order status machine behavior.

use tindahan_core::OrderStatus;

#[test]
fn forward_path_is_accepted() {
    assert!(OrderStatus::New.can_transition_to(OrderStatus::Processing));
    assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Shipped));
    assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Delivered));
}

#[test]
fn skipping_ahead_is_rejected() {
    assert!(!OrderStatus::New.can_transition_to(OrderStatus::Shipped));
    assert!(!OrderStatus::New.can_transition_to(OrderStatus::Delivered));
    assert!(!OrderStatus::Processing.can_transition_to(OrderStatus::Delivered));
}

#[test]
fn going_backwards_is_rejected() {
    assert!(!OrderStatus::Processing.can_transition_to(OrderStatus::New));
    assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Processing));
    assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Shipped));
}

#[test]
fn cancel_is_reachable_from_any_non_terminal_state() {
    assert!(OrderStatus::New.can_transition_to(OrderStatus::Canceled));
    assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Canceled));
    assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Canceled));
}

#[test]
fn terminal_states_accept_nothing() {
    for target in [
        OrderStatus::New,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Canceled,
    ] {
        assert!(!OrderStatus::Delivered.can_transition_to(target));
        assert!(!OrderStatus::Canceled.can_transition_to(target));
    }
    assert!(OrderStatus::Delivered.is_terminal());
    assert!(OrderStatus::Canceled.is_terminal());
}

#[test]
fn status_round_trips_through_storage_form() {
    for status in [
        OrderStatus::New,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Canceled,
    ] {
        let stored = status.to_string();
        let parsed: OrderStatus = stored.parse().unwrap();
        assert_eq!(parsed, status);
    }
}
