//! End-to-end lifecycle tests for the session service against the
//! conditional-write store double: open, operate, reconcile, close, and
//! the races the store must arbitrate.

mod common;

use common::*;

use registra_core::types::{PaymentMethod, RegisterStatus, SessionState};
use registra_session::{CloseConfirmation, SessionError};

// =============================================================================
// Open
// =============================================================================

#[tokio::test]
async fn open_then_fetch_round_trip() {
    let store = MemorySessionStore::new();
    let sales = MemorySalesFeed::new();
    store.add_register(register("reg-1", Some("op-1"), RegisterStatus::Active));

    let service = service_for(&store, &sales, cashier("op-1"));
    let opened = service
        .open_session("reg-1", soles(10_000))
        .await
        .expect("open should succeed");

    let current = service
        .current_session()
        .await
        .expect("fetch should succeed")
        .expect("an open session should exist");

    assert_eq!(current.id, opened.id);
    assert_eq!(current.register_id, "reg-1");
    assert_eq!(current.operator_id, "op-1");
    assert_eq!(current.opening_cents, 10_000);
    assert!(current.is_open());
}

#[tokio::test]
async fn open_with_negative_amount_fails_and_creates_no_record() {
    let store = MemorySessionStore::new();
    let sales = MemorySalesFeed::new();
    store.add_register(register("reg-1", Some("op-1"), RegisterStatus::Active));

    let service = service_for(&store, &sales, cashier("op-1"));
    let err = service
        .open_session("reg-1", soles(-1_000))
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Validation { .. }));
    assert_eq!(store.session_count(), 0);
}

#[tokio::test]
async fn open_unknown_register_fails_validation() {
    let store = MemorySessionStore::new();
    let sales = MemorySalesFeed::new();

    let service = service_for(&store, &sales, supervisor("sup-1"));
    let err = service
        .open_session("reg-ghost", soles(10_000))
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Validation { .. }));
}

#[tokio::test]
async fn open_suspended_register_fails_validation() {
    let store = MemorySessionStore::new();
    let sales = MemorySalesFeed::new();
    store.add_register(register("reg-1", Some("op-1"), RegisterStatus::Suspended));

    let service = service_for(&store, &sales, cashier("op-1"));
    let err = service
        .open_session("reg-1", soles(10_000))
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Validation { .. }));
    assert_eq!(store.session_count(), 0);
}

#[tokio::test]
async fn open_someone_elses_register_fails_validation() {
    let store = MemorySessionStore::new();
    let sales = MemorySalesFeed::new();
    store.add_register(register("reg-1", Some("op-2"), RegisterStatus::Active));

    let service = service_for(&store, &sales, cashier("op-1"));
    let err = service
        .open_session("reg-1", soles(10_000))
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Validation { .. }));
}

#[tokio::test]
async fn open_busy_register_conflicts() {
    let store = MemorySessionStore::new();
    let sales = MemorySalesFeed::new();
    store.add_register(register("reg-1", Some("op-1"), RegisterStatus::Active));

    let cashier_service = service_for(&store, &sales, cashier("op-1"));
    cashier_service
        .open_session("reg-1", soles(10_000))
        .await
        .expect("first open should succeed");

    // A branch supervisor tries the same register while it is busy
    let supervisor_service = service_for(&store, &sales, supervisor("sup-1"));
    let err = supervisor_service
        .open_session("reg-1", soles(5_000))
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Conflict { .. }));
    assert_eq!(store.open_session_count("reg-1"), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_opens_leave_at_most_one_open_session_per_register() {
    init_tracing();
    let store = MemorySessionStore::new();
    let sales = MemorySalesFeed::new();
    store.add_register(register("reg-1", Some("op-1"), RegisterStatus::Active));
    store.add_register(register("reg-2", Some("op-2"), RegisterStatus::Active));

    let mut handles = Vec::new();
    for attempt in 0..16 {
        // Interleave two operators hammering their own registers
        let (operator, register_id) = if attempt % 2 == 0 {
            ("op-1", "reg-1")
        } else {
            ("op-2", "reg-2")
        };
        let service = service_for(&store, &sales, cashier(operator));
        let register_id = register_id.to_string();
        handles.push(tokio::spawn(async move {
            service.open_session(&register_id, soles(10_000)).await
        }));
    }

    let mut wins = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => wins += 1,
            Err(SessionError::Conflict { .. }) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    // One win per register, everything else lost the conditional insert
    assert_eq!(wins, 2);
    assert_eq!(conflicts, 14);
    assert_eq!(store.open_session_count("reg-1"), 1);
    assert_eq!(store.open_session_count("reg-2"), 1);
}

// =============================================================================
// Close
// =============================================================================

#[tokio::test]
async fn close_balanced_session_commits_full_record() {
    let store = MemorySessionStore::new();
    let sales = MemorySalesFeed::new();
    store.add_register(register("reg-1", Some("op-1"), RegisterStatus::Active));

    let service = service_for(&store, &sales, cashier("op-1"));
    let opened = service.open_session("reg-1", soles(10_000)).await.unwrap();

    sales.set_sales(
        &opened.id,
        &[
            (PaymentMethod::Cash, 20_000),
            (PaymentMethod::Yape, 5_050),
        ],
    );

    let closed = service
        .close_session(
            &opened.id,
            soles(35_050),
            Some("sin novedades".to_string()),
            CloseConfirmation::Confirmed,
        )
        .await
        .expect("close should succeed");

    assert_eq!(closed.state, SessionState::Closed);
    assert_eq!(closed.expected_cents, Some(35_050));
    assert_eq!(closed.counted_cents, Some(35_050));
    assert_eq!(closed.variance_cents, Some(0));
    assert_eq!(closed.notes.as_deref(), Some("sin novedades"));
    assert!(closed.closed_at.is_some());

    // The persisted record matches what the caller got back
    let persisted = store.session_snapshot(&closed.id).unwrap();
    assert_eq!(persisted.variance_cents, Some(0));
    assert_eq!(persisted.state, SessionState::Closed);
}

#[tokio::test]
async fn close_short_drawer_records_negative_variance() {
    let store = MemorySessionStore::new();
    let sales = MemorySalesFeed::new();
    store.add_register(register("reg-1", Some("op-1"), RegisterStatus::Active));

    let service = service_for(&store, &sales, cashier("op-1"));
    let opened = service.open_session("reg-1", soles(10_000)).await.unwrap();
    sales.set_sales(&opened.id, &[(PaymentMethod::Cash, 25_050)]);

    let closed = service
        .close_session(
            &opened.id,
            soles(30_000),
            None,
            CloseConfirmation::Confirmed,
        )
        .await
        .unwrap();

    assert_eq!(closed.expected_cents, Some(35_050));
    assert_eq!(closed.variance_cents, Some(-5_050));
}

#[tokio::test]
async fn close_with_no_sales_expects_the_opening_amount() {
    let store = MemorySessionStore::new();
    let sales = MemorySalesFeed::new();
    store.add_register(register("reg-1", Some("op-1"), RegisterStatus::Active));

    let service = service_for(&store, &sales, cashier("op-1"));
    let opened = service.open_session("reg-1", soles(10_000)).await.unwrap();

    let closed = service
        .close_session(
            &opened.id,
            soles(10_000),
            None,
            CloseConfirmation::Confirmed,
        )
        .await
        .unwrap();

    assert_eq!(closed.expected_cents, Some(10_000));
    assert_eq!(closed.variance_cents, Some(0));
}

#[tokio::test]
async fn close_without_confirmation_is_rejected_and_session_stays_open() {
    let store = MemorySessionStore::new();
    let sales = MemorySalesFeed::new();
    store.add_register(register("reg-1", Some("op-1"), RegisterStatus::Active));

    let service = service_for(&store, &sales, cashier("op-1"));
    let opened = service.open_session("reg-1", soles(10_000)).await.unwrap();

    let err = service
        .close_session(
            &opened.id,
            soles(10_000),
            None,
            CloseConfirmation::Unconfirmed,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Validation { .. }));
    assert!(store.session_snapshot(&opened.id).unwrap().is_open());
}

#[tokio::test]
async fn close_with_negative_counted_amount_fails_validation() {
    let store = MemorySessionStore::new();
    let sales = MemorySalesFeed::new();
    store.add_register(register("reg-1", Some("op-1"), RegisterStatus::Active));

    let service = service_for(&store, &sales, cashier("op-1"));
    let opened = service.open_session("reg-1", soles(10_000)).await.unwrap();

    let err = service
        .close_session(
            &opened.id,
            soles(-1),
            None,
            CloseConfirmation::Confirmed,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Validation { .. }));
    assert!(store.session_snapshot(&opened.id).unwrap().is_open());
}

#[tokio::test]
async fn second_close_conflicts_and_never_alters_the_record() {
    let store = MemorySessionStore::new();
    let sales = MemorySalesFeed::new();
    store.add_register(register("reg-1", Some("op-1"), RegisterStatus::Active));

    let service = service_for(&store, &sales, cashier("op-1"));
    let opened = service.open_session("reg-1", soles(10_000)).await.unwrap();
    sales.set_sales(&opened.id, &[(PaymentMethod::Cash, 25_050)]);

    service
        .close_session(
            &opened.id,
            soles(35_050),
            None,
            CloseConfirmation::Confirmed,
        )
        .await
        .unwrap();
    let first_record = store.session_snapshot(&opened.id).unwrap();

    // Double submission with a different count must lose to the CAS
    let err = service
        .close_session(
            &opened.id,
            soles(99_999),
            Some("second attempt".to_string()),
            CloseConfirmation::Confirmed,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Conflict { .. }));
    let second_record = store.session_snapshot(&opened.id).unwrap();
    assert_eq!(second_record.counted_cents, first_record.counted_cents);
    assert_eq!(second_record.variance_cents, first_record.variance_cents);
    assert_eq!(second_record.notes, first_record.notes);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_closes_produce_exactly_one_winner() {
    let store = MemorySessionStore::new();
    let sales = MemorySalesFeed::new();
    store.add_register(register("reg-1", Some("op-1"), RegisterStatus::Active));

    let service = service_for(&store, &sales, cashier("op-1"));
    let opened = service.open_session("reg-1", soles(10_000)).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = service.clone();
        let session_id = opened.id.clone();
        handles.push(tokio::spawn(async move {
            service
                .close_session(
                    &session_id,
                    soles(10_000),
                    None,
                    CloseConfirmation::Confirmed,
                )
                .await
        }));
    }

    let mut wins = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => wins += 1,
            Err(SessionError::Conflict { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(wins, 1);
}

#[tokio::test]
async fn close_unknown_session_is_not_found() {
    let store = MemorySessionStore::new();
    let sales = MemorySalesFeed::new();

    let service = service_for(&store, &sales, cashier("op-1"));
    let err = service
        .close_session(
            "ses-ghost",
            soles(10_000),
            None,
            CloseConfirmation::Confirmed,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::NotFound { .. }));
}

#[tokio::test]
async fn cashier_cannot_close_another_operators_session() {
    let store = MemorySessionStore::new();
    let sales = MemorySalesFeed::new();
    store.add_register(register("reg-1", Some("op-1"), RegisterStatus::Active));

    let opener = service_for(&store, &sales, cashier("op-1"));
    let opened = opener.open_session("reg-1", soles(10_000)).await.unwrap();

    let other = service_for(&store, &sales, cashier("op-2"));
    let err = other
        .close_session(
            &opened.id,
            soles(10_000),
            None,
            CloseConfirmation::Confirmed,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Validation { .. }));
    assert!(store.session_snapshot(&opened.id).unwrap().is_open());
}

#[tokio::test]
async fn supervisor_closes_a_cashiers_session_in_their_branch() {
    let store = MemorySessionStore::new();
    let sales = MemorySalesFeed::new();
    store.add_register(register("reg-1", Some("op-1"), RegisterStatus::Active));

    let opener = service_for(&store, &sales, cashier("op-1"));
    let opened = opener.open_session("reg-1", soles(10_000)).await.unwrap();
    sales.set_sales(&opened.id, &[(PaymentMethod::Card, 5_000)]);

    let supervisor_service = service_for(&store, &sales, supervisor("sup-1"));
    let closed = supervisor_service
        .close_session(
            &opened.id,
            soles(15_000),
            Some("cierre de turno".to_string()),
            CloseConfirmation::Confirmed,
        )
        .await
        .expect("branch supervisor may close");

    assert_eq!(closed.expected_cents, Some(15_000));
    assert_eq!(closed.variance_cents, Some(0));
}

// =============================================================================
// Reconciliation Preview
// =============================================================================

#[tokio::test]
async fn preview_of_an_open_session_tracks_sales_so_far() {
    let store = MemorySessionStore::new();
    let sales = MemorySalesFeed::new();
    store.add_register(register("reg-1", Some("op-1"), RegisterStatus::Active));

    let service = service_for(&store, &sales, cashier("op-1"));
    let opened = service.open_session("reg-1", soles(10_000)).await.unwrap();
    sales.set_sales(&opened.id, &[(PaymentMethod::Cash, 25_050)]);

    let preview = service.reconciliation_preview(&opened.id).await.unwrap();

    assert_eq!(preview.expected_cents, 35_050);
    assert_eq!(preview.counted_cents, None);
    assert_eq!(preview.variance_cents, None);
    assert_eq!(preview.outcome, None);
}

#[tokio::test]
async fn preview_of_a_closed_session_shows_frozen_figures() {
    let store = MemorySessionStore::new();
    let sales = MemorySalesFeed::new();
    store.add_register(register("reg-1", Some("op-1"), RegisterStatus::Active));

    let service = service_for(&store, &sales, cashier("op-1"));
    let opened = service.open_session("reg-1", soles(10_000)).await.unwrap();
    sales.set_sales(&opened.id, &[(PaymentMethod::Cash, 25_050)]);
    service
        .close_session(
            &opened.id,
            soles(30_000),
            None,
            CloseConfirmation::Confirmed,
        )
        .await
        .unwrap();

    let preview = service.reconciliation_preview(&opened.id).await.unwrap();

    assert_eq!(preview.expected_cents, 35_050);
    assert_eq!(preview.counted_cents, Some(30_000));
    assert_eq!(preview.variance_cents, Some(-5_050));
    assert_eq!(
        preview.outcome,
        Some(registra_core::reconcile::ReconcileOutcome::Shortage)
    );
}

#[tokio::test]
async fn preview_of_unknown_session_is_not_found() {
    let store = MemorySessionStore::new();
    let sales = MemorySalesFeed::new();

    let service = service_for(&store, &sales, cashier("op-1"));
    let err = service
        .reconciliation_preview("ses-ghost")
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::NotFound { .. }));
}

// =============================================================================
// Sales Summary Consumption
// =============================================================================

#[tokio::test]
async fn repeated_preview_reads_never_double_count() {
    let store = MemorySessionStore::new();
    let sales = MemorySalesFeed::new();
    store.add_register(register("reg-1", Some("op-1"), RegisterStatus::Active));

    let service = service_for(&store, &sales, cashier("op-1"));
    let opened = service.open_session("reg-1", soles(10_000)).await.unwrap();
    sales.set_sales(&opened.id, &[(PaymentMethod::Cash, 25_050)]);

    let first = service.reconciliation_preview(&opened.id).await.unwrap();
    let second = service.reconciliation_preview(&opened.id).await.unwrap();

    assert_eq!(first.expected_cents, second.expected_cents);
}
