//! Unit tests for the verification service

use std::sync::Arc;

use crate::domain::entities::verification_code::CODE_LENGTH;
use crate::errors::DomainError;
use crate::repositories::code_store::MockCodeStore;
use crate::services::verification::{
    generate_temporary_password, VerificationConfig, VerificationService, TEMP_PASSWORD_LENGTH,
};

fn service(store: Arc<MockCodeStore>, config: VerificationConfig) -> VerificationService<MockCodeStore> {
    VerificationService::new(store, config)
}

fn no_cooldown() -> VerificationConfig {
    VerificationConfig {
        resend_cooldown_seconds: 0,
        ..VerificationConfig::default()
    }
}

#[tokio::test]
async fn test_issue_code_success() {
    let store = Arc::new(MockCodeStore::new());
    let service = service(store.clone(), VerificationConfig::default());

    let result = service.issue_code("Ana@Example.com ").await.unwrap();

    assert_eq!(result.record.destination, "ana@example.com");
    assert_eq!(result.record.code.len(), CODE_LENGTH);
    assert!(!result.record.used);
    assert_eq!(
        result.next_resend_at,
        result.record.issued_at + chrono::Duration::seconds(60)
    );

    // Exactly one record persisted
    assert_eq!(store.record_count().await, 1);
}

#[tokio::test]
async fn test_issue_code_empty_destination() {
    let store = Arc::new(MockCodeStore::new());
    let service = service(store.clone(), VerificationConfig::default());

    let err = service.issue_code("   ").await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput { .. }));

    // Rejected before any store access
    assert_eq!(store.record_count().await, 0);
}

#[tokio::test]
async fn test_issue_code_invalid_email() {
    let store = Arc::new(MockCodeStore::new());
    let service = service(store, VerificationConfig::default());

    let err = service.issue_code("not-an-email").await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_issue_within_cooldown_is_denied() {
    let store = Arc::new(MockCodeStore::new());
    let service = service(store.clone(), VerificationConfig::default());

    service.issue_code("ana@example.com").await.unwrap();

    let err = service.issue_code("ana@example.com").await.unwrap_err();
    match err {
        DomainError::CooldownActive {
            retry_after_seconds,
        } => {
            assert!(retry_after_seconds > 0 && retry_after_seconds <= 60);
        }
        other => panic!("expected CooldownActive, got {other:?}"),
    }

    // The denied request inserted nothing
    assert_eq!(store.record_count().await, 1);
}

#[tokio::test]
async fn test_cooldown_is_per_destination() {
    let store = Arc::new(MockCodeStore::new());
    let service = service(store, VerificationConfig::default());

    service.issue_code("ana@example.com").await.unwrap();
    // A different destination is unaffected
    service.issue_code("bia@example.com").await.unwrap();
}

#[tokio::test]
async fn test_unenforced_cooldown_allows_immediate_reissue() {
    let store = Arc::new(MockCodeStore::new());
    let config = VerificationConfig {
        enforce_cooldown: false,
        ..VerificationConfig::default()
    };
    let service = service(store.clone(), config);

    service.issue_code("ana@example.com").await.unwrap();
    service.issue_code("ana@example.com").await.unwrap();
    assert_eq!(store.record_count().await, 2);
}

#[tokio::test]
async fn test_redeem_success_exactly_once() {
    let store = Arc::new(MockCodeStore::new());
    let service = service(store, VerificationConfig::default());

    let issued = service.issue_code("ana@example.com").await.unwrap();
    let code = issued.record.code.clone();

    let redeemed = service.redeem_code("ana@example.com", &code).await.unwrap();
    assert!(redeemed.used);
    assert_eq!(redeemed.id, issued.record.id);

    // Double submission of the same code must fail, never re-succeed
    let err = service.redeem_code("ana@example.com", &code).await.unwrap_err();
    assert_eq!(err, DomainError::InvalidOrExpired);
}

#[tokio::test]
async fn test_redeem_never_issued_code() {
    let store = Arc::new(MockCodeStore::new());
    let service = service(store, VerificationConfig::default());

    let err = service
        .redeem_code("ana@example.com", "123456")
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::InvalidOrExpired);
}

#[tokio::test]
async fn test_redeem_wrong_code() {
    let store = Arc::new(MockCodeStore::new());
    let service = service(store, VerificationConfig::default());

    let issued = service.issue_code("ana@example.com").await.unwrap();
    let wrong = if issued.record.code == "123456" {
        "654321"
    } else {
        "123456"
    };

    let err = service.redeem_code("ana@example.com", wrong).await.unwrap_err();
    assert_eq!(err, DomainError::InvalidOrExpired);

    // The record is still redeemable with the right code afterwards
    service
        .redeem_code("ana@example.com", &issued.record.code)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_redeem_malformed_code_rejected_before_store() {
    let failing = Arc::new(MockCodeStore::failing());
    let service = service(failing, VerificationConfig::default());

    for submitted in ["12345", "1234567", "12345a", ""] {
        let err = service
            .redeem_code("ana@example.com", submitted)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput { .. }), "{submitted:?}");
    }
}

#[tokio::test]
async fn test_redeem_expired_code() {
    let store = Arc::new(MockCodeStore::new());
    let config = VerificationConfig {
        code_expiration_minutes: 0,
        ..no_cooldown()
    };
    let service = service(store, config);

    let issued = service.issue_code("ana@example.com").await.unwrap();

    let err = service
        .redeem_code("ana@example.com", &issued.record.code)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::InvalidOrExpired);
}

#[tokio::test]
async fn test_superseded_code_is_not_redeemable() {
    let store = Arc::new(MockCodeStore::new());
    let service = service(store, no_cooldown());

    let first = service.issue_code("ana@example.com").await.unwrap();
    let second = service.issue_code("ana@example.com").await.unwrap();

    // When both draws happen to produce the same digits the earlier
    // submission would legitimately redeem the latest record, so only
    // assert on distinct codes
    if first.record.code == second.record.code {
        return;
    }

    // The earlier code is inert even though still within its expiry window
    let err = service
        .redeem_code("ana@example.com", &first.record.code)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::InvalidOrExpired);

    service
        .redeem_code("ana@example.com", &second.record.code)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_redeem_normalizes_destination() {
    let store = Arc::new(MockCodeStore::new());
    let service = service(store, VerificationConfig::default());

    let issued = service.issue_code("ana@example.com").await.unwrap();
    service
        .redeem_code("  ANA@example.COM ", &issued.record.code)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_store_failure_surfaces() {
    let failing = Arc::new(MockCodeStore::failing());
    let service = service(failing, VerificationConfig::default());

    let err = service.issue_code("ana@example.com").await.unwrap_err();
    assert!(matches!(err, DomainError::StoreUnavailable { .. }));
}

#[tokio::test]
async fn test_throttle_accessor_drives_countdown() {
    let store = Arc::new(MockCodeStore::new());
    let service = service(store, VerificationConfig::default());

    let issued = service.issue_code("ana@example.com").await.unwrap();

    // A caller re-evaluates the service's own policy on each render tick
    let throttle = service.throttle();
    assert!(!throttle.can_resend(Some(issued.record.issued_at), issued.record.issued_at));
    assert_eq!(
        throttle.remaining_seconds(issued.record.issued_at, issued.record.issued_at),
        60
    );
    assert_eq!(throttle.next_resend_at(issued.record.issued_at), issued.next_resend_at);
}

#[test]
fn test_generate_temporary_password() {
    let password = generate_temporary_password(TEMP_PASSWORD_LENGTH);
    assert_eq!(password.len(), TEMP_PASSWORD_LENGTH);
    assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));

    // Independent draws should differ
    let other = generate_temporary_password(TEMP_PASSWORD_LENGTH);
    let third = generate_temporary_password(TEMP_PASSWORD_LENGTH);
    assert!(password != other || other != third);
}
