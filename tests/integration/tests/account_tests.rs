//! Account lifecycle tests
//!
//! Drive `UserAccount` through the in-memory store and the Argon2 hasher.
//!
//! Run with: cargo test -p integration-tests --test account_tests

use std::sync::Arc;

use account_core::{AccountError, UserAccount, UserId, UserStore};
use account_db::MemoryUserStore;
use integration_tests::{NewAccount, TestContext, TEST_PASSWORD};

// ============================================================================
// Credential Tests
// ============================================================================

#[tokio::test]
async fn test_password_verifies_only_for_itself() {
    let ctx = TestContext::new().unwrap();
    let input = NewAccount::unique();
    let account = ctx.register(&input).await.unwrap();

    assert!(account.verify_password(&ctx.hasher, TEST_PASSWORD));
    for wrong in ["", "TestPass123", "TestPass123!!", "testpass123!", " TestPass123!"] {
        assert!(!account.verify_password(&ctx.hasher, wrong), "{wrong:?} verified");
    }
}

#[tokio::test]
async fn test_same_password_different_hashes() {
    let ctx = TestContext::new().unwrap();
    let first = ctx.register(&NewAccount::unique()).await.unwrap();
    let second = ctx.register(&NewAccount::unique()).await.unwrap();

    assert_ne!(first.password_hash, second.password_hash);
    assert!(first.verify_password(&ctx.hasher, TEST_PASSWORD));
    assert!(second.verify_password(&ctx.hasher, TEST_PASSWORD));
}

#[tokio::test]
async fn test_corrupt_hash_is_a_mismatch() {
    let ctx = TestContext::new().unwrap();
    let mut account = ctx.register(&NewAccount::unique()).await.unwrap();

    account.password_hash = "$argon2id$garbage".to_string();
    account.save(&ctx.store).await.unwrap();

    let loaded = ctx.store.find_by_id(account.id).await.unwrap().unwrap();
    assert!(!loaded.verify_password(&ctx.hasher, TEST_PASSWORD));

    account.password_hash.clear();
    assert!(!account.verify_password(&ctx.hasher, ""));
}

#[tokio::test]
async fn test_login_flow() {
    let ctx = TestContext::new().unwrap();
    let input = NewAccount::unique();
    let account = ctx.register(&input).await.unwrap();

    let logged_in = ctx.login(&input.email, TEST_PASSWORD).await.unwrap();
    assert_eq!(logged_in.map(|a| a.id), Some(account.id));

    assert!(ctx.login(&input.email, "nope").await.unwrap().is_none());
    assert!(ctx
        .login("nobody@example.com", TEST_PASSWORD)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_password_change_persists() {
    let ctx = TestContext::new().unwrap();
    let input = NewAccount::unique();
    let mut account = ctx.register(&input).await.unwrap();

    account.set_password(&ctx.hasher, "BrandNew456?").unwrap();
    account.save(&ctx.store).await.unwrap();

    assert!(ctx.login(&input.email, TEST_PASSWORD).await.unwrap().is_none());
    assert!(ctx.login(&input.email, "BrandNew456?").await.unwrap().is_some());
}

// ============================================================================
// Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_duplicate_email_second_create_fails() {
    let ctx = TestContext::new().unwrap();
    let input = NewAccount::unique();
    let first = ctx.register(&input).await.unwrap();

    let mut second = UserAccount::new("Impostor", input.email.clone());
    let err = second.create(&ctx.store).await.unwrap_err();

    assert!(matches!(err, AccountError::EmailTaken));
    assert!(second.id.is_unassigned());
    let still_there = ctx.store.find_by_id(first.id).await.unwrap().unwrap();
    assert_eq!(still_there.name, input.name);
}

#[tokio::test]
async fn test_save_collision_on_email() {
    let ctx = TestContext::new().unwrap();
    let taken = ctx.register(&NewAccount::unique()).await.unwrap();
    let mut other = ctx.register(&NewAccount::unique()).await.unwrap();

    other.change_email(taken.email.clone());
    let err = other.save(&ctx.store).await.unwrap_err();
    assert!(matches!(err, AccountError::EmailTaken));
}

#[tokio::test]
async fn test_save_never_persisted_is_not_found() {
    let ctx = TestContext::new().unwrap();

    let mut fresh = NewAccount::unique().account();
    let err = fresh.save(&ctx.store).await.unwrap_err();
    assert!(err.is_not_found());

    let mut unknown = NewAccount::unique().account();
    unknown.id = UserId::new(4242);
    let err = unknown.save(&ctx.store).await.unwrap_err();
    assert!(matches!(err, AccountError::NotFound(id) if id == UserId::new(4242)));
}

#[tokio::test]
async fn test_round_trip_public_fields() {
    let ctx = TestContext::new().unwrap();
    let mut account = ctx.register(&NewAccount::unique()).await.unwrap();
    account.set_image_url(Some("https://cdn.example/avatar.png".to_string()));
    account.set_admin(true);
    account.save(&ctx.store).await.unwrap();

    let loaded = ctx.store.find_by_id(account.id).await.unwrap().unwrap();
    assert_eq!(loaded.to_public(), account.to_public());

    let json = serde_json::to_value(loaded.to_public()).unwrap();
    let text = json.to_string();
    assert!(!text.contains(&account.password_hash));
    assert!(!text.contains(account.verification_token.as_deref().unwrap()));
    assert_eq!(json["admin"], true);
    assert_eq!(json["verified"], false);
    assert_eq!(json["id"], account.id.into_inner());
}

#[tokio::test]
async fn test_invalid_fields_rejected_before_storage() {
    let ctx = TestContext::new().unwrap();

    let mut account = UserAccount::new("Bad Email", "not-an-email");
    let err = account.create(&ctx.store).await.unwrap_err();
    assert!(err.is_validation());
    assert!(ctx.store.is_empty());

    let mut account = ctx.register(&NewAccount::unique()).await.unwrap();
    account.rename("n".repeat(300));
    let err = account.save(&ctx.store).await.unwrap_err();
    assert!(err.is_validation());
}

// ============================================================================
// Soft Delete Tests
// ============================================================================

#[tokio::test]
async fn test_delete_keeps_fields_and_flags() {
    let ctx = TestContext::new().unwrap();
    let mut account = ctx.register(&NewAccount::unique()).await.unwrap();
    account.set_admin(true);
    account.save(&ctx.store).await.unwrap();
    let before = account.clone();

    account.delete(&ctx.store).await.unwrap();

    assert!(account.deleted_at.is_some());
    assert_eq!(account.name, before.name);
    assert_eq!(account.email, before.email);
    assert_eq!(account.password_hash, before.password_hash);
    assert_eq!(account.is_verified(), before.is_verified());
    assert_eq!(account.is_admin(), before.is_admin());

    let stored = ctx
        .store
        .find_by_id_with_deleted(account.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.deleted_at, account.deleted_at);
    assert_eq!(stored.password_hash, before.password_hash);
    assert!(stored.is_admin());
}

#[tokio::test]
async fn test_deleted_account_hidden_and_not_resurrected() {
    let ctx = TestContext::new().unwrap();
    let input = NewAccount::unique();
    let mut account = ctx.register(&input).await.unwrap();
    account.delete(&ctx.store).await.unwrap();

    assert!(ctx.store.find_by_id(account.id).await.unwrap().is_none());
    assert!(ctx.store.find_by_email(&input.email).await.unwrap().is_none());
    assert!(ctx.login(&input.email, TEST_PASSWORD).await.unwrap().is_none());

    // A stale copy without the tombstone still cannot be saved back
    let mut stale = account.clone();
    stale.deleted_at = None;
    let err = stale.save(&ctx.store).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(ctx.store.len(), 1);
}

#[tokio::test]
async fn test_double_delete() {
    let ctx = TestContext::new().unwrap();
    let mut account = ctx.register(&NewAccount::unique()).await.unwrap();
    account.delete(&ctx.store).await.unwrap();
    let first_tombstone = account.deleted_at;

    // Same instance: no-op
    account.delete(&ctx.store).await.unwrap();
    assert_eq!(account.deleted_at, first_tombstone);

    // Stale instance: storage reports it, tombstone unchanged
    let mut stale = account.clone();
    stale.deleted_at = None;
    let err = stale.delete(&ctx.store).await.unwrap_err();
    assert!(err.is_not_found());

    let stored = ctx
        .store
        .find_by_id_with_deleted(account.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.deleted_at, first_tombstone);
}

#[tokio::test]
async fn test_email_reusable_after_delete() {
    let ctx = TestContext::new().unwrap();
    let input = NewAccount::unique();
    let mut original = ctx.register(&input).await.unwrap();
    original.delete(&ctx.store).await.unwrap();

    let replacement = ctx.register(&input).await.unwrap();
    assert_ne!(replacement.id, original.id);
    assert!(ctx.store.email_exists(&input.email).await.unwrap());
}

// ============================================================================
// Verification Tests
// ============================================================================

#[tokio::test]
async fn test_email_verification_flow() {
    let ctx = TestContext::new().unwrap();
    let account = ctx.register(&NewAccount::unique()).await.unwrap();
    assert!(!account.is_verified());
    let token = account.verification_token.clone().unwrap();
    assert_eq!(token.len(), 32);

    let mut pending = ctx
        .store
        .find_by_verification_token(&token)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(pending.id, account.id);

    assert!(!pending.confirm_verification("wrong-token"));
    assert!(pending.confirm_verification(&token));
    pending.save(&ctx.store).await.unwrap();

    let verified = ctx.store.find_by_id(account.id).await.unwrap().unwrap();
    assert!(verified.is_verified());
    assert!(verified.verification_token.is_none());
    assert!(ctx
        .store
        .find_by_verification_token(&token)
        .await
        .unwrap()
        .is_none());
}

// ============================================================================
// Concurrency Tests
// ============================================================================

const RACERS: usize = 16;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_with_same_email() {
    let store = Arc::new(MemoryUserStore::new());
    let email = NewAccount::unique().email;

    let handles: Vec<_> = (0..RACERS)
        .map(|i| {
            let store = Arc::clone(&store);
            let mut account = UserAccount::new(format!("Racer {i}"), email.clone());
            tokio::spawn(async move { account.create(store.as_ref()).await })
        })
        .collect();

    let mut created = 0;
    let mut taken = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => created += 1,
            Err(AccountError::EmailTaken) => taken += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(taken, RACERS - 1);
    assert_eq!(store.len(), 1);
    assert!(store.find_by_email(&email).await.unwrap().is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_saves_onto_same_email() {
    let store = Arc::new(MemoryUserStore::new());
    let target = NewAccount::unique().email;

    let mut accounts = Vec::with_capacity(RACERS);
    for _ in 0..RACERS {
        let mut account = NewAccount::unique().account();
        account.create(store.as_ref()).await.unwrap();
        accounts.push(account);
    }

    let handles: Vec<_> = accounts
        .into_iter()
        .map(|mut account| {
            let store = Arc::clone(&store);
            let target = target.clone();
            tokio::spawn(async move {
                account.change_email(target);
                account.save(store.as_ref()).await.map(|()| account.id)
            })
        })
        .collect();

    let mut winners = Vec::new();
    let mut taken = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(id) => winners.push(id),
            Err(AccountError::EmailTaken) => taken += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(winners.len(), 1);
    assert_eq!(taken, RACERS - 1);
    assert_eq!(store.len(), RACERS);

    let holder = store.find_by_email(&target).await.unwrap().unwrap();
    assert_eq!(holder.id, winners[0]);
}
