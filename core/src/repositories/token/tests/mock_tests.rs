//! Unit tests for the in-memory token repository

use crate::domain::entities::token::RefreshToken;
use crate::repositories::token::{MockTokenRepository, TokenRepository};

#[tokio::test]
async fn insert_then_find_valid_returns_issued_at() {
    let repo = MockTokenRepository::new();
    let token = RefreshToken::new("signed.token.a", 56, 234);

    repo.insert(&token).await.unwrap();

    let issued_at = repo.find_valid(56, "signed.token.a").await.unwrap();
    assert_eq!(issued_at, Some(234));
}

#[tokio::test]
async fn find_valid_misses_on_wrong_user_or_token() {
    let repo = MockTokenRepository::new();
    repo.insert(&RefreshToken::new("signed.token.a", 56, 234))
        .await
        .unwrap();

    assert_eq!(repo.find_valid(56, "signed.token.b").await.unwrap(), None);
    assert_eq!(repo.find_valid(57, "signed.token.a").await.unwrap(), None);
}

#[tokio::test]
async fn find_latest_picks_most_recently_issued() {
    let repo = MockTokenRepository::new();
    repo.insert(&RefreshToken::new("older", 56, 100)).await.unwrap();
    repo.insert(&RefreshToken::new("newest", 56, 300)).await.unwrap();
    repo.insert(&RefreshToken::new("middle", 56, 200)).await.unwrap();
    repo.insert(&RefreshToken::new("other-user", 99, 400))
        .await
        .unwrap();

    let latest = repo.find_latest(56).await.unwrap().unwrap();
    assert_eq!(latest.token, "newest");
    assert_eq!(latest.issued_at, 300);
}

#[tokio::test]
async fn find_latest_is_none_for_unknown_user() {
    let repo = MockTokenRepository::new();
    assert!(repo.find_latest(56).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_issued_before_is_a_strict_cutoff() {
    let repo = MockTokenRepository::new();
    repo.insert(&RefreshToken::new("dead", 56, 100)).await.unwrap();
    repo.insert(&RefreshToken::new("boundary", 56, 140))
        .await
        .unwrap();
    repo.insert(&RefreshToken::new("alive", 56, 200)).await.unwrap();

    let deleted = repo.delete_issued_before(140).await.unwrap();

    assert_eq!(deleted, 1);
    assert_eq!(repo.find_valid(56, "dead").await.unwrap(), None);
    // A row issued exactly at the cutoff survives
    assert_eq!(repo.find_valid(56, "boundary").await.unwrap(), Some(140));
    assert_eq!(repo.find_valid(56, "alive").await.unwrap(), Some(200));
}

#[tokio::test]
async fn a_user_may_hold_multiple_rows() {
    let repo = MockTokenRepository::new();
    repo.insert(&RefreshToken::new("device-a", 56, 100)).await.unwrap();
    repo.insert(&RefreshToken::new("device-b", 56, 110)).await.unwrap();

    assert_eq!(repo.row_count().await, 2);
    assert_eq!(repo.find_valid(56, "device-a").await.unwrap(), Some(100));
    assert_eq!(repo.find_valid(56, "device-b").await.unwrap(), Some(110));
}
