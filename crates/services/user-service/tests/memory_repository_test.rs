//! In-memory repository tests.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use tokio_test::{assert_err, assert_ok};

use domain::{DomainError, User};
use user_service_lib::repository::{InMemoryUserRepository, UserRepository};

fn new_user(name: &str, email: &str) -> User {
    User::new(name, email, "password123").unwrap()
}

#[tokio::test]
async fn test_save_assigns_first_id() {
    let repo = InMemoryUserRepository::new();

    let saved = assert_ok!(repo.save(new_user("张三", "zhangsan@example.com")).await);

    assert_eq!(saved.id(), 1);
    assert_eq!(saved.name(), "张三");
    assert!(saved.is_persisted());
}

#[tokio::test]
async fn test_ids_are_never_reused() {
    let repo = InMemoryUserRepository::new();

    repo.save(new_user("张三", "zhangsan@example.com")).await.unwrap();
    let second = repo.save(new_user("李四", "lisi@example.com")).await.unwrap();
    repo.delete(second.id()).await.unwrap();

    let third = repo.save(new_user("王五", "wangwu@example.com")).await.unwrap();
    assert_eq!(third.id(), 3);
}

#[tokio::test]
async fn test_duplicate_email_rejected_until_deleted() {
    let repo = InMemoryUserRepository::new();
    let first = repo.save(new_user("张三", "same@example.com")).await.unwrap();

    let err = assert_err!(repo.save(new_user("李四", "same@example.com")).await);
    assert_eq!(err, DomainError::email_exists("same@example.com"));

    repo.delete(first.id()).await.unwrap();
    let again = assert_ok!(repo.save(new_user("李四", "same@example.com")).await);
    assert_eq!(again.id(), 2);
}

#[tokio::test]
async fn test_reads_return_copies() {
    let repo = InMemoryUserRepository::new();
    let saved = repo.save(new_user("张三", "zhangsan@example.com")).await.unwrap();

    let mut copy = repo.find_by_id(saved.id()).await.unwrap();
    copy.update_name("李四").unwrap();

    let stored = repo.find_by_id(saved.id()).await.unwrap();
    assert_eq!(stored.name(), "张三");
}

#[tokio::test]
async fn test_repeated_reads_are_equal() {
    let repo = InMemoryUserRepository::new();
    let saved = repo.save(new_user("张三", "zhangsan@example.com")).await.unwrap();

    let a = repo.find_by_id(saved.id()).await.unwrap();
    let b = repo.find_by_id(saved.id()).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_find_by_email() {
    let repo = InMemoryUserRepository::new();
    repo.save(new_user("张三", "zhangsan@example.com")).await.unwrap();

    let found = repo.find_by_email("zhangsan@example.com").await.unwrap();
    assert_eq!(found.id(), 1);

    let err = repo.find_by_email("nobody@example.com").await.unwrap_err();
    assert_eq!(err, DomainError::not_found_email("nobody@example.com"));
}

#[tokio::test]
async fn test_find_all_in_id_order() {
    let repo = InMemoryUserRepository::new();
    assert!(repo.find_all().await.unwrap().is_empty());

    for (name, email) in [("张三", "a@example.com"), ("李四", "b@example.com"), ("王五", "c@example.com")] {
        repo.save(new_user(name, email)).await.unwrap();
    }

    let ids: Vec<i32> = repo.find_all().await.unwrap().iter().map(|u| u.id()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_update_replaces_fields_and_keeps_created_at() {
    let repo = InMemoryUserRepository::new();
    let saved = repo.save(new_user("张三", "zhangsan@example.com")).await.unwrap();

    let mut changed = saved.clone();
    changed.update_name("张三丰").unwrap();
    changed.update_email("zsf@example.com").unwrap();

    let updated = repo.update(changed).await.unwrap();
    assert_eq!(updated.name(), "张三丰");
    assert_eq!(updated.email(), "zsf@example.com");
    assert_eq!(updated.created_at(), saved.created_at());
    assert!(updated.updated_at() >= saved.updated_at());

    let stored = repo.find_by_id(saved.id()).await.unwrap();
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn test_update_missing_user() {
    let repo = InMemoryUserRepository::new();
    let ghost = new_user("张三", "zhangsan@example.com").into_persisted(42, chrono::Utc::now());

    let err = repo.update(ghost).await.unwrap_err();
    assert_eq!(err, DomainError::not_found_id(42));
}

#[tokio::test]
async fn test_update_to_other_users_email() {
    let repo = InMemoryUserRepository::new();
    repo.save(new_user("张三", "zhangsan@example.com")).await.unwrap();
    let lisi = repo.save(new_user("李四", "lisi@example.com")).await.unwrap();

    let mut changed = lisi.clone();
    changed.update_email("zhangsan@example.com").unwrap();

    let err = repo.update(changed).await.unwrap_err();
    assert_eq!(err, DomainError::email_exists("zhangsan@example.com"));
    assert_eq!(repo.find_by_id(lisi.id()).await.unwrap().email(), "lisi@example.com");
}

#[tokio::test]
async fn test_delete_missing_user() {
    let repo = InMemoryUserRepository::new();

    let err = repo.delete(999).await.unwrap_err();
    assert_eq!(err, DomainError::not_found_id(999));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_saves_with_same_email() {
    // Repeat so the saves actually interleave across worker threads
    for round in 0..50 {
        let repo = Arc::new(InMemoryUserRepository::new());
        let email = format!("race{}@example.com", round);

        let attempts = (0..16).map(|i| {
            let repo = repo.clone();
            let email = email.clone();
            tokio::spawn(async move { repo.save(new_user(&format!("user{}", i), &email)).await })
        });

        let results: Vec<_> = join_all(attempts)
            .await
            .into_iter()
            .map(|joined| joined.unwrap())
            .collect();

        let winners = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1, "round {}", round);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, DomainError::EmailExists { .. })));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_saves_get_distinct_ids() {
    let repo = Arc::new(InMemoryUserRepository::new());

    let saves = (0..20).map(|i| {
        let repo = repo.clone();
        tokio::spawn(async move {
            repo.save(new_user(&format!("user{}", i), &format!("user{}@example.com", i)))
                .await
        })
    });

    let ids: HashSet<i32> = join_all(saves)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap().id())
        .collect();

    assert_eq!(ids, (1..=20).collect::<HashSet<i32>>());
}
