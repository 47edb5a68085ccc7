//! Application service tests over the in-memory repository.

use std::sync::Arc;

use tokio_test::assert_ok;

use domain::{
    CreateUserRequest, DomainError, Password, UpdateUserRequest, UserResponse, ValidationError,
};
use user_service_lib::repository::{InMemoryUserRepository, UserRepository};
use user_service_lib::service::{UserDomainService, UserManager, UserService};

fn setup() -> (Arc<InMemoryUserRepository>, UserManager) {
    let repo = Arc::new(InMemoryUserRepository::new());
    let manager = UserManager::new(repo.clone());
    (repo, manager)
}

fn create(name: &str, email: &str) -> CreateUserRequest {
    CreateUserRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: "password123".to_string(),
    }
}

fn update(name: &str, email: &str) -> UpdateUserRequest {
    UpdateUserRequest {
        name: name.to_string(),
        email: email.to_string(),
    }
}

#[tokio::test]
async fn test_create_user() {
    let (repo, manager) = setup();

    let response = assert_ok!(manager.create_user(create("张三", "zhangsan@example.com")).await);
    assert_eq!(
        response,
        UserResponse {
            id: 1,
            name: "张三".to_string(),
            email: "zhangsan@example.com".to_string(),
        }
    );

    // Stored password is a hash of the submitted one
    let stored = repo.find_by_id(1).await.unwrap();
    assert_ne!(stored.password(), "password123");
    assert!(Password::from_hash(stored.password().to_string()).verify("password123"));
}

#[tokio::test]
async fn test_create_duplicate_email() {
    let (_repo, manager) = setup();
    manager.create_user(create("张三", "same@example.com")).await.unwrap();

    let err = manager
        .create_user(create("李四", "same@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::email_exists("same@example.com"));
}

#[tokio::test]
async fn test_create_invalid_name() {
    let (repo, manager) = setup();

    let err = manager
        .create_user(create("", "test@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Validation(ValidationError::EmptyName));
    assert!(repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_and_list_users() {
    let (_repo, manager) = setup();
    manager.create_user(create("张三", "zhangsan@example.com")).await.unwrap();
    manager.create_user(create("李四", "lisi@example.com")).await.unwrap();

    let user = manager.get_user(2).await.unwrap();
    assert_eq!(user.name, "李四");

    let all = manager.get_all_users().await.unwrap();
    assert_eq!(all.len(), 2);

    assert_eq!(manager.get_user(99).await.unwrap_err(), DomainError::not_found_id(99));
}

#[tokio::test]
async fn test_update_user_keeping_own_email() {
    let (_repo, manager) = setup();
    manager.create_user(create("张三", "zhangsan@example.com")).await.unwrap();

    let response = manager
        .update_user(1, update("张三丰", "zhangsan@example.com"))
        .await
        .unwrap();
    assert_eq!(response.name, "张三丰");
    assert_eq!(response.email, "zhangsan@example.com");
}

#[tokio::test]
async fn test_update_to_taken_email() {
    let (repo, manager) = setup();
    manager.create_user(create("张三", "zhangsan@example.com")).await.unwrap();
    manager.create_user(create("李四", "lisi@example.com")).await.unwrap();

    let err = manager
        .update_user(1, update("李四", "lisi@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::email_exists("lisi@example.com"));

    let unchanged = repo.find_by_id(1).await.unwrap();
    assert_eq!(unchanged.name(), "张三");
}

#[tokio::test]
async fn test_update_invalid_fields_not_persisted() {
    let (repo, manager) = setup();
    manager.create_user(create("张三", "zhangsan@example.com")).await.unwrap();
    let before = repo.find_by_id(1).await.unwrap();

    let err = manager
        .update_user(1, update("张三", "not-an-email"))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Validation(ValidationError::InvalidEmailFormat));
    assert_eq!(repo.find_by_id(1).await.unwrap(), before);
}

#[tokio::test]
async fn test_update_missing_user() {
    let (_repo, manager) = setup();

    let err = manager
        .update_user(7, update("张三", "zhangsan@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::not_found_id(7));
}

#[tokio::test]
async fn test_delete_user() {
    let (_repo, manager) = setup();
    manager.create_user(create("张三", "zhangsan@example.com")).await.unwrap();

    assert_ok!(manager.delete_user(1).await);
    assert_eq!(manager.get_user(1).await.unwrap_err(), DomainError::not_found_id(1));
    assert_eq!(manager.delete_user(1).await.unwrap_err(), DomainError::not_found_id(1));
}

#[tokio::test]
async fn test_domain_service_scenario_with_seeded_users() {
    let repo = Arc::new(InMemoryUserRepository::with_demo_users().unwrap());
    let domain = UserDomainService::new(repo);

    // 李四 (id 2) may not take 张三's email
    let err = domain
        .validate_user_for_update(2, "李四", "zhangsan@example.com")
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::email_exists("zhangsan@example.com"));

    assert_ok!(domain.check_email_unique("lisi@example.com", 2).await);
    assert_ok!(
        domain
            .validate_user_for_creation("赵六", "zhaoliu@example.com", "password000")
            .await
    );
}
