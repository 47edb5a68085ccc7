//! In-memory user repository.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use domain::{DomainError, DomainResult, Password, User, UserId};

use super::UserRepository;

/// Process-local repository guarded by a reader/writer lock.
///
/// Deletes are hard removals. Ids are never reused.
pub struct InMemoryUserRepository {
    state: RwLock<State>,
}

struct State {
    users: BTreeMap<UserId, User>,
    next_id: UserId,
}

impl State {
    fn email_taken(&self, email: &str, exclude_id: UserId) -> bool {
        self.users
            .values()
            .any(|u| u.email() == email && u.id() != exclude_id)
    }
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                users: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Repository pre-filled with three demo users (ids 1-3).
    ///
    /// # Errors
    /// Fails only if password hashing fails.
    pub fn with_demo_users() -> DomainResult<Self> {
        let now = Utc::now();
        let seeds = [
            ("张三", "zhangsan@example.com", "password123", Duration::hours(24)),
            ("李四", "lisi@example.com", "password456", Duration::hours(12)),
            ("王五", "wangwu@example.com", "password789", Duration::hours(6)),
        ];

        let mut users = BTreeMap::new();
        for (id, (name, email, password, age)) in (1..).zip(seeds) {
            let hash = Password::new(password)?.into_string();
            let at = now - age;
            users.insert(
                id,
                User::from_persisted(id, name.to_string(), email.to_string(), hash, at, at),
            );
        }

        let next_id = users.len() as UserId + 1;
        tracing::debug!(count = users.len(), "Seeded demo users");

        Ok(Self {
            state: RwLock::new(State { users, next_id }),
        })
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> DomainResult<User> {
        let state = self.state.read().await;
        state
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found_id(id))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<User> {
        let state = self.state.read().await;
        state
            .users
            .values()
            .find(|u| u.email() == email)
            .cloned()
            .ok_or_else(|| DomainError::not_found_email(email))
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().cloned().collect())
    }

    async fn save(&self, user: User) -> DomainResult<User> {
        // Check and insert under one write guard
        let mut state = self.state.write().await;

        if state.email_taken(user.email(), 0) {
            return Err(DomainError::email_exists(user.email()));
        }

        let id = state.next_id;
        state.next_id += 1;

        let saved = user.into_persisted(id, Utc::now());
        state.users.insert(id, saved.clone());
        Ok(saved)
    }

    async fn update(&self, user: User) -> DomainResult<User> {
        let mut state = self.state.write().await;

        let created_at = match state.users.get(&user.id()) {
            Some(existing) => existing.created_at(),
            None => return Err(DomainError::not_found_id(user.id())),
        };

        if state.email_taken(user.email(), user.id()) {
            return Err(DomainError::email_exists(user.email()));
        }

        let mut stored = User::from_persisted(
            user.id(),
            user.name().to_string(),
            user.email().to_string(),
            user.password().to_string(),
            created_at,
            user.updated_at(),
        );
        stored.touch();

        state.users.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: UserId) -> DomainResult<()> {
        let mut state = self.state.write().await;
        state
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found_id(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_users_seeded() {
        let repo = InMemoryUserRepository::with_demo_users().unwrap();

        let users = repo.find_all().await.unwrap();
        let names: Vec<&str> = users.iter().map(|u| u.name()).collect();
        assert_eq!(names, vec!["张三", "李四", "王五"]);

        let first = repo.find_by_email("zhangsan@example.com").await.unwrap();
        assert_eq!(first.id(), 1);
        assert!(Password::from_hash(first.password().to_string()).verify("password123"));
        assert!(first.created_at() < users[2].created_at());
    }

    #[tokio::test]
    async fn test_seeded_repository_continues_ids() {
        let repo = InMemoryUserRepository::with_demo_users().unwrap();

        let user = User::new("赵六", "zhaoliu@example.com", "password000").unwrap();
        let saved = repo.save(user).await.unwrap();
        assert_eq!(saved.id(), 4);
    }
}
