//! User repository backed by SeaORM, with soft delete.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::UserRepository;
use domain::{DomainError, DomainResult, User, UserId};

/// Concrete implementation of UserRepository over a relational database
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Permanently delete a user row, soft-deleted or not.
    ///
    /// Not part of `UserRepository`; used for administrative purges.
    pub async fn hard_delete(&self, id: UserId) -> DomainResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(storage_error)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found_id(id));
        }

        tracing::info!(user_id = id, "User permanently deleted");
        Ok(())
    }

    async fn find_active(&self, id: UserId) -> DomainResult<user::Model> {
        UserEntity::find_by_id(id)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| DomainError::not_found_id(id))
    }

    async fn find_active_by_email(&self, email: &str) -> DomainResult<Option<user::Model>> {
        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(storage_error)
    }
}

/// Map a write failure, turning the active-email index firing into a conflict
fn write_error(err: DbErr, email: &str) -> DomainError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::email_exists(email),
        _ => storage_error(err),
    }
}

fn storage_error(err: DbErr) -> DomainError {
    tracing::error!(error = %err, "Database operation failed");
    DomainError::repository(err)
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: UserId) -> DomainResult<User> {
        self.find_active(id).await.map(User::from)
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<User> {
        self.find_active_by_email(email)
            .await?
            .map(User::from)
            .ok_or_else(|| DomainError::not_found_email(email))
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let models = UserEntity::find()
            .filter(user::Column::DeletedAt.is_null())
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn save(&self, user: User) -> DomainResult<User> {
        // The partial unique index still catches concurrent inserts
        if self.find_active_by_email(user.email()).await?.is_some() {
            return Err(DomainError::email_exists(user.email()));
        }

        let now = Utc::now();
        let active_model = ActiveModel {
            name: Set(user.name().to_string()),
            email: Set(user.email().to_string()),
            password: Set(user.password().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, user.email()))?;

        Ok(User::from(model))
    }

    async fn update(&self, user: User) -> DomainResult<User> {
        // Only allow updating active (non-deleted) users
        let existing = self.find_active(user.id()).await?;

        if let Some(owner) = self.find_active_by_email(user.email()).await? {
            if owner.id != user.id() {
                return Err(DomainError::email_exists(user.email()));
            }
        }

        let updated_at = Utc::now().max(existing.updated_at);
        let mut active: ActiveModel = existing.into();
        active.name = Set(user.name().to_string());
        active.email = Set(user.email().to_string());
        active.password = Set(user.password().to_string());
        active.updated_at = Set(updated_at);

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, user.email()))?;

        Ok(User::from(model))
    }

    async fn delete(&self, id: UserId) -> DomainResult<()> {
        // Soft delete: set deleted_at timestamp
        let existing = self.find_active(id).await?;

        let mut active: ActiveModel = existing.into();
        let now = Utc::now();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);

        active.update(&self.db).await.map_err(storage_error)?;
        Ok(())
    }
}
