//! User repository.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::domain::{NewUser, User};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Emails are stored lowercased; callers pass the normalized form.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a user; a taken email is a `Conflict`.
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Whether any account exists at all.
    async fn any_exists(&self) -> AppResult<bool>;
}

/// Queries shared by the pooled store and the transaction-scoped repository.
pub(crate) mod query {
    use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
    use uuid::Uuid;

    use crate::domain::{NewUser, User};
    use crate::errors::{AppError, AppResult};
    use crate::infra::repositories::entities::user::{self, ActiveModel, Entity as UserEntity};

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<Option<User>> {
        UserEntity::find_by_id(id)
            .one(db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> AppResult<Option<User>> {
        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    pub async fn create<C: ConnectionTrait>(db: &C, new_user: NewUser) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            role: Set(new_user.role.as_str().to_string()),
            is_active: Set(true),
            is_staff: Set(new_user.is_staff),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(db)
            .await
            .map_err(|e| AppError::from_insert(e, "email already registered"))?;

        User::try_from(model)
    }

    pub async fn any_exists<C: ConnectionTrait>(db: &C) -> AppResult<bool> {
        Ok(UserEntity::find().one(db).await?.is_some())
    }
}

/// Pooled-connection implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        query::find_by_id(&self.db, id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        query::find_by_email(&self.db, email).await
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        query::create(&self.db, user).await
    }

    async fn any_exists(&self) -> AppResult<bool> {
        query::any_exists(&self.db).await
    }
}
