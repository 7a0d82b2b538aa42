//! Contact request repository.
//!
//! State changes are conditional on the row still being pending, and report
//! whether they took effect. Callers treat `false` as "someone else got there
//! first".

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::domain::{ContactRequest, RequestStatus};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ContactRequestRepository: Send + Sync {
    /// Open a pending request; a second pending request for the same user
    /// is a `Conflict`.
    async fn create(&self, user_id: Uuid) -> AppResult<ContactRequest>;

    /// The request with this id, only if it is still pending.
    async fn find_pending(&self, id: i32) -> AppResult<Option<ContactRequest>>;

    /// The user's pending request, if any.
    async fn find_pending_for_user(&self, user_id: Uuid) -> AppResult<Option<ContactRequest>>;

    /// All requests in a status, newest first.
    async fn list_by_status(&self, status: RequestStatus) -> AppResult<Vec<ContactRequest>>;

    /// All requests owned by a user regardless of status, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<ContactRequest>>;

    async fn mark_accepted(&self, id: i32, seller_id: i32) -> AppResult<bool>;

    async fn mark_cancelled(&self, id: i32) -> AppResult<bool>;

    async fn delete(&self, id: i32) -> AppResult<bool>;
}

pub(crate) mod query {
    use sea_orm::sea_query::Expr;
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    };
    use uuid::Uuid;

    use crate::config::{STATUS_ACCEPTED, STATUS_CANCELLED, STATUS_PENDING};
    use crate::domain::{ContactRequest, RequestStatus};
    use crate::errors::{AppError, AppResult};
    use crate::infra::repositories::entities::contact_request::{
        self, ActiveModel, Column, Entity as ContactRequestEntity, Model,
    };

    fn into_domain(models: Vec<Model>) -> AppResult<Vec<ContactRequest>> {
        models.into_iter().map(ContactRequest::try_from).collect()
    }

    pub async fn create<C: ConnectionTrait>(db: &C, user_id: Uuid) -> AppResult<ContactRequest> {
        let active_model = ActiveModel {
            user_id: Set(user_id),
            created_at: Set(chrono::Utc::now()),
            status: Set(STATUS_PENDING.to_string()),
            accepting_seller_id: Set(None),
            ..Default::default()
        };

        let model = active_model
            .insert(db)
            .await
            .map_err(|e| AppError::from_insert(e, "a pending contact request already exists"))?;

        ContactRequest::try_from(model)
    }

    pub async fn find_pending<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> AppResult<Option<ContactRequest>> {
        ContactRequestEntity::find_by_id(id)
            .filter(Column::Status.eq(STATUS_PENDING))
            .one(db)
            .await?
            .map(ContactRequest::try_from)
            .transpose()
    }

    pub async fn find_pending_for_user<C: ConnectionTrait>(
        db: &C,
        user_id: Uuid,
    ) -> AppResult<Option<ContactRequest>> {
        ContactRequestEntity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Status.eq(STATUS_PENDING))
            .order_by_desc(Column::CreatedAt)
            .one(db)
            .await?
            .map(ContactRequest::try_from)
            .transpose()
    }

    pub async fn list_by_status<C: ConnectionTrait>(
        db: &C,
        status: RequestStatus,
    ) -> AppResult<Vec<ContactRequest>> {
        let models = ContactRequestEntity::find()
            .filter(Column::Status.eq(status.as_str()))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await?;

        into_domain(models)
    }

    pub async fn list_for_user<C: ConnectionTrait>(
        db: &C,
        user_id: Uuid,
    ) -> AppResult<Vec<ContactRequest>> {
        let models = ContactRequestEntity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await?;

        into_domain(models)
    }

    pub async fn mark_accepted<C: ConnectionTrait>(
        db: &C,
        id: i32,
        seller_id: i32,
    ) -> AppResult<bool> {
        let result = ContactRequestEntity::update_many()
            .col_expr(Column::Status, Expr::value(STATUS_ACCEPTED))
            .col_expr(Column::AcceptingSellerId, Expr::value(seller_id))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(STATUS_PENDING))
            .exec(db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    pub async fn mark_cancelled<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<bool> {
        let result = ContactRequestEntity::update_many()
            .col_expr(Column::Status, Expr::value(STATUS_CANCELLED))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(STATUS_PENDING))
            .exec(db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<bool> {
        let result = ContactRequestEntity::delete_many()
            .filter(contact_request::Column::Id.eq(id))
            .exec(db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}

pub struct ContactRequestStore {
    db: DatabaseConnection,
}

impl ContactRequestStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContactRequestRepository for ContactRequestStore {
    async fn create(&self, user_id: Uuid) -> AppResult<ContactRequest> {
        query::create(&self.db, user_id).await
    }

    async fn find_pending(&self, id: i32) -> AppResult<Option<ContactRequest>> {
        query::find_pending(&self.db, id).await
    }

    async fn find_pending_for_user(&self, user_id: Uuid) -> AppResult<Option<ContactRequest>> {
        query::find_pending_for_user(&self.db, user_id).await
    }

    async fn list_by_status(&self, status: RequestStatus) -> AppResult<Vec<ContactRequest>> {
        query::list_by_status(&self.db, status).await
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<ContactRequest>> {
        query::list_for_user(&self.db, user_id).await
    }

    async fn mark_accepted(&self, id: i32, seller_id: i32) -> AppResult<bool> {
        query::mark_accepted(&self.db, id, seller_id).await
    }

    async fn mark_cancelled(&self, id: i32) -> AppResult<bool> {
        query::mark_cancelled(&self.db, id).await
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        query::delete(&self.db, id).await
    }
}
