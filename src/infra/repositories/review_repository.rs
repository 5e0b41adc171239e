//! Review repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::review::{self, ActiveModel, Entity as ReviewEntity};
use super::write_error;
use crate::domain::{NewReview, Review};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Review>>;

    async fn list(&self) -> AppResult<Vec<Review>>;

    async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Review>>;

    async fn create(&self, review: NewReview) -> AppResult<Review>;

    async fn update(&self, review: Review) -> AppResult<Review>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub struct ReviewStore {
    db: DatabaseConnection,
}

impl ReviewStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepository for ReviewStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Review>> {
        let result = ReviewEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Review::from))
    }

    async fn list(&self) -> AppResult<Vec<Review>> {
        let models = ReviewEntity::find()
            .order_by_asc(review::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Review::from).collect())
    }

    async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Review>> {
        let models = ReviewEntity::find()
            .filter(review::Column::UserId.eq(user_id))
            .order_by_asc(review::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Review::from).collect())
    }

    async fn create(&self, review: NewReview) -> AppResult<Review> {
        let active_model = ActiveModel {
            user_id: Set(review.user_id),
            rating: Set(review.rating),
            content: Set(review.content),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "Review"))?;
        Ok(Review::from(model))
    }

    async fn update(&self, review: Review) -> AppResult<Review> {
        let existing = ReviewEntity::find_by_id(review.id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Review")?;

        let mut active: ActiveModel = existing.into();
        active.user_id = Set(review.user_id);
        active.rating = Set(review.rating);
        active.content = Set(review.content);

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "Review"))?;
        Ok(Review::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = ReviewEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Review"));
        }

        Ok(())
    }
}
