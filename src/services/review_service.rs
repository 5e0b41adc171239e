//! Review service - Customer feedback.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Caller, CreateReview, NewReview, Review, UpdateReview};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait ReviewService: Send + Sync {
    async fn list_reviews(&self) -> AppResult<Vec<Review>>;

    async fn get_review(&self, id: i32) -> AppResult<Review>;

    /// Every review written by one user; not-found when there are none
    async fn reviews_for_user(&self, user_id: i32) -> AppResult<Vec<Review>>;

    /// Non-admin callers may only write their own reviews
    async fn add_review(&self, request: CreateReview, caller: Caller) -> AppResult<Review>;

    async fn update_review(&self, request: UpdateReview, caller: Caller) -> AppResult<Review>;

    async fn delete_review(&self, id: i32) -> AppResult<()>;
}

pub struct ReviewManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ReviewManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_author_exists(&self, user_id: i32) -> AppResult<()> {
        match self.uow.users().find_by_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::bad_request(format!("user {} does not exist", user_id))),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> ReviewService for ReviewManager<U> {
    async fn list_reviews(&self) -> AppResult<Vec<Review>> {
        self.uow.reviews().list().await
    }

    async fn get_review(&self, id: i32) -> AppResult<Review> {
        self.uow.reviews().find_by_id(id).await?.ok_or_not_found("Review")
    }

    async fn reviews_for_user(&self, user_id: i32) -> AppResult<Vec<Review>> {
        self.uow.users().find_by_id(user_id).await?.ok_or_not_found("User")?;

        let reviews = self.uow.reviews().list_by_user(user_id).await?;
        if reviews.is_empty() {
            return Err(AppError::NotFound(
                "No reviews found for this user".to_string(),
            ));
        }
        Ok(reviews)
    }

    async fn add_review(&self, request: CreateReview, caller: Caller) -> AppResult<Review> {
        caller.ensure_acts_for(request.user_id)?;
        self.ensure_author_exists(request.user_id).await?;

        self.uow
            .reviews()
            .create(NewReview {
                user_id: request.user_id,
                rating: request.rating,
                content: request.content,
            })
            .await
    }

    async fn update_review(&self, request: UpdateReview, caller: Caller) -> AppResult<Review> {
        let stored = self.get_review(request.id).await?;
        caller.ensure_acts_for(stored.user_id)?;
        caller.ensure_acts_for(request.user_id)?;
        if request.user_id != stored.user_id {
            self.ensure_author_exists(request.user_id).await?;
        }

        self.uow
            .reviews()
            .update(Review {
                id: stored.id,
                user_id: request.user_id,
                rating: request.rating,
                content: request.content,
                created_at: stored.created_at,
            })
            .await
    }

    async fn delete_review(&self, id: i32) -> AppResult<()> {
        self.uow.reviews().delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::UserRole;
    use crate::infra::{MockReviewRepository, MockUserRepository};
    use crate::services::testing::TestUnitOfWork;

    fn author(id: i32) -> Caller {
        Caller::User {
            id,
            role: UserRole::User,
        }
    }

    fn review(id: i32, user_id: i32) -> Review {
        Review {
            id,
            user_id,
            rating: 4,
            content: "Smooth rental".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_reviews_for_user_without_reviews() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| {
            Ok(Some(crate::domain::User {
                id: 1,
                user_name: "quiet".to_string(),
                email: "quiet@example.com".to_string(),
                password_hash: String::new(),
                first_name: "Q".to_string(),
                last_name: "Uiet".to_string(),
                phone_number: None,
                role: Default::default(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }))
        });
        let mut reviews = MockReviewRepository::new();
        reviews.expect_list_by_user().returning(|_| Ok(vec![]));

        let uow = TestUnitOfWork::default().with_users(users).with_reviews(reviews);
        let err = ReviewManager::new(Arc::new(uow))
            .reviews_for_user(1)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_add_review_for_unknown_user() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));
        let mut reviews = MockReviewRepository::new();
        reviews.expect_create().never();

        let uow = TestUnitOfWork::default().with_users(users).with_reviews(reviews);
        let err = ReviewManager::new(Arc::new(uow))
            .add_review(CreateReview {
                user_id: 5,
                rating: 5,
                content: "Great".to_string(),
            }, Caller::System)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_update_review_same_author_skips_user_lookup() {
        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_find_by_id()
            .returning(|id| Ok(Some(review(id, 2))));
        reviews
            .expect_update()
            .withf(|r| r.rating == 1 && r.content == "Changed my mind")
            .returning(|r| Ok(r));

        let uow = TestUnitOfWork::default().with_reviews(reviews);
        let updated = ReviewManager::new(Arc::new(uow))
            .update_review(UpdateReview {
                id: 3,
                user_id: 2,
                rating: 1,
                content: "Changed my mind".to_string(),
            }, author(2))
            .await
            .unwrap();
        assert_eq!(updated.id, 3);
    }

    #[tokio::test]
    async fn test_cannot_rewrite_someone_elses_review() {
        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_find_by_id()
            .returning(|id| Ok(Some(review(id, 2))));
        reviews.expect_update().never();

        let uow = TestUnitOfWork::default().with_reviews(reviews);
        let err = ReviewManager::new(Arc::new(uow))
            .update_review(UpdateReview {
                id: 3,
                user_id: 7,
                rating: 1,
                content: "Hijacked".to_string(),
            }, author(7))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[tokio::test]
    async fn test_cannot_post_review_as_another_user() {
        let mut reviews = MockReviewRepository::new();
        reviews.expect_create().never();

        let uow = TestUnitOfWork::default().with_reviews(reviews);
        let err = ReviewManager::new(Arc::new(uow))
            .add_review(CreateReview {
                user_id: 2,
                rating: 1,
                content: "Sock puppet".to_string(),
            }, author(7))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }
}
