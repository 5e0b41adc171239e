//! User service - Handles user-related business logic.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Caller, CreateUser, NewUser, Password, UpdateUser, User, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
///
/// Only admin callers may assign a role other than the default (or the
/// stored one, on update).
#[async_trait]
pub trait UserService: Send + Sync {
    async fn list_users(&self) -> AppResult<Vec<User>>;

    async fn get_user(&self, id: i32) -> AppResult<User>;

    async fn get_user_by_user_name(&self, user_name: &str) -> AppResult<User>;

    /// Register a user, hashing the supplied password
    async fn add_user(&self, request: CreateUser, caller: Caller) -> AppResult<User>;

    /// Replace a user's profile; password and role are kept when omitted.
    ///
    /// Callers other than admins and the account itself may not set a
    /// password or touch an admin account.
    async fn update_user(&self, request: UpdateUser, caller: Caller) -> AppResult<User>;

    async fn delete_user(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Fail with 409 when `user_name` belongs to someone other than `owner`.
    async fn ensure_user_name_free(&self, user_name: &str, owner: Option<i32>) -> AppResult<()> {
        match self.uow.users().find_by_user_name(user_name).await? {
            Some(existing) if Some(existing.id) != owner => {
                Err(AppError::conflict(format!("User name '{}'", user_name)))
            }
            _ => Ok(()),
        }
    }
}

fn check_role(requested: UserRole, current: UserRole, caller: Caller) -> AppResult<()> {
    if requested != current && !caller.is_admin() {
        tracing::warn!(%requested, "Role change refused for non-admin caller");
        return Err(AppError::Forbidden);
    }
    Ok(())
}

/// Strangers may edit plain profile fields of non-admin accounts only.
fn check_update_access(stored: &User, request: &UpdateUser, caller: Caller) -> AppResult<()> {
    if caller.is_admin() || caller.is(stored.id) {
        return Ok(());
    }
    if request.password.is_some() || stored.is_admin() {
        tracing::warn!(user_id = stored.id, ?caller, "Account update refused");
        return Err(AppError::Forbidden);
    }
    Ok(())
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.uow.users().list().await
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.uow.users().find_by_id(id).await?.ok_or_not_found("User")
    }

    async fn get_user_by_user_name(&self, user_name: &str) -> AppResult<User> {
        self.uow
            .users()
            .find_by_user_name(user_name)
            .await?
            .ok_or_not_found("User")
    }

    async fn add_user(&self, request: CreateUser, caller: Caller) -> AppResult<User> {
        let role = request.role.unwrap_or_default();
        check_role(role, UserRole::default(), caller)?;
        self.ensure_user_name_free(&request.user_name, None).await?;

        let password_hash = Password::new(&request.password)?.into_string();
        let user = self
            .uow
            .users()
            .create(NewUser {
                user_name: request.user_name,
                email: request.email,
                password_hash,
                first_name: request.first_name,
                last_name: request.last_name,
                phone_number: request.phone_number,
                role,
            })
            .await?;

        tracing::info!(user_id = user.id, role = %user.role, "User created");
        Ok(user)
    }

    async fn update_user(&self, request: UpdateUser, caller: Caller) -> AppResult<User> {
        let stored = self.get_user(request.id).await?;
        check_update_access(&stored, &request, caller)?;

        let role = request.role.unwrap_or(stored.role);
        check_role(role, stored.role, caller)?;
        if request.user_name != stored.user_name {
            self.ensure_user_name_free(&request.user_name, Some(stored.id)).await?;
        }

        let password_hash = match request.password.as_deref() {
            Some(plain) => Password::new(plain)?.into_string(),
            None => stored.password_hash,
        };

        self.uow
            .users()
            .update(User {
                id: stored.id,
                user_name: request.user_name,
                email: request.email,
                password_hash,
                first_name: request.first_name,
                last_name: request.last_name,
                phone_number: request.phone_number,
                role,
                created_at: stored.created_at,
                updated_at: stored.updated_at,
            })
            .await
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        self.uow.users().delete(id).await?;
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::predicate::eq;

    use super::*;
    use crate::infra::MockUserRepository;
    use crate::services::testing::TestUnitOfWork;

    fn stored_user(id: i32, user_name: &str) -> User {
        User {
            id,
            user_name: user_name.to_string(),
            email: format!("{}@example.com", user_name),
            password_hash: "stored-hash".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            phone_number: None,
            role: UserRole::User,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn create_request(role: Option<UserRole>) -> CreateUser {
        CreateUser {
            user_name: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            password: "SecurePass123".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            phone_number: None,
            role,
        }
    }

    fn update_request(id: i32) -> UpdateUser {
        UpdateUser {
            id,
            user_name: "jdoe".to_string(),
            email: "new@example.com".to_string(),
            password: None,
            first_name: "Johnny".to_string(),
            last_name: "Doe".to_string(),
            phone_number: Some("555".to_string()),
            role: None,
        }
    }

    fn admin() -> Caller {
        Caller::User {
            id: 1,
            role: UserRole::Admin,
        }
    }

    fn self_caller(id: i32) -> Caller {
        Caller::User {
            id,
            role: UserRole::User,
        }
    }

    fn service(repo: MockUserRepository) -> UserManager<TestUnitOfWork> {
        UserManager::new(Arc::new(TestUnitOfWork::default().with_users(repo)))
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().with(eq(9)).returning(|_| Ok(None));

        let err = service(repo).get_user(9).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "User not found"));
    }

    #[tokio::test]
    async fn test_add_user_hashes_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_user_name().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new| {
                new.role == UserRole::User
                    && new.password_hash != "SecurePass123"
                    && Password::from_hash(new.password_hash.as_str()).verify("SecurePass123")
            })
            .returning(|new| {
                let mut user = stored_user(1, &new.user_name);
                user.password_hash = new.password_hash;
                Ok(user)
            });

        let user = service(repo).add_user(create_request(None), Caller::Anonymous).await.unwrap();
        assert_eq!(user.id, 1);
    }

    #[tokio::test]
    async fn test_add_user_duplicate_user_name() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_user_name()
            .returning(|name| Ok(Some(stored_user(3, name))));

        let err = service(repo).add_user(create_request(None), Caller::Anonymous).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_add_admin_requires_admin_caller() {
        let err = service(MockUserRepository::new())
            .add_user(create_request(Some(UserRole::Admin)), Caller::Anonymous)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_user_name().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new| new.role == UserRole::Admin)
            .returning(|new| {
                let mut user = stored_user(2, &new.user_name);
                user.role = new.role;
                Ok(user)
            });

        let user = service(repo)
            .add_user(create_request(Some(UserRole::Admin)), admin())
            .await
            .unwrap();
        assert!(user.is_admin());
    }

    #[tokio::test]
    async fn test_update_keeps_hash_and_role_when_omitted() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(5))
            .returning(|id| Ok(Some(stored_user(id, "jdoe"))));
        repo.expect_update()
            .withf(|user| {
                user.password_hash == "stored-hash"
                    && user.role == UserRole::User
                    && user.email == "new@example.com"
            })
            .returning(|user| Ok(user));

        let user = service(repo).update_user(update_request(5), Caller::Anonymous).await.unwrap();
        assert_eq!(user.first_name, "Johnny");
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_update().never();

        let err = service(repo).update_user(update_request(77), admin()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_self_promotion_refused() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored_user(id, "jdoe"))));
        repo.expect_update().never();

        let mut request = update_request(5);
        request.role = Some(UserRole::Admin);
        let err = service(repo).update_user(request, self_caller(5)).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[tokio::test]
    async fn test_rename_to_taken_user_name() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored_user(id, "original"))));
        repo.expect_find_by_user_name()
            .with(eq("jdoe"))
            .returning(|name| Ok(Some(stored_user(99, name))));

        let err = service(repo).update_user(update_request(5), self_caller(5)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_stranger_cannot_set_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored_user(id, "jdoe"))));
        repo.expect_update().never();

        let mut request = update_request(5);
        request.password = Some("Hijacked123!".to_string());

        let err = service(repo)
            .update_user(request, Caller::Anonymous)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[tokio::test]
    async fn test_stranger_cannot_touch_admin_account() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|id| {
            let mut user = stored_user(id, "jdoe");
            user.role = UserRole::Admin;
            Ok(Some(user))
        });
        repo.expect_update().never();

        let err = service(repo)
            .update_user(update_request(5), self_caller(6))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[tokio::test]
    async fn test_owner_may_change_own_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored_user(id, "jdoe"))));
        repo.expect_update()
            .withf(|user| Password::from_hash(user.password_hash.as_str()).verify("Rotated123!"))
            .returning(|user| Ok(user));

        let mut request = update_request(5);
        request.password = Some("Rotated123!".to_string());
        service(repo).update_user(request, self_caller(5)).await.unwrap();
    }
}
