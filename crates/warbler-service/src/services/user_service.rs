use crate::models::messages::Message;
use crate::models::users::{NewUser, User};
use crate::repositories::message_repository::MessageRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{is_unique_violation, ModelError};
use std::sync::Arc;

#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<UserRepository>,
    message_repository: Arc<MessageRepository>,
}

impl UserService {
    pub fn new(
        user_repository: Arc<UserRepository>,
        message_repository: Arc<MessageRepository>,
    ) -> Self {
        Self {
            user_repository,
            message_repository,
        }
    }

    /// Creates a user account with a bcrypt-hashed password.
    ///
    /// An empty password fails with `ModelError::InvalidPassword` before any
    /// storage access. Username/email uniqueness is NOT pre-checked; a
    /// conflict surfaces as `ModelError::Integrity` from the insert.
    pub async fn signup(&self, new_user: NewUser) -> Result<User, ModelError> {
        let password_hash = User::hash_password(&new_user.password)?;
        let user = self
            .user_repository
            .insert_user(&new_user, &password_hash)
            .await?;
        tracing::debug!(user_id = user.id, username = %user.username, "user signed up");
        Ok(user)
    }

    /// Verifies a username/password pair.
    ///
    /// Returns `Ok(None)` both for an unknown username and for a wrong
    /// password, so callers cannot enumerate accounts. Only storage faults
    /// are errors.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, ModelError> {
        let Some(user) = self.user_repository.find_by_username(username).await? else {
            return Ok(None);
        };

        if user.verify_password(password) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, ModelError> {
        Ok(self.user_repository.find_by_id(id).await?)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, ModelError> {
        Ok(self.user_repository.find_by_username(username).await?)
    }

    /// Creates the directed follow edge follower -> followed.
    ///
    /// A duplicate edge maps to `ModelError::AlreadyFollowing`; following a
    /// nonexistent user surfaces the foreign-key violation as
    /// `ModelError::Integrity`.
    pub async fn follow(&self, follower_id: i64, followed_id: i64) -> Result<(), ModelError> {
        self.user_repository
            .add_follow(follower_id, followed_id)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    ModelError::AlreadyFollowing
                } else {
                    err.into()
                }
            })?;
        tracing::debug!(follower_id, followed_id, "follow created");
        Ok(())
    }

    /// Removes the follow edge if present; unfollowing twice is not an error.
    pub async fn unfollow(&self, follower_id: i64, followed_id: i64) -> Result<(), ModelError> {
        self.user_repository
            .remove_follow(follower_id, followed_id)
            .await?;
        Ok(())
    }

    pub async fn is_following(
        &self,
        follower_id: i64,
        followed_id: i64,
    ) -> Result<bool, ModelError> {
        Ok(self
            .user_repository
            .is_following(follower_id, followed_id)
            .await?)
    }

    pub async fn is_followed_by(&self, user_id: i64, other_id: i64) -> Result<bool, ModelError> {
        Ok(self.user_repository.is_following(other_id, user_id).await?)
    }

    pub async fn followers(&self, user_id: i64) -> Result<Vec<User>, ModelError> {
        Ok(self.user_repository.list_followers(user_id).await?)
    }

    pub async fn following(&self, user_id: i64) -> Result<Vec<User>, ModelError> {
        Ok(self.user_repository.list_following(user_id).await?)
    }

    pub async fn post_message(&self, user_id: i64, text: &str) -> Result<Message, ModelError> {
        Ok(self.message_repository.insert_message(user_id, text).await?)
    }

    /// The user's messages, newest first.
    pub async fn messages(&self, user_id: i64) -> Result<Vec<Message>, ModelError> {
        Ok(self.message_repository.list_by_user(user_id).await?)
    }

    /// Deletes the account; the schema cascades follows and messages so no
    /// dangling rows remain. Returns whether the user existed.
    pub async fn delete_user(&self, user_id: i64) -> Result<bool, ModelError> {
        Ok(self.user_repository.delete_user(user_id).await?)
    }
}
