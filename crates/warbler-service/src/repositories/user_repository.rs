use crate::models::follows::Follow;
use crate::models::users::{NewUser, User};
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;

pub struct UserRepository {
    db: Arc<PgPool>,
}

impl UserRepository {
    pub fn new(db: Arc<PgPool>) -> Self {
        UserRepository { db }
    }

    /// Inserts a new user row. The caller provides the bcrypt hash; raw
    /// passwords never reach this layer. Uniqueness conflicts surface as
    /// the store's integrity error.
    pub async fn insert_user(
        &self,
        user: &NewUser,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password, image_url)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(password_hash)
        .bind(&user.image_url)
        .fetch_one(self.db.as_ref())
        .await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.db.as_ref())
            .await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(self.db.as_ref())
            .await
    }

    pub async fn add_follow(
        &self,
        follower_id: i64,
        followed_id: i64,
    ) -> Result<Follow, sqlx::Error> {
        sqlx::query_as::<_, Follow>(
            "INSERT INTO follows (follower_id, followed_id, created_at)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(follower_id)
        .bind(followed_id)
        .bind(Utc::now())
        .fetch_one(self.db.as_ref())
        .await
    }

    /// Deletes the follow edge if present. Returns whether a row existed.
    pub async fn remove_follow(
        &self,
        follower_id: i64,
        followed_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followed_id = $2")
                .bind(follower_id)
                .bind(followed_id)
                .execute(self.db.as_ref())
                .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn is_following(
        &self,
        follower_id: i64,
        followed_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let query = r#"
        SELECT EXISTS (SELECT 1 FROM follows WHERE follower_id = $1 AND followed_id = $2)
        "#;
        sqlx::query_scalar::<_, bool>(query)
            .bind(follower_id)
            .bind(followed_id)
            .fetch_one(self.db.as_ref())
            .await
    }

    pub async fn list_followers(&self, user_id: i64) -> Result<Vec<User>, sqlx::Error> {
        let query = r#"
        SELECT u.*
        FROM users u
        INNER JOIN follows f ON u.id = f.follower_id
        WHERE f.followed_id = $1
        "#;
        sqlx::query_as::<_, User>(query)
            .bind(user_id)
            .fetch_all(self.db.as_ref())
            .await
    }

    pub async fn list_following(&self, user_id: i64) -> Result<Vec<User>, sqlx::Error> {
        let query = r#"
        SELECT u.*
        FROM users u
        INNER JOIN follows f ON u.id = f.followed_id
        WHERE f.follower_id = $1
        "#;
        sqlx::query_as::<_, User>(query)
            .bind(user_id)
            .fetch_all(self.db.as_ref())
            .await
    }

    /// Deletes a user row; follows and messages referencing it are removed
    /// by the schema's cascade. Returns whether the user existed.
    pub async fn delete_user(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.db.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
