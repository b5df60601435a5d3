use crate::models::messages::Message;
use sqlx::PgPool;
use std::sync::Arc;

pub struct MessageRepository {
    db: Arc<PgPool>,
}

impl MessageRepository {
    pub fn new(db: Arc<PgPool>) -> Self {
        MessageRepository { db }
    }

    pub async fn insert_message(&self, user_id: i64, text: &str) -> Result<Message, sqlx::Error> {
        sqlx::query_as::<_, Message>(
            "INSERT INTO messages (user_id, text) VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(text)
        .fetch_one(self.db.as_ref())
        .await
    }

    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Message>, sqlx::Error> {
        sqlx::query_as::<_, Message>(
            "SELECT * FROM messages WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(self.db.as_ref())
        .await
    }
}
