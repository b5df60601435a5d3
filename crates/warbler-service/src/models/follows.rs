use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A directed follow edge: the follower receives the followed user's
/// messages in their feed. "A follows B" is distinct from "B follows A".
#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct Follow {
    pub follower_id: i64,
    pub followed_id: i64,
    pub created_at: DateTime<Utc>,
}
