//! Reply records and thread traversal.
//!
//! Replies form a forest per question: the `reply_id` column points at the
//! parent reply's id, and NULL marks a root. Traversal goes through ids in
//! both directions - parent lookups follow the stored reference, child
//! lookups query the inverse edge.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqlitePool;
use sqlx::FromRow;

use crate::db::entity::{Entity, Value};
use crate::db::repos::questions::Question;
use crate::db::repos::users::User;
use crate::error::Result;

/// A reply to a question, optionally nested under another reply.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reply {
    pub id: Option<i64>,
    pub user_id: i64,
    pub question_id: i64,
    /// Parent reply id; `None` marks a root reply.
    #[sqlx(rename = "reply_id")]
    pub parent: Option<i64>,
    pub body: String,
}

impl Reply {
    /// Build an unsaved reply. Pass `parent: None` for a top-level reply.
    pub fn new(
        user_id: i64,
        question_id: i64,
        parent: Option<i64>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            user_id,
            question_id,
            parent,
            body: body.into(),
        }
    }
}

impl Entity for Reply {
    const TABLE: &'static str = "replies";
    const COLUMNS: &'static [&'static str] = &["user_id", "question_id", "reply_id", "body"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.user_id.into(),
            self.question_id.into(),
            self.parent.into(),
            self.body.as_str().into(),
        ]
    }
}

/// Reply repository
pub struct ReplyRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ReplyRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Reply>> {
        let reply = sqlx::query_as::<_, Reply>(
            "SELECT id, user_id, question_id, reply_id, body FROM replies WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(reply)
    }

    pub async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Reply>> {
        let replies = sqlx::query_as::<_, Reply>(
            "SELECT id, user_id, question_id, reply_id, body FROM replies WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(replies)
    }

    /// Every reply on one question, roots and children alike.
    pub async fn find_by_question_id(&self, question_id: i64) -> Result<Vec<Reply>> {
        let replies = sqlx::query_as::<_, Reply>(
            "SELECT id, user_id, question_id, reply_id, body FROM replies WHERE question_id = ?",
        )
        .bind(question_id)
        .fetch_all(self.pool)
        .await?;
        Ok(replies)
    }

    pub async fn all(&self) -> Result<Vec<Reply>> {
        let replies = sqlx::query_as::<_, Reply>(
            "SELECT id, user_id, question_id, reply_id, body FROM replies",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(replies)
    }

    pub async fn author(&self, reply: &Reply) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, fname, lname FROM users WHERE id = ?")
            .bind(reply.user_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    pub async fn question(&self, reply: &Reply) -> Result<Option<Question>> {
        let question = sqlx::query_as::<_, Question>(
            "SELECT id, title, body, user_id FROM questions WHERE id = ?",
        )
        .bind(reply.question_id)
        .fetch_optional(self.pool)
        .await?;
        Ok(question)
    }

    /// The reply this one is nested under; `None` for root replies.
    pub async fn parent(&self, reply: &Reply) -> Result<Option<Reply>> {
        match reply.parent {
            Some(parent_id) => self.find_by_id(parent_id).await,
            None => Ok(None),
        }
    }

    /// Direct children of one reply - the inverse edge of [`ReplyRepo::parent`].
    pub async fn children(&self, reply_id: i64) -> Result<Vec<Reply>> {
        let replies = sqlx::query_as::<_, Reply>(
            "SELECT id, user_id, question_id, reply_id, body FROM replies WHERE reply_id = ?",
        )
        .bind(reply_id)
        .fetch_all(self.pool)
        .await?;
        Ok(replies)
    }
}
