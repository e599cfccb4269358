//! Question records, finders, and owner traversal.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqlitePool;
use sqlx::FromRow;

use crate::db::entity::{Entity, Value};
use crate::db::repos::question_likes::QuestionLikeRepo;
use crate::db::repos::users::User;
use crate::error::Result;

/// A question posted to the board.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: Option<i64>,
    pub title: String,
    pub body: String,
    pub user_id: i64,
}

impl Question {
    /// Build an unsaved question owned by `user_id`.
    pub fn new(title: impl Into<String>, body: impl Into<String>, user_id: i64) -> Self {
        Self {
            id: None,
            title: title.into(),
            body: body.into(),
            user_id,
        }
    }
}

impl Entity for Question {
    const TABLE: &'static str = "questions";
    const COLUMNS: &'static [&'static str] = &["title", "body", "user_id"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.title.as_str().into(),
            self.body.as_str().into(),
            self.user_id.into(),
        ]
    }
}

/// Question repository
pub struct QuestionRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> QuestionRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Question>> {
        let question = sqlx::query_as::<_, Question>(
            "SELECT id, title, body, user_id FROM questions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(question)
    }

    /// Every question authored by one user.
    pub async fn find_by_author_id(&self, user_id: i64) -> Result<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT id, title, body, user_id FROM questions WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(questions)
    }

    pub async fn all(&self) -> Result<Vec<Question>> {
        let questions =
            sqlx::query_as::<_, Question>("SELECT id, title, body, user_id FROM questions")
                .fetch_all(self.pool)
                .await?;
        Ok(questions)
    }

    /// The question's owner.
    pub async fn author(&self, question: &Question) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, fname, lname FROM users WHERE id = ?")
            .bind(question.user_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Like count for one question (0 when nobody liked it).
    pub async fn num_likes(&self, question_id: i64) -> Result<i64> {
        QuestionLikeRepo::new(self.pool)
            .num_likes_for_question(question_id)
            .await
    }
}
