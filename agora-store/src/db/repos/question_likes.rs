//! Like join rows, like counts, and like-based ranking.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqlitePool;
use sqlx::FromRow;

use crate::db::entity::{Entity, Value};
use crate::db::repos::questions::Question;
use crate::db::repos::users::User;
use crate::error::Result;

/// One user liking one question.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuestionLike {
    pub id: Option<i64>,
    pub user_id: i64,
    pub question_id: i64,
}

impl QuestionLike {
    pub fn new(user_id: i64, question_id: i64) -> Self {
        Self {
            id: None,
            user_id,
            question_id,
        }
    }
}

impl Entity for QuestionLike {
    const TABLE: &'static str = "question_likes";
    const COLUMNS: &'static [&'static str] = &["user_id", "question_id"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<Value> {
        vec![self.user_id.into(), self.question_id.into()]
    }
}

/// Like repository
pub struct QuestionLikeRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> QuestionLikeRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<QuestionLike>> {
        let like = sqlx::query_as::<_, QuestionLike>(
            "SELECT id, user_id, question_id FROM question_likes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(like)
    }

    pub async fn all(&self) -> Result<Vec<QuestionLike>> {
        let likes =
            sqlx::query_as::<_, QuestionLike>("SELECT id, user_id, question_id FROM question_likes")
                .fetch_all(self.pool)
                .await?;
        Ok(likes)
    }

    /// Users who liked one question.
    pub async fn likers_for_question(&self, question_id: i64) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT users.id AS id, users.fname AS fname, users.lname AS lname
            FROM users
            JOIN question_likes ON question_likes.user_id = users.id
            WHERE question_likes.question_id = ?
            "#,
        )
        .bind(question_id)
        .fetch_all(self.pool)
        .await?;
        Ok(users)
    }

    /// Like count for one question.
    ///
    /// Plain COUNT(*) with no GROUP BY, so a question nobody liked reads
    /// back as 0 rather than an empty result set.
    pub async fn num_likes_for_question(&self, question_id: i64) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM question_likes WHERE question_id = ?",
        )
        .bind(question_id)
        .fetch_one(self.pool)
        .await?;
        Ok(count)
    }

    /// Questions one user has liked.
    pub async fn liked_questions_for_user(&self, user_id: i64) -> Result<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT questions.id AS id, questions.title AS title,
                   questions.body AS body, questions.user_id AS user_id
            FROM questions
            JOIN question_likes ON question_likes.question_id = questions.id
            WHERE question_likes.user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(questions)
    }

    /// Top `n` questions by like count, ties broken by ascending question id.
    pub async fn most_liked_questions(&self, n: i64) -> Result<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT questions.id AS id, questions.title AS title,
                   questions.body AS body, questions.user_id AS user_id
            FROM question_likes
            JOIN questions ON questions.id = question_likes.question_id
            GROUP BY questions.id
            ORDER BY COUNT(question_likes.id) DESC, questions.id ASC
            LIMIT ?
            "#,
        )
        .bind(n)
        .fetch_all(self.pool)
        .await?;
        Ok(questions)
    }
}
