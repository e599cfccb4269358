//! Follower join rows and the queries anchored on them.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqlitePool;
use sqlx::FromRow;

use crate::db::entity::{Entity, Value};
use crate::db::repos::questions::Question;
use crate::db::repos::users::User;
use crate::error::Result;

/// One user following one question.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Follower {
    pub id: Option<i64>,
    pub user_id: i64,
    pub question_id: i64,
}

impl Follower {
    pub fn new(user_id: i64, question_id: i64) -> Self {
        Self {
            id: None,
            user_id,
            question_id,
        }
    }
}

impl Entity for Follower {
    const TABLE: &'static str = "followers";
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

/// Follower repository
pub struct FollowerRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FollowerRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Follower>> {
        let follower = sqlx::query_as::<_, Follower>(
            "SELECT id, user_id, question_id FROM followers WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(follower)
    }

    pub async fn all(&self) -> Result<Vec<Follower>> {
        let followers =
            sqlx::query_as::<_, Follower>("SELECT id, user_id, question_id FROM followers")
                .fetch_all(self.pool)
                .await?;
        Ok(followers)
    }

    /// Users following one question.
    pub async fn followers_for_question(&self, question_id: i64) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT users.id AS id, users.fname AS fname, users.lname AS lname
            FROM users
            JOIN followers ON followers.user_id = users.id
            WHERE followers.question_id = ?
            "#,
        )
        .bind(question_id)
        .fetch_all(self.pool)
        .await?;
        Ok(users)
    }

    /// Questions one user follows.
    pub async fn followed_questions_for_user(&self, user_id: i64) -> Result<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT questions.id AS id, questions.title AS title,
                   questions.body AS body, questions.user_id AS user_id
            FROM questions
            JOIN followers ON followers.question_id = questions.id
            WHERE followers.user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(questions)
    }

    /// Top `n` questions by follower count, ties broken by ascending
    /// question id. Title/body ride along on the join - one query, no N+1.
    pub async fn most_followed_questions(&self, n: i64) -> Result<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT questions.id AS id, questions.title AS title,
                   questions.body AS body, questions.user_id AS user_id
            FROM followers
            JOIN questions ON questions.id = followers.question_id
            GROUP BY questions.id
            ORDER BY COUNT(followers.id) DESC, questions.id ASC
            LIMIT ?
            "#,
        )
        .bind(n)
        .fetch_all(self.pool)
        .await?;
        Ok(questions)
    }
}
