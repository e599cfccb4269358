//! User records and finders.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqlitePool;
use sqlx::{FromRow, Row};

use crate::db::entity::{Entity, Value};
use crate::error::Result;

/// A registered board user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Option<i64>,
    pub fname: String,
    pub lname: String,
}

impl User {
    /// Build an unsaved user; the id is assigned on first save.
    pub fn new(fname: impl Into<String>, lname: impl Into<String>) -> Self {
        Self {
            id: None,
            fname: fname.into(),
            lname: lname.into(),
        }
    }
}

impl Entity for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &["fname", "lname"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<Value> {
        vec![self.fname.as_str().into(), self.lname.as_str().into()]
    }
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Single user by id; `Ok(None)` when no row matches.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, fname, lname FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Single user by exact first and last name.
    pub async fn find_by_name(&self, fname: &str, lname: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, fname, lname FROM users WHERE fname = ? AND lname = ?",
        )
        .bind(fname)
        .bind(lname)
        .fetch_optional(self.pool)
        .await?;
        Ok(user)
    }

    pub async fn all(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT id, fname, lname FROM users")
            .fetch_all(self.pool)
            .await?;
        Ok(users)
    }

    /// Mean likes per authored question.
    ///
    /// Questions with zero likes contribute 0 via the outer join. A user
    /// with no authored questions has karma 0.0.
    pub async fn average_karma(&self, user_id: i64) -> Result<f64> {
        let row = sqlx::query(
            r#"
            SELECT
                CAST(SUM(COALESCE(like_counts.likes, 0)) AS REAL)
                    / COUNT(questions.id) AS karma
            FROM questions
            LEFT OUTER JOIN (
                SELECT question_id, COUNT(*) AS likes
                FROM question_likes
                GROUP BY question_id
            ) AS like_counts ON like_counts.question_id = questions.id
            WHERE questions.user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        // No authored questions leaves the aggregate NULL (0 / 0).
        Ok(row.try_get::<Option<f64>, _>("karma")?.unwrap_or(0.0))
    }
}
