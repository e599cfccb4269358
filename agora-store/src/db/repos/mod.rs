//! One repository per entity.
//!
//! Each repository borrows the pool and owns the SQL for its table plus the
//! joins anchored on it. Row structs live next to their repository.

pub mod followers;
pub mod question_likes;
pub mod questions;
pub mod replies;
pub mod users;

pub use followers::{Follower, FollowerRepo};
pub use question_likes::{QuestionLike, QuestionLikeRepo};
pub use questions::{Question, QuestionRepo};
pub use replies::{Reply, ReplyRepo};
pub use users::{User, UserRepo};
