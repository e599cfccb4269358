//! agora-store: SQLite data layer for a Q&A board.
//!
//! Users ask questions; other users reply (threaded), follow, and like.
//! The crate exposes one repository per entity plus a descriptor-driven
//! generic save path - no ORM macros, no hidden global connection.

pub mod config;
pub mod db;
pub mod error;

pub use config::StoreConfig;
pub use db::entity::{insert, save, update, Entity, Value};
pub use db::repos::{
    Follower, FollowerRepo, Question, QuestionLike, QuestionLikeRepo, QuestionRepo, Reply,
    ReplyRepo, User, UserRepo,
};
pub use db::Store;
pub use error::{Result, StoreError};
