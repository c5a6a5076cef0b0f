//! Storage traits for persistence

use crate::types::{Exercise, LogQuery, User};
use crate::Result;
use async_trait::async_trait;

/// User store
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user. Fails with `DuplicateUsername` if the
    /// username is already taken.
    async fn insert_user(&self, user: &User) -> Result<()>;
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;
    /// All users in insertion order
    async fn list_users(&self) -> Result<Vec<User>>;
}

/// Exercise store
#[async_trait]
pub trait ExerciseStore: Send + Sync {
    async fn insert_exercise(&self, exercise: &Exercise) -> Result<()>;
    /// A user's exercises with the query's date-range filter applied,
    /// sorted ascending by date (insertion order breaks ties) and
    /// truncated to the query's limit.
    async fn find_exercises(&self, user_id: &str, query: &LogQuery) -> Result<Vec<Exercise>>;
}

/// Combined store handlers hold as a single trait object
pub trait TrackerStore: UserStore + ExerciseStore {}

impl<T: UserStore + ExerciseStore> TrackerStore for T {}
