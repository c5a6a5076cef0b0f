//! In-memory storage backend
//!
//! Volatile counterpart of the SQLite backend, used when no database
//! path is configured. An explicit store object, not module state, so
//! handlers stay testable in isolation.

use async_trait::async_trait;
use fitlog_core::{Exercise, ExerciseStore, FitlogError, LogQuery, Result, User, UserStore};
use std::sync::{Mutex, MutexGuard};

pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    exercises: Vec<Exercise>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    fn locked(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| FitlogError::Storage("memory store lock poisoned".to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<()> {
        let mut inner = self.locked()?;

        // Check and insert under one lock so concurrent registrations
        // of the same username cannot both get in.
        if inner.users.iter().any(|u| u.username == user.username) {
            return Err(FitlogError::DuplicateUsername(user.username.clone()));
        }

        inner.users.push(user.clone());
        Ok(())
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let inner = self.locked()?;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let inner = self.locked()?;
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let inner = self.locked()?;
        Ok(inner.users.clone())
    }
}

#[async_trait]
impl ExerciseStore for MemoryStore {
    async fn insert_exercise(&self, exercise: &Exercise) -> Result<()> {
        let mut inner = self.locked()?;
        inner.exercises.push(exercise.clone());
        Ok(())
    }

    async fn find_exercises(&self, user_id: &str, query: &LogQuery) -> Result<Vec<Exercise>> {
        let inner = self.locked()?;

        let mut matches: Vec<Exercise> = inner
            .exercises
            .iter()
            .filter(|ex| ex.user_id == user_id)
            .filter(|ex| query.from.map_or(true, |from| ex.date >= from))
            .filter(|ex| query.to.map_or(true, |to| ex.date <= to))
            .cloned()
            .collect();

        // Stable sort keeps insertion order within a date
        matches.sort_by_key(|ex| ex.date);

        if let Some(limit) = query.limit {
            matches.truncate(limit);
        }

        Ok(matches)
    }
}
