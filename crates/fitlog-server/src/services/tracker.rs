//! Exercise tracking service
//!
//! Validation and orchestration between the HTTP handlers and the
//! storage ports. All client input reaches this layer as raw strings;
//! the permissive parsing rules live here in one place.

use fitlog_core::types::{format_date, parse_date, today_utc};
use fitlog_core::{Exercise, FitlogError, LogQuery, Result, TrackerStore, User};
use std::sync::Arc;
use tracing::info;

pub struct TrackerService {
    store: Arc<dyn TrackerStore>,
}

/// Raw add-exercise input as received from the client
#[derive(Debug, Default, Clone)]
pub struct NewExercise {
    pub description: Option<String>,
    pub duration: Option<String>,
    pub date: Option<String>,
}

impl TrackerService {
    pub fn new(store: Arc<dyn TrackerStore>) -> Self {
        Self { store }
    }

    /// Idempotent create: an already-taken username returns the
    /// existing user unchanged.
    pub async fn register_user(&self, username: Option<&str>) -> Result<User> {
        let username = username
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| FitlogError::Validation("username is required".to_string()))?;

        if let Some(existing) = self.store.find_user_by_username(username).await? {
            return Ok(existing);
        }

        let user = User::new(username.to_string());
        match self.store.insert_user(&user).await {
            Ok(()) => {
                info!("Registered user: {} ({})", user.username, user.id);
                Ok(user)
            }
            // Lost a concurrent registration race; the winner's row is canonical.
            Err(FitlogError::DuplicateUsername(_)) => self
                .store
                .find_user_by_username(username)
                .await?
                .ok_or_else(|| {
                    FitlogError::Storage(format!("user vanished after conflict: {username}"))
                }),
            Err(e) => Err(e),
        }
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.store.list_users().await
    }

    /// Record an exercise against an existing user. The date defaults
    /// to today (UTC) when missing or unparseable.
    pub async fn add_exercise(&self, user_id: &str, input: NewExercise) -> Result<(User, Exercise)> {
        let user = self
            .store
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| FitlogError::UserNotFound(user_id.to_string()))?;

        let description = input
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| {
                FitlogError::Validation("description and duration are required".to_string())
            })?
            .to_string();

        let duration_raw = input.duration.as_deref().map(str::trim).filter(|d| !d.is_empty());
        let duration = match duration_raw {
            None => {
                return Err(FitlogError::Validation(
                    "description and duration are required".to_string(),
                ))
            }
            Some(raw) => raw.parse::<i64>().map_err(|_| {
                FitlogError::Validation("duration must be a number".to_string())
            })?,
        };
        if duration <= 0 {
            return Err(FitlogError::Validation(
                "duration must be a positive number of minutes".to_string(),
            ));
        }

        let date = input
            .date
            .as_deref()
            .and_then(parse_date)
            .unwrap_or_else(today_utc);

        let exercise = Exercise::new(user.id.clone(), description, duration, date);
        self.store.insert_exercise(&exercise).await?;

        info!(
            "Added exercise for {}: {} ({} min, {})",
            user.username,
            exercise.description,
            exercise.duration,
            format_date(exercise.date)
        );

        Ok((user, exercise))
    }

    /// A user's exercise log: date-range filtered, sorted ascending by
    /// date, then truncated. Unparseable `from`/`to` values are
    /// silently ignored; a limit of 0 or anything non-numeric means
    /// no limit.
    pub async fn exercise_log(
        &self,
        user_id: &str,
        from: Option<&str>,
        to: Option<&str>,
        limit: Option<&str>,
    ) -> Result<(User, Vec<Exercise>)> {
        let user = self
            .store
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| FitlogError::UserNotFound(user_id.to_string()))?;

        let query = LogQuery {
            from: from.and_then(parse_date),
            to: to.and_then(parse_date),
            limit: limit
                .and_then(|raw| raw.trim().parse::<usize>().ok())
                .filter(|n| *n > 0),
        };

        let exercises = self.store.find_exercises(&user.id, &query).await?;
        Ok((user, exercises))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn service() -> TrackerService {
        TrackerService::new(Arc::new(MemoryStore::new()))
    }

    fn entry(desc: &str, duration: &str, date: &str) -> NewExercise {
        NewExercise {
            description: Some(desc.to_string()),
            duration: Some(duration.to_string()),
            date: Some(date.to_string()),
        }
    }

    #[tokio::test]
    async fn register_is_idempotent() {
        let svc = service();

        let first = svc.register_user(Some("alice")).await.unwrap();
        let second = svc.register_user(Some("alice")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(svc.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn register_rejects_blank_usernames() {
        let svc = service();

        for bad in [None, Some(""), Some("   ")] {
            let err = svc.register_user(bad).await.unwrap_err();
            assert!(matches!(err, FitlogError::Validation(_)));
        }
        assert!(svc.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn register_trims_whitespace() {
        let svc = service();

        let user = svc.register_user(Some("  bob  ")).await.unwrap();
        assert_eq!(user.username, "bob");

        let again = svc.register_user(Some("bob")).await.unwrap();
        assert_eq!(again.id, user.id);
    }

    #[tokio::test]
    async fn add_exercise_unknown_user_is_not_found() {
        let svc = service();

        let err = svc
            .add_exercise("nope", entry("run", "30", "2024-01-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, FitlogError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn add_exercise_validates_input() {
        let svc = service();
        let user = svc.register_user(Some("carol")).await.unwrap();

        // Missing description
        let err = svc
            .add_exercise(
                &user.id,
                NewExercise {
                    duration: Some("30".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, FitlogError::Validation(_)));

        // Missing duration
        let err = svc
            .add_exercise(
                &user.id,
                NewExercise {
                    description: Some("run".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, FitlogError::Validation(_)));

        // Non-numeric and non-positive durations
        for bad in ["abc", "0", "-5"] {
            let err = svc
                .add_exercise(&user.id, entry("run", bad, "2024-01-01"))
                .await
                .unwrap_err();
            assert!(matches!(err, FitlogError::Validation(_)), "duration {bad:?}");
        }
    }

    #[tokio::test]
    async fn add_exercise_defaults_date_to_today() {
        let svc = service();
        let user = svc.register_user(Some("dora")).await.unwrap();

        // Missing date
        let (_, ex) = svc
            .add_exercise(
                &user.id,
                NewExercise {
                    description: Some("yoga".to_string()),
                    duration: Some("20".to_string()),
                    date: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(ex.date, today_utc());

        // Unparseable date falls back the same way
        let (_, ex) = svc
            .add_exercise(&user.id, entry("yoga", "20", "next tuesday"))
            .await
            .unwrap();
        assert_eq!(ex.date, today_utc());
    }

    #[tokio::test]
    async fn log_sorts_filters_and_limits() {
        let svc = service();
        let user = svc.register_user(Some("eve")).await.unwrap();

        for day in ["2024-01-01", "2024-01-03", "2024-01-02"] {
            svc.add_exercise(&user.id, entry("row", "15", day)).await.unwrap();
        }

        let (_, all) = svc.exercise_log(&user.id, None, None, None).await.unwrap();
        let days: Vec<NaiveDate> = all.iter().map(|e| e.date).collect();
        assert_eq!(
            days,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            ]
        );

        let (_, limited) = svc
            .exercise_log(&user.id, None, None, Some("2"))
            .await
            .unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[1].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());

        let (_, ranged) = svc
            .exercise_log(&user.id, Some("2024-01-02"), Some("2024-01-02"), None)
            .await
            .unwrap();
        assert_eq!(ranged.len(), 1);
    }

    #[tokio::test]
    async fn log_ignores_unparseable_filters() {
        let svc = service();
        let user = svc.register_user(Some("frank")).await.unwrap();

        for day in ["2024-01-01", "2024-01-02"] {
            svc.add_exercise(&user.id, entry("lift", "25", day)).await.unwrap();
        }

        // Garbage from/to and limit are ignored, not errors
        let (_, all) = svc
            .exercise_log(&user.id, Some("garbage"), Some("also-garbage"), Some("abc"))
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        // limit=0 means no limit
        let (_, all) = svc
            .exercise_log(&user.id, None, None, Some("0"))
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn log_unknown_user_is_not_found() {
        let svc = service();

        let err = svc.exercise_log("nope", None, None, None).await.unwrap_err();
        assert!(matches!(err, FitlogError::UserNotFound(_)));
    }
}
