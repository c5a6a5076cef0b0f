//! Exercise handlers

use crate::error::ApiError;
use crate::extractors::FormOrJson;
use crate::services::NewExercise;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

/// `duration` arrives as a string from form bodies and as either a
/// number or a string from JSON clients.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(i64),
    String(String),
}

impl NumberOrString {
    fn into_raw(self) -> String {
        match self {
            NumberOrString::Number(n) => n.to_string(),
            NumberOrString::String(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddExerciseRequest {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    duration: Option<NumberOrString>,
    #[serde(default)]
    date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExerciseResponse {
    id: String,
    username: String,
    description: String,
    duration: i64,
    date: String,
}

pub async fn add(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    FormOrJson(req): FormOrJson<AddExerciseRequest>,
) -> Result<Json<ExerciseResponse>, ApiError> {
    let input = NewExercise {
        description: req.description,
        duration: req.duration.map(NumberOrString::into_raw),
        date: req.date,
    };

    let (user, exercise) = state.tracker.add_exercise(&user_id, input).await?;

    let date = exercise.date_string();
    Ok(Json(ExerciseResponse {
        // The id reported here is the user's, matching the log endpoint
        id: user.id,
        username: user.username,
        description: exercise.description,
        duration: exercise.duration,
        date,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct LogParams {
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LogEntry {
    description: String,
    duration: i64,
    date: String,
}

#[derive(Debug, Serialize)]
pub struct LogResponse {
    id: String,
    username: String,
    count: usize,
    log: Vec<LogEntry>,
}

pub async fn logs(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<LogParams>,
) -> Result<Json<LogResponse>, ApiError> {
    let (user, exercises) = state
        .tracker
        .exercise_log(
            &user_id,
            params.from.as_deref(),
            params.to.as_deref(),
            params.limit.as_deref(),
        )
        .await?;

    let log: Vec<LogEntry> = exercises
        .into_iter()
        .map(|ex| {
            let date = ex.date_string();
            LogEntry {
                description: ex.description,
                duration: ex.duration,
                date,
            }
        })
        .collect();

    Ok(Json(LogResponse {
        id: user.id,
        username: user.username,
        count: log.len(),
        log,
    }))
}
