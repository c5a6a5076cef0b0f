//! User handlers

use crate::error::ApiError;
use crate::extractors::FormOrJson;
use crate::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    username: String,
    id: String,
}

pub async fn register(
    State(state): State<AppState>,
    FormOrJson(req): FormOrJson<RegisterRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.tracker.register_user(req.username.as_deref()).await?;
    Ok(Json(UserResponse {
        username: user.username,
        id: user.id,
    }))
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    id: String,
    username: String,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let users = state.tracker.list_users().await?;
    Ok(Json(
        users
            .into_iter()
            .map(|u| UserSummary {
                id: u.id,
                username: u.username,
            })
            .collect(),
    ))
}
