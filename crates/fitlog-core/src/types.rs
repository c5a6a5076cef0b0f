//! Domain types

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Registered user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

impl User {
    /// Create a user with a freshly generated opaque id
    pub fn new(username: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            username,
        }
    }
}

/// A single timed exercise entry belonging to a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub user_id: String,
    pub description: String,
    /// Duration in whole minutes, always positive
    pub duration: i64,
    /// UTC calendar day the exercise happened
    pub date: NaiveDate,
}

impl Exercise {
    pub fn new(user_id: String, description: String, duration: i64, date: NaiveDate) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            description,
            duration,
            date,
        }
    }

    /// Render the date the way the log endpoints report it,
    /// e.g. "Mon Jan 01 2024". Pure function of the stored day.
    pub fn date_string(&self) -> String {
        format_date(self.date)
    }
}

/// Filter/limit parameters for an exercise log lookup.
///
/// `from`/`to` are inclusive bounds; `limit` truncates after the
/// ascending date sort. `None` means the clause is not applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<usize>,
}

/// Fixed response format for calendar days: "Mon Jan 01 2024"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// Today as a UTC calendar day, the default for undated exercises
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a calendar day from client input (`YYYY-MM-DD`)
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}
