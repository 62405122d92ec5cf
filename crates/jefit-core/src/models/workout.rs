// ABOUTME: Workout calendar, session, and auth payload models for the JEFit JSON API
// ABOUTME: Lenient serde shapes with defaults for fields JEFit omits on sparse sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// `{"data": ...}` wrapper used by every JEFit v2 endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Payload; JEFit omits it or sends `null` for empty results
    pub data: Option<T>,
}

/// Body of `POST /api/v2/auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Always `web`
    pub platform: String,
    /// Account username
    pub username: String,
    /// Hex MD5 digest of the password
    #[serde(rename = "passwordMd5")]
    pub password_md5: String,
}

/// Response of `POST /api/v2/auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Bearer token sent back as the `jefitAccessToken` cookie
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

/// `data` of `GET /api/v2/user`
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    /// Numeric or string user id, kept verbatim for URL building
    pub id: Value,
}

impl UserInfo {
    /// User id as it appears in API paths
    #[must_use]
    pub fn id_string(&self) -> String {
        match &self.id {
            Value::String(id) => id.clone(),
            other => other.to_string(),
        }
    }
}

/// One day of the sessions calendar
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CalendarDay {
    /// `YYYY-MM-DD`
    pub date: String,
    /// Whether any exercise was logged that day
    #[serde(default)]
    pub has_logs: bool,
}

/// A single logged set.
///
/// Numbers are kept as JEFit sent them so `135` and `135.5` render verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SetLog {
    /// Weight in pounds
    #[serde(default = "zero")]
    pub weight: Number,
    /// Repetitions
    #[serde(default = "zero")]
    pub reps: Number,
}

fn zero() -> Number {
    Number::from(0)
}

/// All sets of one exercise inside a session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExerciseLog {
    /// Exercise id, resolved against the catalog
    pub exercise_id: String,
    /// Sets in logging order
    #[serde(default)]
    pub log_sets: Vec<SetLog>,
}

/// One workout session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WorkoutSession {
    /// Session start as a unix timestamp (seconds)
    pub date: i64,
    /// Duration in seconds, as JEFit reports it
    #[serde(default = "zero")]
    pub total_time: Number,
    /// Total weight lifted in pounds
    #[serde(default = "zero")]
    pub total_weight: Number,
    /// Exercises in logging order
    #[serde(default)]
    pub logs: Vec<ExerciseLog>,
}

impl WorkoutSession {
    /// Session start in the server's local timezone
    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Local>> {
        Local.timestamp_opt(self.date, 0).single()
    }

    /// Duration split into whole minutes and remaining seconds
    #[must_use]
    pub fn duration_parts(&self) -> (u64, u64) {
        let seconds = whole_seconds(&self.total_time);
        (seconds / 60, seconds % 60)
    }
}

/// Negative durations count as zero, fractions are dropped
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_seconds(value: &Number) -> u64 {
    value
        .as_u64()
        .unwrap_or_else(|| value.as_f64().map_or(0.0, f64::floor).max(0.0) as u64)
}
