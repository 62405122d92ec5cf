// ABOUTME: Constants module with domain-separated organization
// ABOUTME: JEFit endpoints, tool identifiers, environment variable names, and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Wire-level constants shared with the core crate are re-exported here so
//! the application only ever imports from `crate::constants`.

pub use jefit_core::constants::{dates, errors, exercise, protocol, rsc};

/// Service names used in logs and the MCP handshake
pub mod service_names {
    /// MCP server binary
    pub const JEFIT_MCP_SERVER: &str = "jefit-mcp-server";
    /// Catalog refresh binary
    pub const UPDATE_EXERCISE_DB: &str = "update-exercise-db";
    /// Upstream service name used in error messages
    pub const JEFIT: &str = "JEFit";
}

/// MCP tool identifiers
pub mod tools {
    /// Dates with logged workouts in a range
    pub const LIST_WORKOUT_DATES: &str = "list_workout_dates";
    /// Markdown report for one date
    pub const GET_WORKOUT_INFO: &str = "get_workout_info";
    /// Markdown reports for several dates
    pub const GET_BATCH_WORKOUTS: &str = "get_batch_workouts";
}

/// Tool argument names
pub mod json_fields {
    /// Inclusive range start
    pub const START_DATE: &str = "start_date";
    /// Inclusive range end
    pub const END_DATE: &str = "end_date";
    /// Single date
    pub const DATE: &str = "date";
    /// List of dates
    pub const DATES: &str = "dates";
}

/// JEFit HTTP API paths and wire names
pub mod jefit {
    /// Password login
    pub const LOGIN_PATH: &str = "/api/v2/auth/login";
    /// Current user profile
    pub const USER_PATH: &str = "/api/v2/user";
    /// Web page whose flight stream carries the exercise definitions
    pub const PROGRESS_HISTORY_PATH: &str = "/my-jefit/progress/history";
    /// Cookie carrying the access token
    pub const ACCESS_TOKEN_COOKIE: &str = "jefitAccessToken";
    /// Platform sent with the login request
    pub const LOGIN_PLATFORM: &str = "web";
    /// Query parameter of the calendar endpoint
    pub const TIMEZONE_OFFSET_PARAM: &str = "timezone_offset";
    /// Query parameter of the sessions endpoint
    pub const START_DATE_PARAM: &str = "startDate";

    /// Calendar of days with sessions for a user
    #[must_use]
    pub fn calendar_path(user_id: &str) -> String {
        format!("/api/v2/users/{user_id}/sessions/calendar")
    }

    /// Sessions of a user starting at a timestamp
    #[must_use]
    pub fn sessions_path(user_id: &str) -> String {
        format!("/api/v2/users/{user_id}/sessions")
    }
}

/// Environment variable names
pub mod env_vars {
    /// JEFit account username
    pub const JEFIT_USERNAME: &str = "JEFIT_USERNAME";
    /// JEFit account password
    pub const JEFIT_PASSWORD: &str = "JEFIT_PASSWORD";
    /// UTC offset sent to the calendar endpoint
    pub const JEFIT_TIMEZONE: &str = "JEFIT_TIMEZONE";
    /// JEFit base URL
    pub const JEFIT_BASE_URL: &str = "JEFIT_BASE_URL";
    /// Exercise catalog file
    pub const EXERCISE_DB_PATH: &str = "EXERCISE_DB_PATH";
    /// Flight-stream parse mode
    pub const JEFIT_RSC_MODE: &str = "JEFIT_RSC_MODE";
    /// Mining depth cap
    pub const RSC_MAX_DEPTH: &str = "RSC_MAX_DEPTH";
    /// HTTP request timeout
    pub const HTTP_CLIENT_TIMEOUT_SECS: &str = "HTTP_CLIENT_TIMEOUT_SECS";
    /// HTTP connect timeout
    pub const HTTP_CLIENT_CONNECT_TIMEOUT_SECS: &str = "HTTP_CLIENT_CONNECT_TIMEOUT_SECS";
    /// HTTP transport bind host
    pub const HOST: &str = "HOST";
    /// HTTP transport port; stdio is used when unset
    pub const PORT: &str = "PORT";
}

/// Default configuration values
pub mod defaults {
    /// JEFit production site
    pub const JEFIT_BASE_URL: &str = "https://www.jefit.com";
    /// Eastern daylight time
    pub const TIMEZONE: &str = "-04:00";
    /// Catalog location relative to the working directory
    pub const EXERCISE_DB_PATH: &str = "data/exercises_db.json";
    /// Loopback only
    pub const HOST: &str = "127.0.0.1";
    /// Request timeout in seconds
    pub const HTTP_CLIENT_TIMEOUT_SECS: u64 = 30;
    /// Connect timeout in seconds
    pub const HTTP_CLIENT_CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Markdown report separators
pub mod report {
    /// Placed between per-date reports in batch output
    pub const BATCH_SEPARATOR: &str = "\n---\n\n";
    /// Shown when a date has no sessions
    pub const NO_WORKOUT: &str = "No workout found for this date.";
    /// Shown for empty muscle group or equipment lists
    pub const UNKNOWN: &str = "Unknown";
}
