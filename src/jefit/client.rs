// ABOUTME: JEFit HTTP client handling login, session caching, and authenticated requests
// ABOUTME: Fetches the workout calendar, per-day sessions, and the progress-history flight stream
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Instant;

use chrono::{Local, NaiveDate, TimeZone};
use jefit_core::models::{
    ApiEnvelope, CalendarDay, LoginRequest, LoginResponse, UserInfo, WorkoutSession,
};
use md5::{Digest, Md5};
use reqwest::header::COOKIE;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::{JefitConfig, ServerConfig};
use crate::constants::{jefit, rsc::RSC_HEADER, service_names::JEFIT};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::utils::http_client::client_for;

/// Access token and account id obtained from a login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JefitSession {
    /// Value of the `jefitAccessToken` cookie
    pub access_token: String,
    /// Numeric account id, as a string for path building
    pub user_id: String,
}

/// Client for the JEFit API
///
/// The session is established lazily on first use and reused afterwards.
/// A request rejected with 401 or 403 drops the cached session, logs in
/// again, and is retried once.
pub struct JefitClient {
    http: Client,
    config: JefitConfig,
    session: RwLock<Option<JefitSession>>,
}

impl JefitClient {
    /// Create a client over an existing `reqwest` client
    #[must_use]
    pub fn new(config: JefitConfig, http: Client) -> Self {
        Self {
            http,
            config,
            session: RwLock::new(None),
        }
    }

    /// Create a client with timeouts taken from the server configuration
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.jefit.clone(), client_for(&config.http_client))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// Log in with the configured credentials and return the access token
    ///
    /// # Errors
    ///
    /// Returns `ExternalAuthFailed` when JEFit rejects the credentials, or a
    /// transport error when the request cannot be sent.
    pub async fn login(&self) -> AppResult<String> {
        let body = LoginRequest {
            platform: jefit::LOGIN_PLATFORM.to_owned(),
            username: self.config.username.clone(),
            password_md5: hash_password(&self.config.password),
        };

        let started = Instant::now();
        let response = self
            .http
            .post(self.url(jefit::LOGIN_PATH))
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        AppLogger::log_upstream_request(
            "POST",
            jefit::LOGIN_PATH,
            status.as_u16(),
            elapsed_ms(started),
        );

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::external_auth_failed(format!(
                "JEFit login failed with status {status}: {text}"
            )));
        }

        let login: LoginResponse = response.json().await?;
        info!(username = %self.config.username, "Logged in to JEFit");
        Ok(login.access_token)
    }

    /// Resolve the account id belonging to an access token
    ///
    /// # Errors
    ///
    /// Returns `ExternalAuthFailed` when the token is rejected and
    /// `ExternalServiceError` when the profile carries no id.
    pub async fn user_id(&self, access_token: &str) -> AppResult<String> {
        let started = Instant::now();
        let response = self
            .http
            .get(self.url(jefit::USER_PATH))
            .header(COOKIE, access_cookie(access_token))
            .send()
            .await?;
        let status = response.status();
        AppLogger::log_upstream_request(
            "GET",
            jefit::USER_PATH,
            status.as_u16(),
            elapsed_ms(started),
        );

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::external_auth_failed(format!(
                "JEFit user lookup failed with status {status}: {text}"
            )));
        }

        let envelope: ApiEnvelope<UserInfo> = response.json().await?;
        envelope
            .data
            .map(|user| user.id_string())
            .ok_or_else(|| AppError::external_service(JEFIT, "User profile response has no data"))
    }

    /// Cached session, logging in when none is held
    ///
    /// # Errors
    ///
    /// Propagates login and user lookup failures.
    pub async fn session(&self) -> AppResult<JefitSession> {
        let cached = self.session.read().await.clone();
        if let Some(session) = cached {
            return Ok(session);
        }

        let mut guard = self.session.write().await;
        if let Some(session) = guard.as_ref() {
            return Ok(session.clone());
        }

        let access_token = self.login().await?;
        let user_id = self.user_id(&access_token).await?;
        let session = JefitSession {
            access_token,
            user_id,
        };
        *guard = Some(session.clone());
        drop(guard);
        debug!(user_id = %session.user_id, "JEFit session established");
        Ok(session)
    }

    /// Forget the cached session so the next request logs in again
    pub async fn invalidate_session(&self) {
        *self.session.write().await = None;
    }

    /// Dates (`YYYY-MM-DD`) on which the calendar reports logged sets, in calendar order
    ///
    /// # Errors
    ///
    /// Returns an error when the calendar cannot be fetched or decoded.
    pub async fn workout_dates(&self) -> AppResult<Vec<String>> {
        let timezone = self.config.timezone.clone();
        let response = self
            .authorized_get(
                |session| jefit::calendar_path(&session.user_id),
                |request| request.query(&[(jefit::TIMEZONE_OFFSET_PARAM, timezone.as_str())]),
            )
            .await?;

        let envelope: ApiEnvelope<Vec<CalendarDay>> = response.json().await?;
        Ok(envelope
            .data
            .unwrap_or_default()
            .into_iter()
            .filter(|day| day.has_logs)
            .map(|day| day.date)
            .collect())
    }

    /// Sessions that started on `date`, local time
    ///
    /// A response without data means no workout was logged that day.
    ///
    /// # Errors
    ///
    /// Returns an error when the sessions cannot be fetched or decoded.
    pub async fn sessions_for_date(&self, date: NaiveDate) -> AppResult<Vec<WorkoutSession>> {
        let start = local_midnight_timestamp(date)?.to_string();
        let response = self
            .authorized_get(
                |session| jefit::sessions_path(&session.user_id),
                |request| request.query(&[(jefit::START_DATE_PARAM, start.as_str())]),
            )
            .await?;

        let envelope: ApiEnvelope<Vec<WorkoutSession>> = response.json().await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Raw flight stream of the progress-history page
    ///
    /// # Errors
    ///
    /// Returns an error when the page cannot be fetched.
    pub async fn fetch_flight_stream(&self) -> AppResult<String> {
        let response = self
            .authorized_get(
                |_| jefit::PROGRESS_HISTORY_PATH.to_owned(),
                |request| request.header(RSC_HEADER, "1"),
            )
            .await?;
        Ok(response.text().await?)
    }

    async fn authorized_get<P, B>(&self, path: P, build: B) -> AppResult<Response>
    where
        P: Fn(&JefitSession) -> String + Send + Sync,
        B: Fn(RequestBuilder) -> RequestBuilder + Send + Sync,
    {
        let session = self.session().await?;
        let response = self.send_get(&path(&session), &session, &build).await?;
        if !is_auth_rejection(response.status()) {
            return ensure_success(response).await;
        }

        warn!(
            status = %response.status(),
            "JEFit rejected the cached access token, logging in again"
        );
        self.invalidate_session().await;
        let session = self.session().await?;
        let response = self.send_get(&path(&session), &session, &build).await?;
        ensure_success(response).await
    }

    async fn send_get<B>(
        &self,
        path: &str,
        session: &JefitSession,
        build: &B,
    ) -> AppResult<Response>
    where
        B: Fn(RequestBuilder) -> RequestBuilder + Send + Sync,
    {
        let started = Instant::now();
        let request = self
            .http
            .get(self.url(path))
            .header(COOKIE, access_cookie(&session.access_token));
        let response = build(request).send().await?;
        let status = response.status().as_u16();
        AppLogger::log_upstream_request("GET", path, status, elapsed_ms(started));
        Ok(response)
    }
}

/// Lowercase hex MD5 digest JEFit expects in place of the password
#[must_use]
pub fn hash_password(password: &str) -> String {
    hex::encode(Md5::digest(password.as_bytes()))
}

/// Unix timestamp of local midnight at the start of `date`
///
/// # Errors
///
/// Returns `InvalidInput` when local midnight does not exist on that date.
pub fn local_midnight_timestamp(date: NaiveDate) -> AppResult<i64> {
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|start| start.timestamp())
        .ok_or_else(|| AppError::invalid_input(format!("No local midnight on {date}")))
}

fn access_cookie(access_token: &str) -> String {
    format!("{}={access_token}", jefit::ACCESS_TOKEN_COOKIE)
}

const fn is_auth_rejection(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

async fn ensure_success(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    if is_auth_rejection(status) {
        return Err(AppError::external_auth_failed(format!(
            "JEFit rejected the request with status {status}: {text}"
        )));
    }
    Err(AppError::external_service(
        JEFIT,
        format!("Request failed with status {status}: {text}"),
    ))
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_is_lowercase_hex_md5() {
        assert_eq!(hash_password("password"), "5f4dcc3b5aa765d61d8327deb882cf99");
        assert_eq!(hash_password(""), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_access_cookie() {
        assert_eq!(access_cookie("abc"), "jefitAccessToken=abc");
    }

    #[test]
    fn test_local_midnight_is_start_of_day() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let timestamp = local_midnight_timestamp(date).unwrap();
        let local = Local.timestamp_opt(timestamp, 0).unwrap();
        assert_eq!(local.date_naive(), date);
        assert_eq!(local.time(), chrono::NaiveTime::MIN);
    }
}
