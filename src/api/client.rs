// Authenticated client for the TVU student portal
// Owns the credential pair, the session, and the 401 refresh-replay path

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::endpoints::{self, Endpoint, Payload};
use crate::config::Config;
use crate::error::ApiError;

/// Safety margin subtracted from the server-reported token lifetime
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Program type sent when the caller does not pick one (standard program)
const DEFAULT_PROGRAM_TYPE: i64 = 2;

/// Page size for post queries when the caller does not pick one
const DEFAULT_POST_LIMIT: i64 = 200;

/// Portal login credentials, fixed for the client's lifetime
#[derive(Debug, Clone)]
pub struct Credentials {
    pub student_id: String,
    pub password: String,
}

/// Current bearer token and its expiry instant
///
/// Replaced wholesale by every successful login; never partially mutated.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Login response body
#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    token_type: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Authenticated portal client
///
/// Every data method goes through the same choke point: make sure a token
/// believed valid is at hand, send the request carrying it, and when the
/// portal answers 401 refresh the token once and replay the request.
pub struct TvuClient {
    credentials: Credentials,
    session: Arc<RwLock<Option<Session>>>,
    client: Client,
    base_url: String,
    /// Fallback lifetime when the login response carries no expiry
    token_lifetime: Duration,
    /// Default semester for schedule queries
    current_semester: String,
}

impl TvuClient {
    /// Build a client from resolved configuration
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            credentials: Credentials {
                student_id: config.student_id.clone(),
                password: config.password.clone(),
            },
            session: Arc::new(RwLock::new(None)),
            client,
            base_url: config.base_url.clone(),
            token_lifetime: Duration::seconds(config.token_lifetime_secs),
            current_semester: config.current_semester.clone(),
        })
    }

    /// Snapshot of the current session
    #[cfg(any(test, feature = "test-utils"))]
    pub async fn session_for_testing(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    /// Overwrite the session, bypassing login
    #[cfg(any(test, feature = "test-utils"))]
    pub async fn set_session_for_testing(&self, token: &str, expires_at: DateTime<Utc>) {
        let mut session = self.session.write().await;
        *session = Some(Session {
            token: token.to_string(),
            expires_at,
        });
    }

    /// Return a token believed valid, logging in first when the session is
    /// absent or past its expiry
    pub async fn ensure_valid_token(&self) -> Result<String, ApiError> {
        {
            let session = self.session.read().await;
            if let Some(ref current) = *session {
                if !current.is_expired() {
                    return Ok(current.token.clone());
                }
            }
        }

        self.login().await
    }

    /// Authenticate against the portal with the stored credentials
    ///
    /// Replaces the session wholesale on success. The HTTP call runs outside
    /// the session lock, so two racing logins are wasteful but safe: the
    /// last writer wins and later calls use whichever token is current.
    pub async fn login(&self) -> Result<String, ApiError> {
        tracing::debug!(student_id = %self.credentials.student_id, "Logging into portal");

        let url = format!("{}{}", self.base_url, endpoints::LOGIN.path);
        let form = [
            ("username", self.credentials.student_id.as_str()),
            ("password", self.credentials.password.as_str()),
            ("grant_type", "password"),
        ];

        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| ApiError::Auth(format!("login request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Portal login rejected");
            return Err(ApiError::Auth(format!("login failed: {} - {}", status, body)));
        }

        let data: LoginResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Auth(format!("malformed login response: {}", e)))?;

        if data.access_token.is_empty() {
            return Err(ApiError::Auth(
                "login response carried no access token".to_string(),
            ));
        }

        let expires_at = Utc::now() + token_lifetime(data.expires_in, self.token_lifetime);

        tracing::info!(
            token_type = %data.token_type,
            expires_at = %expires_at.to_rfc3339(),
            "Portal login succeeded"
        );

        let token = data.access_token;
        {
            let mut session = self.session.write().await;
            *session = Some(Session {
                token: token.clone(),
                expires_at,
            });
        }

        Ok(token)
    }

    /// Re-authenticate from scratch
    ///
    /// The portal has no separate refresh grant; this seam exists so a real
    /// refresh flow could slot in without touching call sites.
    pub async fn refresh_token(&self) -> Result<String, ApiError> {
        self.login().await
    }

    /// Weekly timetable for a semester
    pub async fn get_schedule(&self, semester: Option<&str>) -> Result<Value, ApiError> {
        let semester = semester.unwrap_or(&self.current_semester);
        let form = vec![
            ("filter[hoc_ky]".to_string(), semester.to_string()),
            ("filter[ten_hoc_ky]".to_string(), String::new()),
            ("additional[paging][limit]".to_string(), "100".to_string()),
            ("additional[paging][page]".to_string(), "1".to_string()),
        ];
        self.request(&endpoints::SCHEDULE, Payload::Form(form), Vec::new())
            .await
    }

    /// Grade sheet; the flag groups subjects by registration semester
    pub async fn get_grades(&self, show_by_reg_semester: Option<bool>) -> Result<Value, ApiError> {
        let flag = show_by_reg_semester.unwrap_or(false);
        let headers = vec![("hien_thi_mon_theo_hkdk".to_string(), flag.to_string())];
        self.request(&endpoints::GRADES, Payload::Empty, headers)
            .await
    }

    /// Tuition summary across semesters
    pub async fn get_tuition(&self) -> Result<Value, ApiError> {
        self.request(&endpoints::TUITION, Payload::Empty, Vec::new())
            .await
    }

    /// Curriculum of the study program
    pub async fn get_curriculum(&self, program_type: Option<i64>) -> Result<Value, ApiError> {
        let program_type = program_type.unwrap_or(DEFAULT_PROGRAM_TYPE);
        let body = json!({
            "filter": {
                "loai_chuong_trinh_dao_tao": program_type,
            },
            "additional": {
                "paging": { "limit": 500, "page": 1 },
                "ordering": [{ "name": null, "order_type": null }],
            },
        });
        self.request(&endpoints::CURRICULUM, Payload::Json(body), Vec::new())
            .await
    }

    /// Student profile
    pub async fn get_student_info(&self) -> Result<Value, ApiError> {
        self.request(&endpoints::STUDENT_INFO, Payload::Empty, Vec::new())
            .await
    }

    /// Portal posts filtered by category marker (empty string matches all)
    pub async fn get_posts(&self, post_type: &str, limit: Option<i64>) -> Result<Value, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_POST_LIMIT);
        let body = json!({
            "filter": {
                "ky_hieu": post_type,
                "is_hien_thi": true,
                "is_hinh_dai_dien": true,
                "is_quyen_xem": true,
            },
            "additional": {
                "paging": { "limit": limit, "page": 1 },
                "ordering": [
                    { "name": "do_uu_tien", "order_type": 1 },
                    { "name": "ngay_dang_tin", "order_type": 1 },
                ],
            },
        });
        self.request(&endpoints::POSTS, Payload::Json(body), Vec::new())
            .await
    }

    /// Single choke point for authenticated calls
    ///
    /// The retry flag lives on this call's stack, so concurrent requests
    /// each get their own single replay and nothing loops.
    async fn request(
        &self,
        endpoint: &Endpoint,
        payload: Payload,
        headers: Vec<(String, String)>,
    ) -> Result<Value, ApiError> {
        let mut retried = false;

        loop {
            let token = self.ensure_valid_token().await?;
            let response = self.send(endpoint, &payload, &headers, &token).await?;
            let status = response.status();

            if status == StatusCode::UNAUTHORIZED && !retried {
                retried = true;
                tracing::warn!(
                    operation = endpoint.name,
                    "Token rejected with 401, refreshing and replaying once"
                );
                self.refresh_token().await?;
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                tracing::error!(
                    operation = endpoint.name,
                    status = status.as_u16(),
                    body = %body,
                    "Portal request failed"
                );
                return Err(ApiError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            return response.json::<Value>().await.map_err(|e| {
                tracing::error!(
                    operation = endpoint.name,
                    error = %e,
                    "Failed to decode portal response"
                );
                ApiError::from(e)
            });
        }
    }

    /// Issue one HTTP POST with the given payload encoding and bearer token
    async fn send(
        &self,
        endpoint: &Endpoint,
        payload: &Payload,
        headers: &[(String, String)],
        token: &str,
    ) -> Result<reqwest::Response, ApiError> {
        debug_assert_eq!(payload.encoding(), endpoint.encoding);

        let url = format!("{}{}", self.base_url, endpoint.path);
        let mut request = self.client.post(&url).bearer_auth(token);

        request = match payload {
            Payload::Form(fields) => request.form(fields),
            Payload::Json(body) => request.json(body),
            Payload::Empty => request.header(reqwest::header::CONTENT_TYPE, "text/plain"),
        };

        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        tracing::debug!(operation = endpoint.name, url = %url, "Sending portal request");

        match request.send().await {
            Ok(response) => Ok(response),
            Err(e) => {
                let kind = if e.is_timeout() {
                    "timeout"
                } else if e.is_connect() {
                    "connection_failed"
                } else {
                    "request_error"
                };
                tracing::error!(
                    operation = endpoint.name,
                    error_kind = kind,
                    error = %e,
                    "Portal request failed in transport"
                );
                Err(ApiError::Transport(e))
            }
        }
    }
}

/// Pick the session lifetime from the server-reported expiry, keeping a
/// safety margin, with the configured constant as fallback
fn token_lifetime(expires_in: Option<i64>, fallback: Duration) -> Duration {
    match expires_in {
        Some(secs) if secs > EXPIRY_MARGIN_SECS => Duration::seconds(secs - EXPIRY_MARGIN_SECS),
        Some(secs) if secs > 0 => Duration::seconds(secs),
        _ => fallback,
    }
}
