//! Access tokens for the Google Sheets store.
//!
//! A fixed bearer token, or a service-account JSON key exchanged for
//! short-lived tokens with the JWT bearer grant. Minted tokens are cached and
//! minted again shortly before they expire.

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::StoreError;

pub const TOKEN_ENV_VAR: &str = "GOOGLE_SHEETS_TOKEN";
pub const SHEETS_SCOPES: &str =
    "https://www.googleapis.com/auth/spreadsheets https://www.googleapis.com/auth/drive";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN_SECS: i64 = 60;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

/// The fields of a Google service-account key file that token minting needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }
}

pub struct ServiceAccount {
    key: ServiceAccountKey,
    signing_key: EncodingKey,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccount {
    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            StoreError::Auth(format!(
                "cannot read service account file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, StoreError> {
        let key: ServiceAccountKey = serde_json::from_str(text)
            .map_err(|e| StoreError::Auth(format!("malformed service account key: {e}")))?;
        if let Some(kind) = key.key_type.as_deref() {
            if kind != "service_account" {
                return Err(StoreError::Auth(format!(
                    "key file type is '{kind}', expected 'service_account'"
                )));
            }
        }
        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| StoreError::Auth(format!("invalid service account private key: {e}")))?;
        Ok(Self {
            key,
            signing_key,
            cached: Mutex::new(None),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// Signed RS256 assertion issued at `now`.
    fn assertion(&self, now: DateTime<Utc>) -> Result<String, StoreError> {
        let claims = Claims {
            iss: &self.key.client_email,
            scope: SHEETS_SCOPES,
            aud: &self.key.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();
        jsonwebtoken::encode(&header, &claims, &self.signing_key)
            .map_err(|e| StoreError::Auth(format!("failed to sign token request: {e}")))
    }

    fn mint(&self, client: &Client, now: DateTime<Utc>) -> Result<CachedToken, StoreError> {
        let assertion = self.assertion(now)?;
        let resp = client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .map_err(|e| StoreError::Auth(format!("token request failed: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(StoreError::Auth(format!(
                "token endpoint returned HTTP {status}: {}",
                body.trim()
            )));
        }
        let token: TokenResponse = resp
            .json()
            .map_err(|e| StoreError::Auth(format!("malformed token response: {e}")))?;
        debug!(
            account = %self.key.client_email,
            expires_in = token.expires_in,
            "minted access token"
        );
        Ok(CachedToken {
            token: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }

    /// Cached token, minting a new one when absent or about to expire.
    pub fn access_token(&self, client: &Client) -> Result<String, StoreError> {
        let now = Utc::now();
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.token.clone());
        }
        let fresh = self.mint(client, now)?;
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }
}

/// How the store authenticates its requests.
pub enum Credentials {
    Bearer(String),
    ServiceAccount(ServiceAccount),
}

impl Credentials {
    pub fn bearer(token: impl Into<String>) -> Result<Self, StoreError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(StoreError::Auth("access token is empty".into()));
        }
        Ok(Credentials::Bearer(token))
    }

    /// Pick credentials in order: configured token, token from the
    /// environment, service-account key file.
    pub fn resolve(
        access_token: Option<String>,
        env_token: Option<String>,
        service_account_file: Option<&Path>,
    ) -> Result<Self, StoreError> {
        if let Some(token) = access_token.or(env_token) {
            return Self::bearer(token);
        }
        match service_account_file {
            Some(path) => {
                let account = ServiceAccount::from_file(path)?;
                debug!(account = %account.client_email(), "using service account");
                Ok(Credentials::ServiceAccount(account))
            }
            None => Err(StoreError::Auth(format!(
                "no access_token, {TOKEN_ENV_VAR} or service_account_file configured"
            ))),
        }
    }

    pub fn access_token(&self, client: &Client) -> Result<String, StoreError> {
        match self {
            Credentials::Bearer(token) => Ok(token.clone()),
            Credentials::ServiceAccount(account) => account.access_token(client),
        }
    }
}
