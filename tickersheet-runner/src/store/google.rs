//! Google Sheets store over the Drive v3 and Sheets v4 REST APIs.
//!
//! Requests carry a bearer token from [`Credentials`]: a fixed token, or one
//! minted from a service-account key file.

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use super::google_auth::{Credentials, TOKEN_ENV_VAR};
use super::{SheetStore, SpreadsheetHandle, StoreError, Table};

const DRIVE_BASE: &str = "https://www.googleapis.com/drive/v3";
const SHEETS_BASE: &str = "https://sheets.googleapis.com/v4";
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// A failed Drive or Sheets call.
#[derive(Debug, Error)]
enum ApiError {
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("bad request URL: {0}")]
    Url(String),

    #[error(transparent)]
    Credentials(StoreError),
}

impl ApiError {
    fn is_auth(&self) -> bool {
        matches!(
            self,
            ApiError::Status { status, .. }
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
        )
    }

    /// Auth failures become `StoreError::Auth`; anything else goes through `other`.
    fn into_store(self, other: impl FnOnce(String) -> StoreError) -> StoreError {
        if self.is_auth() {
            return StoreError::Auth(self.to_string());
        }
        match self {
            ApiError::Credentials(err) => err,
            err => other(err.to_string()),
        }
    }
}

pub struct GoogleSheetsStore {
    client: Client,
    credentials: Credentials,
    drive_base: String,
    sheets_base: String,
}

impl GoogleSheetsStore {
    /// Credentials from config, falling back to `GOOGLE_SHEETS_TOKEN`, then
    /// to the service-account key file.
    pub fn from_config(
        access_token: Option<String>,
        service_account_file: Option<&Path>,
    ) -> Result<Self, StoreError> {
        let env_token = std::env::var(TOKEN_ENV_VAR).ok();
        let credentials = Credentials::resolve(access_token, env_token, service_account_file)?;
        Self::with_endpoints(credentials, DRIVE_BASE, SHEETS_BASE)
    }

    /// Point the store at different API hosts.
    pub fn with_endpoints(
        credentials: Credentials,
        drive_base: impl Into<String>,
        sheets_base: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| StoreError::Auth(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            credentials,
            drive_base: drive_base.into().trim_end_matches('/').to_string(),
            sheets_base: sheets_base.into().trim_end_matches('/').to_string(),
        })
    }

    fn drive_search_url(&self, name: &str) -> Result<Url, ApiError> {
        let query = format!(
            "name = '{}' and mimeType = '{SPREADSHEET_MIME}' and trashed = false",
            escape_query(name)
        );
        Url::parse_with_params(
            &format!("{}/files", self.drive_base),
            &[("q", query.as_str()), ("fields", "files(id,name)")],
        )
        .map_err(|e| ApiError::Url(e.to_string()))
    }

    /// `{sheets_base}/spreadsheets/{id}/...segments`, each segment percent-encoded.
    fn sheets_url(&self, id: &str, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.sheets_base).map_err(|e| ApiError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::Url(format!("'{}' cannot be a base URL", self.sheets_base)))?
            .push("spreadsheets")
            .push(id)
            .extend(segments);
        Ok(url)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let token = self
            .credentials
            .access_token(&self.client)
            .map_err(ApiError::Credentials)?;
        let resp = request.bearer_auth(token).send()?;
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            let body = resp.text().unwrap_or_default().trim().to_string();
            Err(ApiError::Status { status, body })
        }
    }

    fn sheet_titles(&self, handle: &SpreadsheetHandle) -> Result<Vec<String>, ApiError> {
        let mut url = self.sheets_url(&handle.id, &[])?;
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties.title");
        let meta: SpreadsheetMeta = self.send(self.client.get(url))?.json()?;
        Ok(meta.sheets.into_iter().map(|s| s.properties.title).collect())
    }

    fn add_sheet(&self, handle: &SpreadsheetHandle, title: &str) -> Result<(), ApiError> {
        let url = self.sheets_url(&format!("{}:batchUpdate", handle.id), &[])?;
        let body = json!({ "requests": [{ "addSheet": { "properties": { "title": title } } }] });
        self.send(self.client.post(url).json(&body))?;
        debug!(sheet = %title, "added sheet");
        Ok(())
    }
}

/// Escape a value for a Drive `q` string literal.
fn escape_query(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// A1 range covering a whole sheet.
fn sheet_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl SheetStore for GoogleSheetsStore {
    fn name(&self) -> &str {
        "google_sheets"
    }

    fn open_spreadsheet(&self, name: &str) -> Result<SpreadsheetHandle, StoreError> {
        let lookup = || -> Result<FileList, ApiError> {
            let url = self.drive_search_url(name)?;
            Ok(self.send(self.client.get(url))?.json()?)
        };
        let list = lookup().map_err(|e| {
            e.into_store(|reason| StoreError::SheetReadFailure {
                sheet: name.to_string(),
                reason,
            })
        })?;

        let file = list
            .files
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::SpreadsheetNotFound { name: name.into() })?;
        debug!(spreadsheet = %name, id = %file.id, "opened spreadsheet");
        Ok(SpreadsheetHandle {
            name: name.to_string(),
            id: file.id,
        })
    }

    fn list_sheets(&self, handle: &SpreadsheetHandle) -> Result<Vec<String>, StoreError> {
        self.sheet_titles(handle).map_err(|e| {
            e.into_store(|reason| StoreError::SheetReadFailure {
                sheet: handle.name.clone(),
                reason,
            })
        })
    }

    fn read_table(&self, handle: &SpreadsheetHandle, title: &str) -> Result<Table, StoreError> {
        let read = || -> Result<Table, ApiError> {
            let url = self.sheets_url(&handle.id, &["values", &sheet_range(title)])?;
            let range: ValueRange = self.send(self.client.get(url))?.json()?;
            let values = range
                .values
                .into_iter()
                .map(|row| row.into_iter().map(cell_to_string).collect())
                .collect();
            Ok(Table::from_values(values))
        };
        read().map_err(|e| {
            e.into_store(|reason| StoreError::SheetReadFailure {
                sheet: title.to_string(),
                reason,
            })
        })
    }

    fn write_table(
        &self,
        handle: &SpreadsheetHandle,
        title: &str,
        table: &Table,
    ) -> Result<(), StoreError> {
        let write = || -> Result<(), ApiError> {
            if !self.sheet_titles(handle)?.iter().any(|t| t == title) {
                self.add_sheet(handle, title)?;
            }
            let range = sheet_range(title);

            let clear = self.sheets_url(&handle.id, &["values", &format!("{range}:clear")])?;
            self.send(self.client.post(clear).json(&json!({})))?;

            let mut update = self.sheets_url(&handle.id, &["values", &range])?;
            update
                .query_pairs_mut()
                .append_pair("valueInputOption", "RAW");
            let body = json!({
                "range": range,
                "majorDimension": "ROWS",
                "values": table.to_values(),
            });
            self.send(self.client.put(update).json(&body))?;
            Ok(())
        };
        write().map_err(|e| {
            e.into_store(|reason| StoreError::SheetWriteFailure {
                sheet: title.to_string(),
                reason,
            })
        })?;
        debug!(sheet = %title, rows = table.len(), "wrote sheet");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> GoogleSheetsStore {
        GoogleSheetsStore::with_endpoints(
            Credentials::bearer("tok").unwrap(),
            "http://drive.test/v3/",
            "http://sheets.test/v4",
        )
        .unwrap()
    }

    fn read_failure(reason: String) -> StoreError {
        StoreError::SheetReadFailure {
            sheet: "S".into(),
            reason,
        }
    }

    fn status(code: StatusCode) -> ApiError {
        ApiError::Status {
            status: code,
            body: "denied".into(),
        }
    }

    #[test]
    fn drive_query_escapes_quotes() {
        let url = store().drive_search_url("Bob's Data").unwrap();
        let q = url
            .query_pairs()
            .find(|(k, _)| k == "q")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert!(q.starts_with("name = 'Bob\\'s Data'"));
        assert!(q.contains(SPREADSHEET_MIME));
        assert!(url.as_str().starts_with("http://drive.test/v3/files?"));
    }

    #[test]
    fn values_url_encodes_range() {
        let url = store()
            .sheets_url("abc", &["values", &sheet_range("My Sheet")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://sheets.test/v4/spreadsheets/abc/values/'My%20Sheet'"
        );
    }

    #[test]
    fn sheet_range_doubles_quotes() {
        assert_eq!(sheet_range("AAPL"), "'AAPL'");
        assert_eq!(sheet_range("it's"), "'it''s'");
    }

    #[test]
    fn parses_value_range_cells() {
        let range: ValueRange = serde_json::from_str(
            r#"{"range":"'A'!A1:C2","values":[["Date","Close"],["2024-01-02",10.5,true]]}"#,
        )
        .unwrap();
        let values: Vec<Vec<String>> = range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect();
        let table = Table::from_values(values);
        assert_eq!(table.header, vec!["Date", "Close"]);
        assert_eq!(table.rows[0], vec!["2024-01-02", "10.5", "true"]);
    }

    #[test]
    fn empty_sheet_has_no_values_key() {
        let range: ValueRange = serde_json::from_str(r#"{"range":"'A'!A1:Z1000"}"#).unwrap();
        assert!(range.values.is_empty());
    }

    #[test]
    fn unauthorized_and_forbidden_map_to_auth() {
        for code in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let err = status(code).into_store(read_failure);
            assert!(matches!(err, StoreError::Auth(ref m) if m.contains("denied")), "{err:?}");
        }
    }

    #[test]
    fn other_statuses_use_the_fallback() {
        for code in [StatusCode::NOT_FOUND, StatusCode::INTERNAL_SERVER_ERROR] {
            let err = status(code).into_store(read_failure);
            assert!(
                matches!(err, StoreError::SheetReadFailure { ref reason, .. } if reason.starts_with(&format!("HTTP {code}"))),
                "{err:?}"
            );
        }
        // A body that merely mentions 401 is not an auth failure.
        let err = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            body: "HTTP 401 in upstream log".into(),
        }
        .into_store(read_failure);
        assert!(matches!(err, StoreError::SheetReadFailure { .. }));
    }

    #[test]
    fn credential_failures_pass_through() {
        let err = ApiError::Credentials(StoreError::Auth("token endpoint down".into()))
            .into_store(read_failure);
        assert!(matches!(err, StoreError::Auth(ref m) if m == "token endpoint down"));
        let err = ApiError::Url("bad".into()).into_store(read_failure);
        assert!(matches!(err, StoreError::SheetReadFailure { .. }));
    }

    #[test]
    fn unreadable_key_file_fails_store_construction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = Credentials::resolve(None, None, Some(&path)).err();
        assert!(matches!(err, Some(StoreError::Auth(_))));
    }
}
