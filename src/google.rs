//! Google Sheets v4 backend.
//!
//! Authentication is handled elsewhere; this client only attaches an already
//! issued OAuth access token to each request.

use crate::errors::StoreError;
use crate::sheet::{rows_to_records, Row, SheetBackend};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";

#[derive(Clone)]
pub struct GoogleSheet {
    client: Client,
    api_base: String,
    spreadsheet_id: String,
    range: String,
    access_token: String,
}

#[derive(Debug, Serialize)]
struct AppendBody<'a> {
    values: [&'a [String]; 1],
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl GoogleSheet {
    pub fn new(
        client: Client,
        api_base: impl Into<String>,
        spreadsheet_id: impl Into<String>,
        range: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            range: range.into(),
            access_token: access_token.into(),
        }
    }

    fn values_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.api_base,
            urlencoding::encode(&self.spreadsheet_id),
            urlencoding::encode(&self.range)
        )
    }

    fn append_url(&self) -> String {
        format!(
            "{}:append?valueInputOption=RAW&insertDataOption=INSERT_ROWS",
            self.values_url()
        )
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::new(format!(
            "google sheets returned {status}: {}",
            body.trim()
        )))
    }
}

fn cell_to_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// Splits a `values.get` payload into header and rows.
fn split_values(values: Vec<Vec<Value>>) -> (Vec<String>, Vec<Vec<String>>) {
    let mut rows = values
        .into_iter()
        .map(|row| row.into_iter().map(cell_to_string).collect::<Vec<_>>());
    let header = rows.next().unwrap_or_default();
    (header, rows.collect())
}

#[async_trait]
impl SheetBackend for GoogleSheet {
    async fn append_row(&self, row: &[String]) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.append_url())
            .bearer_auth(&self.access_token)
            .json(&AppendBody { values: [row] })
            .send()
            .await?;
        Self::check(response).await?;
        debug!(range = %self.range, "appended row to google sheet");
        Ok(())
    }

    async fn get_all_records(&self) -> Result<Vec<Row>, StoreError> {
        let response = self
            .client
            .get(self.values_url())
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let payload: ValueRange = Self::check(response).await?.json().await?;
        let (header, rows) = split_values(payload.values);
        Ok(rows_to_records(&header, &rows))
    }

    fn kind(&self) -> &'static str {
        "google"
    }
}
