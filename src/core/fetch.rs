use crate::domain::model::RawRecord;
use crate::domain::ports::RecordSource;
use crate::utils::error::{body_snippet, EtlError, Result};
use reqwest::Client;

/// Fetches a JSON array of upstream records over HTTP(S).
///
/// The body is buffered as text before it is parsed so a failing response
/// can still be quoted in the error.
#[derive(Debug, Clone, Default)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl RecordSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<Vec<RawRecord>> {
        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;
        tracing::debug!("API response status: {} ({} bytes)", status, text.len());

        if !status.is_success() {
            return Err(EtlError::HttpStatusError {
                status: status.as_u16(),
                url: url.to_string(),
                snippet: body_snippet(&text),
            });
        }

        decode_records(url, &text)
    }
}

/// Parses the body as JSON and requires a top-level array. Individual rows
/// are not checked here; see [`RawRecord::from_value`].
pub fn decode_records(url: &str, text: &str) -> Result<Vec<RawRecord>> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|_| EtlError::NonJsonResponse {
            url: url.to_string(),
            snippet: body_snippet(text),
        })?;

    match value {
        serde_json::Value::Array(rows) => {
            Ok(rows.into_iter().map(RawRecord::from_value).collect())
        }
        other => Err(EtlError::UnexpectedPayload {
            url: url.to_string(),
            message: format!("expected a JSON array, got {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
