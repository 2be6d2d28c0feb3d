use thiserror::Error;

/// Number of leading characters of a response body kept for diagnostics.
pub const BODY_SNIPPET_CHARS: usize = 200;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("HTTP {status} for {url}\n{snippet}")]
    HttpStatusError {
        status: u16,
        url: String,
        snippet: String,
    },

    #[error("Non-JSON response from {url}\n{snippet}")]
    NonJsonResponse { url: String, snippet: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Unexpected payload from {url}: {message}")]
    UnexpectedPayload { url: String, message: String },

    #[error("Filesystem error at {path}: {source}")]
    FilesystemError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Filesystem,
    Configuration,
}

impl EtlError {
    pub fn filesystem(path: impl Into<String>, source: std::io::Error) -> Self {
        EtlError::FilesystemError {
            path: path.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::HttpStatusError { .. } | EtlError::ApiError(_) => ErrorCategory::Network,
            EtlError::NonJsonResponse { .. }
            | EtlError::UnexpectedPayload { .. }
            | EtlError::SerializationError(_)
            | EtlError::ProcessingError { .. } => ErrorCategory::Data,
            EtlError::FilesystemError { .. } => ErrorCategory::Filesystem,
            EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Whether the failure happened while talking to an upstream endpoint.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            EtlError::HttpStatusError { .. }
                | EtlError::NonJsonResponse { .. }
                | EtlError::ApiError(_)
        )
    }

    pub fn user_friendly_message(&self) -> String {
        // The Display form may span several lines (body snippet); keep the headline only.
        let full = self.to_string();
        let headline = full.lines().next().unwrap_or_default().to_string();
        format!("Build failed: {}", headline)
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::HttpStatusError { status, .. } if *status == 404 => {
                "Check that the dataset tag still exists upstream"
            }
            EtlError::HttpStatusError { .. } | EtlError::ApiError(_) => {
                "Check network connectivity and try again later"
            }
            EtlError::NonJsonResponse { .. } | EtlError::UnexpectedPayload { .. } => {
                "The upstream dataset format may have changed; inspect the response body"
            }
            EtlError::FilesystemError { .. } => {
                "Check permissions and free space for the output directory"
            }
            EtlError::SerializationError(_) | EtlError::ProcessingError { .. } => {
                "Inspect the upstream records that triggered the failure"
            }
            EtlError::InvalidConfigValueError { .. } => "Fix the configuration value and re-run",
        }
    }
}

/// Truncates a response body to the diagnostic snippet length, on a char boundary.
pub fn body_snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_CHARS).collect()
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_snippet_counts_chars_not_bytes() {
        let body = "é".repeat(300);
        let snippet = body_snippet(&body);
        assert_eq!(snippet.chars().count(), BODY_SNIPPET_CHARS);
        assert_eq!(body_snippet("short"), "short");
    }

    #[test]
    fn test_http_status_message_and_category() {
        let err = EtlError::HttpStatusError {
            status: 500,
            url: "https://example.com/states.json".to_string(),
            snippet: "boom".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 500 for https://example.com/states.json\nboom"
        );
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(err.is_fetch_error());
        assert_eq!(
            err.user_friendly_message(),
            "Build failed: HTTP 500 for https://example.com/states.json"
        );
    }

    #[test]
    fn test_user_friendly_message_is_one_line() {
        let err = EtlError::NonJsonResponse {
            url: "https://example.com/cities.json".to_string(),
            snippet: "<html>\n<body>Maintenance</body>\n</html>".to_string(),
        };
        let message = err.user_friendly_message();
        assert!(!message.contains('\n'));
        assert_eq!(
            message,
            "Build failed: Non-JSON response from https://example.com/cities.json"
        );
    }

    #[test]
    fn test_filesystem_error_is_not_fetch_error() {
        let err = EtlError::filesystem(
            "dist/states.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.category(), ErrorCategory::Filesystem);
        assert!(!err.is_fetch_error());
        assert!(err.to_string().contains("dist/states.json"));
    }
}
