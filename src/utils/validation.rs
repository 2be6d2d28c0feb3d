use crate::utils::error::{EtlError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                &format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(
            field_name,
            url_str,
            &format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

/// A state code becomes a file name under `cities/`; it must not be able to
/// name anything outside that directory.
pub fn validate_file_stem(field_name: &str, stem: &str) -> Result<()> {
    if stem.is_empty()
        || stem == "."
        || stem == ".."
        || stem.contains(['/', '\\', '\0'])
    {
        return Err(EtlError::ProcessingError {
            message: format!("{} '{}' is not usable as a file name", field_name, stem),
        });
    }
    Ok(())
}

fn invalid(field_name: &str, value: &str, reason: &str) -> EtlError {
    EtlError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("states_url", "https://example.com").is_ok());
        assert!(validate_url("states_url", "http://127.0.0.1:8080/states.json").is_ok());
        assert!(validate_url("states_url", "").is_err());
        assert!(validate_url("states_url", "invalid-url").is_err());
        assert!(validate_url("states_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output_path", "dist").is_ok());
        assert!(validate_path("output_path", "").is_err());
        assert!(validate_path("output_path", "di\0st").is_err());
    }

    #[test]
    fn test_validate_file_stem() {
        assert!(validate_file_stem("state_code", "KA").is_ok());
        assert!(validate_file_stem("state_code", "UNKNOWN").is_ok());
        assert!(validate_file_stem("state_code", "..").is_err());
        assert!(validate_file_stem("state_code", "../etc").is_err());
        assert!(validate_file_stem("state_code", "a\\b").is_err());
    }
}
