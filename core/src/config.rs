//! Shared configuration constants and endpoint resolution.
//!
//! The extraction endpoint is resolved from a list of candidate sources,
//! highest priority first (runtime injection, then build time). The first
//! non-blank candidate wins; with none, the endpoint is empty and every
//! submission fails with [`crate::ExtractError::MissingEndpoint`].

/// Multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

/// Multipart field carrying the category id.
pub const DOC_TYPE_FIELD: &str = "doc_type";

/// Value of the `accept` header on every submission.
pub const ACCEPT_JSON: &str = "application/json";

/// Environment / runtime key holding the endpoint URL.
pub const API_URL_KEY: &str = "API_BASE_URL";

/// Alternative runtime key, as injected by older deployments.
pub const API_URL_KEY_ALIAS: &str = "VITE_API_BASE_URL";

/// Endpoint baked in at build time, if any.
pub const BUILD_API_BASE_URL: Option<&str> = option_env!("API_BASE_URL");

/// How long the error notification stays up.
pub const NOTIFICATION_TIMEOUT_MS: u32 = 6_000;

/// Pick the first non-blank candidate, trimmed. Empty when none.
pub fn resolve_endpoint<'a, I>(candidates: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_wins_over_build_time() {
        let url = resolve_endpoint([Some("http://runtime/api"), Some("http://build/api")]);
        assert_eq!(url, "http://runtime/api");
    }

    #[test]
    fn test_blank_candidates_are_skipped() {
        let url = resolve_endpoint([None, Some("   "), Some(" http://build/api ")]);
        assert_eq!(url, "http://build/api");
    }

    #[test]
    fn test_falls_back_to_empty() {
        assert_eq!(resolve_endpoint([None, Some("")]), "");
    }
}
