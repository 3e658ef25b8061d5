//! Failure types and the user-facing error taxonomy
//!
//! Backend adapters and the timeout guard return [`SearchError`]. The
//! dispatcher never surfaces one of these to the protocol layer; each
//! failure is classified into an [`ErrorCategory`] and rendered as a single
//! text block with a fixed, category-specific message.

use thiserror::Error;

/// A failure raised by a backend adapter or the timeout guard.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The backend call did not complete within the deadline.
    #[error("the backend call timed out after {0} seconds")]
    Timeout(u64),

    /// A network-layer failure from the HTTP client.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A backend-reported failure: non-success status, response-level error
    /// field, or a malformed payload. Carries the backend's own wording so
    /// classification can match on it.
    #[error("{0}")]
    Backend(String),
}

/// The closed set of user-facing failure categories.
///
/// `InvalidTool` and `InvalidArguments` are produced by the dispatcher
/// before any backend call; the remaining categories come out of
/// [`ErrorCategory::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidTool,
    InvalidArguments,
    Timeout,
    AuthFailure,
    RateLimited,
    BackendUnreachable,
    Unexpected,
}

impl ErrorCategory {
    /// Map a backend/runtime failure to a category.
    ///
    /// Matching is a case-insensitive substring check over the failure's
    /// display text, in fixed priority order (first match wins). This
    /// mirrors the wording of the upstream APIs; well-known HTTP statuses
    /// are additionally pre-shaped by the adapters so classification does
    /// not depend on backend prose alone.
    pub fn classify(failure: &SearchError) -> Self {
        let lowered = failure.to_string().to_ascii_lowercase();
        if lowered.contains("api_key") || lowered.contains("auth") {
            Self::AuthFailure
        } else if lowered.contains("rate limit") {
            Self::RateLimited
        } else if matches!(failure, SearchError::Timeout(_)) {
            Self::Timeout
        } else if is_connect_failure(failure) || lowered.contains("connection") {
            Self::BackendUnreachable
        } else {
            Self::Unexpected
        }
    }

    /// The fixed user-facing sentence for this category.
    ///
    /// `detail` is interpolated only where the template calls for it: the
    /// offending tool name for `InvalidTool`, the raw failure text for
    /// `Unexpected`.
    pub fn user_message(self, detail: &str) -> String {
        match self {
            Self::InvalidTool => format!(
                "Error: Unknown tool '{detail}'. Only 'search' and 'image_search' are supported."
            ),
            Self::InvalidArguments => {
                "Error: Invalid arguments. A 'query' parameter is required.".to_string()
            }
            Self::Timeout => "The search operation timed out. Please try again with a more \
                              specific query or check your internet connection."
                .to_string(),
            Self::AuthFailure => {
                "Authentication error occurred. Please check the API key configuration."
                    .to_string()
            }
            Self::RateLimited => {
                "Rate limit exceeded. Please wait a moment before trying again.".to_string()
            }
            Self::BackendUnreachable => "Could not reach the search backend. Please check the \
                                         network connection and the backend URL."
                .to_string(),
            Self::Unexpected => format!(
                "An unexpected error occurred during the search. Please try again later. \
                 Error: {detail}"
            ),
        }
    }
}

fn is_connect_failure(failure: &SearchError) -> bool {
    matches!(failure, SearchError::Http(e) if e.is_connect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failures_match_first() {
        let err = SearchError::Backend("tavily rejected the api_key (401)".to_string());
        assert_eq!(ErrorCategory::classify(&err), ErrorCategory::AuthFailure);

        let err = SearchError::Backend("Unauthorized: bad credentials".to_string());
        assert_eq!(ErrorCategory::classify(&err), ErrorCategory::AuthFailure);
    }

    #[test]
    fn test_rate_limit_matches_case_insensitively() {
        let err = SearchError::Backend("429 Too Many Requests: RATE LIMIT exceeded".to_string());
        assert_eq!(ErrorCategory::classify(&err), ErrorCategory::RateLimited);
    }

    #[test]
    fn test_auth_takes_precedence_over_rate_limit() {
        let err = SearchError::Backend("rate limit hit for this api_key".to_string());
        assert_eq!(ErrorCategory::classify(&err), ErrorCategory::AuthFailure);
    }

    #[test]
    fn test_timeout_is_matched_by_type() {
        let err = SearchError::Timeout(30);
        assert_eq!(ErrorCategory::classify(&err), ErrorCategory::Timeout);
    }

    #[test]
    fn test_connection_substring_maps_to_unreachable() {
        let err = SearchError::Backend("connection refused by upstream".to_string());
        assert_eq!(
            ErrorCategory::classify(&err),
            ErrorCategory::BackendUnreachable
        );
    }

    #[test]
    fn test_everything_else_is_unexpected() {
        let err = SearchError::Backend("searxng returned status 500: oops".to_string());
        assert_eq!(ErrorCategory::classify(&err), ErrorCategory::Unexpected);
    }

    #[test]
    fn test_unexpected_message_embeds_failure_text() {
        let err = SearchError::Backend("something odd".to_string());
        let message = ErrorCategory::classify(&err).user_message(&err.to_string());
        assert!(message.contains("unexpected error"));
        assert!(message.contains("something odd"));
    }

    #[test]
    fn test_fixed_messages_do_not_leak_detail() {
        let message = ErrorCategory::RateLimited.user_message("raw backend text");
        assert!(!message.contains("raw backend text"));

        let message = ErrorCategory::Timeout.user_message("raw backend text");
        assert!(message.contains("timed out"));
    }

    #[test]
    fn test_invalid_tool_message_names_the_tool() {
        let message = ErrorCategory::InvalidTool.user_message("fetch");
        assert!(message.contains("'fetch'"));
        assert!(message.contains("'search'"));
        assert!(message.contains("'image_search'"));
    }
}
