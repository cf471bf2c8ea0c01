use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use secrecy::{ExposeSecret, Secret};
use serde_json::json;

/// Bearer-token guard failures
#[derive(Debug, PartialEq)]
pub enum AuthError {
    /// No usable bearer credential in the Authorization header
    MissingToken,
    /// A bearer credential was presented but does not match
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            AuthError::InvalidToken => (StatusCode::FORBIDDEN, "Forbidden"),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Validates the bearer credential in the Authorization header against the
/// configured admin token.
///
/// The check is independent of any browser session: a missing, unreadable
/// or non-Bearer header is MissingToken, a well-formed token that does not
/// match is InvalidToken. Comparison is constant-time.
pub fn check_bearer_token(headers: &HeaderMap, expected: &Secret<String>) -> Result<(), AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::MissingToken)?;

    let token = value.strip_prefix("Bearer ").ok_or(AuthError::MissingToken)?;
    if token.trim().is_empty() {
        return Err(AuthError::MissingToken);
    }

    ring::constant_time::verify_slices_are_equal(
        token.as_bytes(),
        expected.expose_secret().as_bytes(),
    )
    .map_err(|_| AuthError::InvalidToken)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn admin_token() -> Secret<String> {
        Secret::new("sekrit-admin-token".to_string())
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_missing_header_is_missing_token() {
        let result = check_bearer_token(&HeaderMap::new(), &admin_token());
        assert_eq!(result, Err(AuthError::MissingToken));
    }

    #[test]
    fn test_non_bearer_scheme_is_missing_token() {
        let result = check_bearer_token(&headers_with("Basic dXNlcjpwdw=="), &admin_token());
        assert_eq!(result, Err(AuthError::MissingToken));
    }

    #[test]
    fn test_empty_token_is_missing_token() {
        let result = check_bearer_token(&headers_with("Bearer "), &admin_token());
        assert_eq!(result, Err(AuthError::MissingToken));
    }

    #[test]
    fn test_wrong_token_is_invalid_token() {
        let result = check_bearer_token(&headers_with("Bearer nope"), &admin_token());
        assert_eq!(result, Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_token_with_extra_whitespace_does_not_match() {
        let result = check_bearer_token(&headers_with("Bearer sekrit-admin-token "), &admin_token());
        assert_eq!(result, Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_matching_token_passes() {
        let result = check_bearer_token(&headers_with("Bearer sekrit-admin-token"), &admin_token());
        assert_eq!(result, Ok(()));
    }
}
