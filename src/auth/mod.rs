//! Platform identity header authentication.
//!
//! The hosting platform's edge injects a base64-encoded principal header
//! for signed-in users. This module decodes that header and gates the API
//! routes on it. There is no independent signature or token validation
//! here: the header is only reachable through the platform edge, which
//! performs the actual login.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Header the platform edge injects for authenticated sessions.
pub const PRINCIPAL_HEADER: &str = "x-ms-client-principal";

/// Role the platform grants every signed-in user.
pub const AUTHENTICATED_ROLE: &str = "authenticated";

/// The authenticated-identity record carried in the platform header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub identity_provider: String,
    pub user_id: String,
    #[serde(default)]
    pub user_details: String,
    #[serde(default)]
    pub user_roles: Vec<String>,
}

impl Principal {
    /// Whether the platform marked this principal as signed in.
    pub fn is_authenticated(&self) -> bool {
        self.user_roles.iter().any(|role| role == AUTHENTICATED_ROLE)
    }
}

/// Decode the platform principal header.
///
/// Decoding is base64 -> UTF-8 -> JSON; any failure along the way yields
/// `None`, as does a principal missing its identity provider or user id.
pub fn parse_principal(header: Option<&str>) -> Option<Principal> {
    let header = header?;

    let decoded = BASE64_STANDARD.decode(header).ok()?;
    let text = String::from_utf8(decoded).ok()?;
    let principal: Principal = serde_json::from_str(&text).ok()?;

    if principal.user_id.is_empty() || principal.identity_provider.is_empty() {
        return None;
    }

    Some(principal)
}

/// Authorization check: a parsed principal must also carry the
/// authenticated role.
pub fn is_authenticated(principal: Option<&Principal>) -> bool {
    principal.map(Principal::is_authenticated).unwrap_or(false)
}

/// Auth layer for the API routes.
///
/// Parses the platform header and rejects requests without an authenticated
/// principal. The parsed principal is stored in request extensions for
/// handlers to log.
pub async fn principal_auth_layer(mut request: Request, next: Next) -> Response {
    let header = request
        .headers()
        .get(PRINCIPAL_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    match parse_principal(header.as_deref()) {
        Some(principal) if principal.is_authenticated() => {
            tracing::debug!(
                user = %principal.user_details,
                id = %principal.user_id,
                "authenticated request"
            );
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        _ => AppError::Unauthorized("Unauthorized: authentication required".to_string())
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(raw: &str) -> String {
        BASE64_STANDARD.encode(raw.as_bytes())
    }

    #[test]
    fn test_parse_valid_principal() {
        let header = encode(
            r#"{"identityProvider":"github","userId":"u-1","userDetails":"octocat","userRoles":["anonymous","authenticated"]}"#,
        );

        let principal = parse_principal(Some(&header)).expect("principal should parse");
        assert_eq!(principal.identity_provider, "github");
        assert_eq!(principal.user_id, "u-1");
        assert_eq!(principal.user_details, "octocat");
        assert!(principal.is_authenticated());
    }

    #[test]
    fn test_parse_missing_header() {
        assert!(parse_principal(None).is_none());
    }

    #[test]
    fn test_parse_invalid_base64() {
        assert!(parse_principal(Some("!!!not-base64!!!")).is_none());
    }

    #[test]
    fn test_parse_invalid_utf8() {
        let header = BASE64_STANDARD.encode([0xff, 0xfe, 0xfd]);
        assert!(parse_principal(Some(&header)).is_none());
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(parse_principal(Some(&encode("not json"))).is_none());
    }

    #[test]
    fn test_parse_rejects_missing_identity_fields() {
        let no_user = encode(r#"{"identityProvider":"github","userId":"","userRoles":[]}"#);
        assert!(parse_principal(Some(&no_user)).is_none());

        let no_provider = encode(r#"{"identityProvider":"","userId":"u-1","userRoles":[]}"#);
        assert!(parse_principal(Some(&no_provider)).is_none());
    }

    #[test]
    fn test_unauthenticated_role_is_not_authorized() {
        let header = encode(
            r#"{"identityProvider":"github","userId":"u-1","userDetails":"octocat","userRoles":["anonymous"]}"#,
        );

        let principal = parse_principal(Some(&header));
        assert!(principal.is_some());
        assert!(!is_authenticated(principal.as_ref()));
    }

    #[test]
    fn test_no_principal_is_not_authorized() {
        assert!(!is_authenticated(None));
    }
}
