use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use serde::Deserialize;

/// Claims read from the unverified middle segment of a bearer token.
///
/// This is a display convenience for when the profile endpoint is
/// unreachable. Nothing here is authenticated; the backend stays the sole
/// authority for access control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Decode the payload segment of `token`. Returns `None` for anything that
/// is not a three-segment token with a base64 JSON payload; never panics.
pub fn decode_token_claims(token: &str) -> Option<TokenClaims> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return None;
    }
    let bytes = decode_segment(segments[1])?;
    serde_json::from_slice(&bytes).ok()
}

fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    // Tokens in the wild use the url-safe alphabet, with or without padding.
    let trimmed = segment.trim_end_matches('=');
    if let Ok(bytes) = URL_SAFE_NO_PAD.decode(trimmed) {
        return Some(bytes);
    }
    STANDARD_NO_PAD.decode(trimmed).ok()
}

#[cfg(test)]
mod tests {
    use super::{decode_token_claims, TokenClaims};
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;

    fn token_with_payload(payload: &str) -> String {
        format!(
            "{}.{}.{}",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload),
            URL_SAFE_NO_PAD.encode("signature")
        )
    }

    #[test]
    fn decodes_sub_and_role_claims() {
        let token = token_with_payload(r#"{"sub":"alice@campus.edu","role":"support","exp":1}"#);
        let claims = decode_token_claims(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("alice@campus.edu"));
        assert_eq!(claims.role.as_deref(), Some("support"));
    }

    #[test]
    fn missing_claims_decode_as_absent() {
        let token = token_with_payload(r#"{"exp":1}"#);
        let claims = decode_token_claims(&token).unwrap();
        assert_eq!(claims, TokenClaims::default());
    }

    #[test]
    fn wrong_segment_count_returns_none_without_panicking() {
        assert_eq!(decode_token_claims(""), None);
        assert_eq!(decode_token_claims("opaque-token"), None);
        assert_eq!(decode_token_claims("one.two"), None);
        assert_eq!(decode_token_claims("a.b.c.d"), None);
    }

    #[test]
    fn garbage_payload_returns_none() {
        assert_eq!(decode_token_claims("head.!!not-base64!!.sig"), None);
        let not_json = format!("head.{}.sig", URL_SAFE_NO_PAD.encode("plain text"));
        assert_eq!(decode_token_claims(&not_json), None);
    }

    #[test]
    fn tolerates_padded_payload_segment() {
        let payload = URL_SAFE_NO_PAD.encode(r#"{"role":"admin"}"#);
        let token = format!("head.{payload}==.sig");
        let claims = decode_token_claims(&token).unwrap();
        assert_eq!(claims.role.as_deref(), Some("admin"));
    }
}
