use campusdesk_api::SupportDeskApi;
use campusdesk_core::{decode_token_claims, Role};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleSource {
    Profile,
    TokenClaims,
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRole {
    pub role: Option<Role>,
    pub identity: Option<String>,
    pub source: RoleSource,
}

/// Resolve the current role: ask the profile endpoint first, and only when
/// that fails fall back to the token's unverified claims. The fallback is a
/// display hint — authorization stays with the backend either way.
pub async fn resolve_role(api: &dyn SupportDeskApi, token: &str) -> ResolvedRole {
    match api.current_user(token).await {
        Ok(user) => ResolvedRole {
            role: Role::parse(&user.role.name),
            identity: Some(user.email),
            source: RoleSource::Profile,
        },
        Err(error) => {
            warn!(error = %error, "profile lookup failed; falling back to token claims");
            match decode_token_claims(token) {
                Some(claims) => ResolvedRole {
                    role: Some(
                        claims
                            .role
                            .as_deref()
                            .and_then(Role::parse)
                            .unwrap_or(Role::Student),
                    ),
                    identity: claims.sub,
                    source: RoleSource::TokenClaims,
                },
                None => ResolvedRole {
                    role: None,
                    identity: None,
                    source: RoleSource::Unresolved,
                },
            }
        }
    }
}
