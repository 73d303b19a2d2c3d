use super::model::{AuthenticatedUser, CustomClaims};
use crate::core::error::AppError;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::jwks::JwksClient;

pub struct JwtValidator {
    jwks_client: Arc<JwksClient>,
    issuer: String,
    audience: String,
    leeway: u64,
    claims_namespace: String,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    // iss/aud/exp/nbf are checked by jsonwebtoken itself
    sub: String,

    /// Everything else, including the namespaced custom claims
    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

impl JwtValidator {
    pub fn new(
        jwks_client: Arc<JwksClient>,
        issuer: String,
        audience: String,
        leeway: Duration,
        claims_namespace: String,
    ) -> Self {
        Self {
            jwks_client,
            issuer,
            audience,
            leeway: leeway.as_secs(),
            claims_namespace,
        }
    }

    pub async fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header = decode_header(token).map_err(|e| AppError::Unauthorized(e.to_string()))?;

        if header.alg != Algorithm::RS256 {
            return Err(AppError::Unauthorized(format!(
                "Unsupported algorithm: {:?}. Only RS256 is allowed",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| AppError::Unauthorized("Missing kid in token header".to_string()))?;

        let decoding_key = self
            .jwks_client
            .get_key(&kid)
            .await
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.leeway = self.leeway;
        validation.validate_nbf = true;

        let token_data = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;

        resolve_user(token_data.claims, &self.claims_namespace)
    }
}

/// Build the request user from validated claims.
///
/// The numeric user id comes from the namespaced custom claims, falling back
/// to `sub` when it is itself numeric.
fn resolve_user(mut claims: Claims, namespace: &str) -> Result<AuthenticatedUser, AppError> {
    let custom: CustomClaims = match claims.extra.remove(namespace) {
        Some(value) => serde_json::from_value(value)
            .map_err(|e| AppError::Unauthorized(format!("Malformed custom claims: {}", e)))?,
        None => CustomClaims::default(),
    };

    let user_id = custom
        .user_id
        .or_else(|| claims.sub.parse::<i64>().ok())
        .ok_or_else(|| AppError::Unauthorized("Token carries no numeric user id".to_string()))?;

    Ok(AuthenticatedUser {
        user_id,
        sub: claims.sub,
        roles: custom.roles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "https://pantry-cms.dev/claims";

    fn claims(json: Value) -> Claims {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_user_id_from_custom_claims() {
        let user = resolve_user(
            claims(serde_json::json!({
                "sub": "u_abc",
                "iss": "https://issuer",
                NS: {"user_id": 17, "roles": ["editor"]},
            })),
            NS,
        )
        .unwrap();

        assert_eq!(user.user_id, 17);
        assert_eq!(user.sub, "u_abc");
        assert_eq!(user.roles, vec!["editor".to_string()]);
    }

    #[test]
    fn test_numeric_sub_is_fallback() {
        let user = resolve_user(claims(serde_json::json!({"sub": "42"})), NS).unwrap();
        assert_eq!(user.user_id, 42);
        assert!(user.roles.is_empty());
    }

    #[test]
    fn test_token_without_user_id_is_rejected() {
        let err = resolve_user(claims(serde_json::json!({"sub": "u_abc"})), NS).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_malformed_custom_claims_are_rejected() {
        let err = resolve_user(
            claims(serde_json::json!({"sub": "1", NS: {"user_id": "seventeen"}})),
            NS,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
