use jsonwebtoken::DecodingKey;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Deserialize)]
struct JwksDocument {
    keys: Vec<Jwk>,
}

#[derive(Debug, Clone, Deserialize)]
struct Jwk {
    kid: String,
    kty: String,
    #[serde(default)]
    n: Option<String>,
    #[serde(default)]
    e: Option<String>,
}

struct CachedKeys {
    keys: HashMap<String, DecodingKey>,
    fetched_at: Instant,
}

/// Fetches and caches the issuer's RSA signing keys from `<issuer>/jwks`
pub struct JwksClient {
    jwks_url: String,
    client: reqwest::Client,
    cache: Arc<RwLock<Option<CachedKeys>>>,
    cache_ttl: Duration,
}

impl JwksClient {
    pub fn new(issuer_url: &str, cache_ttl: Duration) -> Self {
        Self {
            jwks_url: format!("{}/jwks", issuer_url.trim_end_matches('/')),
            client: reqwest::Client::new(),
            cache: Arc::new(RwLock::new(None)),
            cache_ttl,
        }
    }

    pub async fn get_key(&self, kid: &str) -> Result<DecodingKey, JwksError> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.fetched_at.elapsed() < self.cache_ttl {
                    if let Some(key) = cached.keys.get(kid) {
                        return Ok(key.clone());
                    }
                }
            }
        }

        // Expired, empty, or the issuer rotated keys
        let keys = self.refresh().await?;
        keys.get(kid)
            .cloned()
            .ok_or_else(|| JwksError::KeyNotFound(kid.to_string()))
    }

    async fn refresh(&self) -> Result<HashMap<String, DecodingKey>, JwksError> {
        let response = self
            .client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| JwksError::FetchError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(JwksError::FetchError(format!(
                "HTTP {} from {}",
                response.status(),
                self.jwks_url
            )));
        }

        let document: JwksDocument = response
            .json()
            .await
            .map_err(|e| JwksError::ParseError(e.to_string()))?;

        let keys = decode_rsa_keys(document)?;
        tracing::debug!(count = keys.len(), "Refreshed JWKS");

        let mut cache = self.cache.write().await;
        *cache = Some(CachedKeys {
            keys: keys.clone(),
            fetched_at: Instant::now(),
        });

        Ok(keys)
    }
}

/// Keep the RSA keys of a JWKS document, keyed by `kid`
fn decode_rsa_keys(document: JwksDocument) -> Result<HashMap<String, DecodingKey>, JwksError> {
    let mut keys = HashMap::new();
    for jwk in document.keys {
        if jwk.kty != "RSA" {
            continue;
        }
        let (Some(n), Some(e)) = (jwk.n.as_deref(), jwk.e.as_deref()) else {
            return Err(JwksError::KeyConversionError(format!(
                "RSA key '{}' is missing modulus or exponent",
                jwk.kid
            )));
        };
        let key = DecodingKey::from_rsa_components(n, e)
            .map_err(|e| JwksError::KeyConversionError(e.to_string()))?;
        keys.insert(jwk.kid, key);
    }
    Ok(keys)
}

#[derive(Debug, thiserror::Error)]
pub enum JwksError {
    #[error("Failed to fetch JWKS: {0}")]
    FetchError(String),

    #[error("Failed to parse JWKS: {0}")]
    ParseError(String),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Failed to convert key: {0}")]
    KeyConversionError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_rsa_keys_are_skipped() {
        let document: JwksDocument = serde_json::from_str(
            r#"{"keys": [{"kid": "ec-1", "kty": "EC", "crv": "P-256", "x": "a", "y": "b"}]}"#,
        )
        .unwrap();
        assert!(decode_rsa_keys(document).unwrap().is_empty());
    }

    #[test]
    fn test_rsa_key_without_components_is_rejected() {
        let document: JwksDocument =
            serde_json::from_str(r#"{"keys": [{"kid": "rsa-1", "kty": "RSA"}]}"#).unwrap();
        assert!(matches!(
            decode_rsa_keys(document),
            Err(JwksError::KeyConversionError(_))
        ));
    }

    #[test]
    fn test_jwks_url_is_derived_from_issuer() {
        let client = JwksClient::new("https://auth.example.com/oidc/", Duration::from_secs(60));
        assert_eq!(client.jwks_url, "https://auth.example.com/oidc/jwks");
    }
}
