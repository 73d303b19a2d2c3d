use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub swagger: SwaggerConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
    /// Mounts `POST /api/admin/reset`, which wipes and reseeds the content tables
    pub enable_admin_reset: bool,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub issuer: String,
    pub audience: String,
    pub jwks_cache_ttl: Duration,
    pub jwt_leeway: Duration,
    /// Name of the JWT claim holding the CMS-specific claims object
    pub claims_namespace: String,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Settings shared by every server-rendered page
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub title: String,
    pub slogan: String,
}

impl Config {
    /// Read every section from the process environment. `.env` is loaded by
    /// `main` before this runs.
    pub fn from_env() -> Result<Self, String> {
        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            site: SiteConfig::from_env()?,
        })
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(format!("{} must be a boolean, got '{}'", name, other)),
    }
}

/// Non-empty value of `name`, if set
fn env_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

fn env_required(name: &str) -> Result<String, String> {
    env_opt(name).ok_or_else(|| format!("{} must be set", name))
}

fn env_string(name: &str, default: &str) -> String {
    env_opt(name).unwrap_or_else(|| default.to_string())
}

/// Parse `name` as `T`, falling back to `default` when unset
fn env_parse<T>(name: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    match env_opt(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| format!("Invalid {} '{}': {}", name, raw, e)),
        None => Ok(default),
    }
}

fn env_bool(name: &str, default: bool) -> Result<bool, String> {
    env_opt(name).map_or(Ok(default), |raw| parse_bool(name, &raw))
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 2 * 1024 * 1024; // 2MB

    pub fn from_env() -> Result<Self, String> {
        let cors_allowed_origins = env_string("CORS_ALLOWED_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host: env_string("HOST", "127.0.0.1"),
            port: env_parse("PORT", 3000)?,
            cors_allowed_origins,
            max_request_body_size: env_parse(
                "MAX_REQUEST_BODY_SIZE",
                Self::DEFAULT_MAX_REQUEST_BODY_SIZE,
            )?,
            enable_admin_reset: env_bool("ENABLE_ADMIN_RESET", false)?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            url: env_required("DATABASE_URL")?,
            max_connections: env_parse("DB_MAX_CONNECTIONS", 10)?,
            min_connections: env_parse("DB_MIN_CONNECTIONS", 1)?,
            acquire_timeout_secs: env_parse("DB_ACQUIRE_TIMEOUT_SECS", 5)?,
            idle_timeout_secs: env_parse("DB_IDLE_TIMEOUT_SECS", 600)?,
            max_lifetime_secs: env_parse("DB_MAX_LIFETIME_SECS", 1800)?,
        })
    }
}

impl AuthConfig {
    const DEFAULT_CLAIMS_NAMESPACE: &'static str = "https://pantry-cms.dev/claims";

    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            issuer: env_required("AUTH_ISSUER")?,
            audience: env_required("AUTH_AUDIENCE")?,
            jwks_cache_ttl: Duration::from_secs(env_parse("JWKS_CACHE_TTL", 3600)?),
            jwt_leeway: Duration::from_secs(env_parse("JWT_LEEWAY", 60)?),
            claims_namespace: env_string("AUTH_CLAIMS_NAMESPACE", Self::DEFAULT_CLAIMS_NAMESPACE),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            username: env_opt("SWAGGER_USERNAME"),
            password: env_opt("SWAGGER_PASSWORD"),
            title: env_string("SWAGGER_TITLE", "Pantry CMS API"),
            version: env_string("SWAGGER_VERSION", env!("CARGO_PKG_VERSION")),
            description: env_string("SWAGGER_DESCRIPTION", "Articles and categories API"),
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl SiteConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            title: env_string("SITE_TITLE", "PantryCMS"),
            slogan: env_string("SITE_SLOGAN", "JS-Free Content Management System"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_accepts_common_spellings() {
        assert!(parse_bool("X", "true").unwrap());
        assert!(parse_bool("X", "1").unwrap());
        assert!(parse_bool("X", " YES ").unwrap());
        assert!(!parse_bool("X", "false").unwrap());
        assert!(!parse_bool("X", "0").unwrap());
        assert!(!parse_bool("X", "").unwrap());
    }

    #[test]
    fn test_parse_bool_rejects_garbage() {
        let err = parse_bool("ENABLE_ADMIN_RESET", "maybe").unwrap_err();
        assert!(err.contains("ENABLE_ADMIN_RESET"));
    }

    #[test]
    fn test_env_parse_reports_variable_name() {
        env::set_var("PANTRY_TEST_PORT", "eighty");
        let err = env_parse::<u16>("PANTRY_TEST_PORT", 3000).unwrap_err();
        assert!(err.contains("PANTRY_TEST_PORT"));

        env::set_var("PANTRY_TEST_PORT", " 8080 ");
        assert_eq!(env_parse::<u16>("PANTRY_TEST_PORT", 3000).unwrap(), 8080);
        env::remove_var("PANTRY_TEST_PORT");
    }

    #[test]
    fn test_env_defaults_when_unset_or_blank() {
        assert_eq!(env_parse::<u64>("PANTRY_TEST_UNSET", 42).unwrap(), 42);

        env::set_var("PANTRY_TEST_BLANK", "   ");
        assert_eq!(env_string("PANTRY_TEST_BLANK", "fallback"), "fallback");
        assert!(env_required("PANTRY_TEST_BLANK").is_err());
        env::remove_var("PANTRY_TEST_BLANK");
    }

    #[test]
    fn test_swagger_credentials_require_both_parts() {
        let mut swagger = SwaggerConfig {
            username: Some("admin".to_string()),
            password: None,
            title: String::new(),
            version: String::new(),
            description: String::new(),
        };
        assert_eq!(swagger.credentials(), None);

        swagger.password = Some("secret".to_string());
        assert_eq!(swagger.credentials().as_deref(), Some("admin:secret"));
    }
}
