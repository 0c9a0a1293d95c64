use qrlanding_core::hostname;
use qrlanding_core::logo::DEFAULT_LOGO_BUCKET;

use crate::auth::jwt::JwtConfig;

/// Which object store holds uploaded logos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// S3-compatible bucket, configured through the standard AWS env vars.
    S3,
    /// Process-local map; objects vanish on restart.
    Memory,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Normalized host the platform itself is served from. Used in QR
    /// target URLs when a tenant has no primary domain.
    pub platform_host: String,
    /// Auth subject whose tenant is given a primary `platform` domain on
    /// `platform_host` at startup, if it has no primary yet.
    pub platform_owner_user_id: Option<String>,
    /// Secret keying the HMAC used to hash client IPs for scan records.
    pub ip_hash_secret: String,
    /// Reject style updates whose assessment is critical with 422.
    pub reject_critical_styles: bool,
    pub storage_backend: StorageBackend,
    /// Bucket holding uploaded logos (default: `qr-logos`).
    pub logo_bucket: String,
    /// Base URL public logo URLs are built from; the bucket name and object
    /// path are appended.
    pub logo_public_base_url: String,
    /// JWT verification settings.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                  |
    /// |-------------------------|--------------------------|
    /// | `HOST`                  | `0.0.0.0`                |
    /// | `PORT`                  | `3000`                   |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`  |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                     |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                     |
    /// | `APP_URL`               | `localhost:3000`         |
    /// | `PLATFORM_OWNER_USER_ID`| unset                    |
    /// | `IP_HASH_SECRET`        | **required**             |
    /// | `REJECT_CRITICAL_STYLES`| `false`                  |
    /// | `STORAGE_BACKEND`       | `memory`                 |
    /// | `LOGO_BUCKET`           | `qr-logos`               |
    /// | `LOGO_PUBLIC_BASE_URL`  | `http://localhost:9000`  |
    ///
    /// # Panics
    ///
    /// Panics on malformed values or a missing secret, so misconfiguration
    /// fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let platform_host = hostname::normalize(&std::env::var("APP_URL").unwrap_or_default());

        let platform_owner_user_id = std::env::var("PLATFORM_OWNER_USER_ID")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let ip_hash_secret =
            std::env::var("IP_HASH_SECRET").expect("IP_HASH_SECRET must be set in the environment");
        assert!(!ip_hash_secret.is_empty(), "IP_HASH_SECRET must not be empty");

        let reject_critical_styles: bool = std::env::var("REJECT_CRITICAL_STYLES")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("REJECT_CRITICAL_STYLES must be true or false");

        let storage_backend = match std::env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "memory".into())
            .as_str()
        {
            "s3" => StorageBackend::S3,
            "memory" => StorageBackend::Memory,
            other => panic!("STORAGE_BACKEND must be 's3' or 'memory', got '{other}'"),
        };

        let logo_bucket =
            std::env::var("LOGO_BUCKET").unwrap_or_else(|_| DEFAULT_LOGO_BUCKET.into());

        let logo_public_base_url = std::env::var("LOGO_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:9000".into())
            .trim_end_matches('/')
            .to_string();

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            platform_host,
            platform_owner_user_id,
            ip_hash_secret,
            reject_critical_styles,
            storage_backend,
            logo_bucket,
            logo_public_base_url,
            jwt,
        }
    }
}
