use std::path::PathBuf;

use shootdesk_core::settings::AppSettings;
use shootdesk_core::shortcode::ShortCodeConfig;
use shootdesk_core::uploads::UploadLimits;

use crate::auth::jwt::JwtConfig;

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
    /// JWT validation settings.
    pub jwt: JwtConfig,
    /// Root directory for stored uploads (default: `uploads`).
    pub upload_dir: PathBuf,
    /// Short code and upload limits handed to the domain layer.
    pub settings: AppSettings,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                  |
    /// |---------------------------|--------------------------|
    /// | `HOST`                    | `0.0.0.0`                |
    /// | `PORT`                    | `3000`                   |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`  |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                     |
    /// | `UPLOAD_DIR`              | `uploads`                |
    /// | `SHORT_CODE_LENGTH`       | `8`                      |
    /// | `SHORT_CODE_CHARSET`      | `a-z0-9`                 |
    /// | `MAX_UPLOAD_BYTES`        | `10485760`               |
    /// | `MAX_UPLOADS_PER_REQUEST` | `20`                     |
    ///
    /// # Panics
    ///
    /// Panics on unparsable values or settings that fail validation.
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

        let upload_dir =
            PathBuf::from(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()));

        let settings = settings_from_env();
        if let Err(e) = settings.validate() {
            panic!("Invalid application settings: {e}");
        }

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            upload_dir,
            settings,
        }
    }
}

fn settings_from_env() -> AppSettings {
    let defaults = AppSettings::default();

    let short_code = ShortCodeConfig {
        length: std::env::var("SHORT_CODE_LENGTH")
            .map(|v| v.parse().expect("SHORT_CODE_LENGTH must be a valid usize"))
            .unwrap_or(defaults.short_code.length),
        charset: std::env::var("SHORT_CODE_CHARSET").unwrap_or(defaults.short_code.charset),
    };

    let uploads = UploadLimits {
        max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
            .map(|v| v.parse().expect("MAX_UPLOAD_BYTES must be a valid u64"))
            .unwrap_or(defaults.uploads.max_upload_bytes),
        max_uploads_per_request: std::env::var("MAX_UPLOADS_PER_REQUEST")
            .map(|v| v.parse().expect("MAX_UPLOADS_PER_REQUEST must be a valid usize"))
            .unwrap_or(defaults.uploads.max_uploads_per_request),
        supported_formats: defaults.uploads.supported_formats,
    };

    AppSettings {
        short_code,
        uploads,
    }
}
