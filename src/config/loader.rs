use std::{env, net::IpAddr, str::FromStr, time::Duration};

use super::env::{AppConfig, ConfigError, LoggingConfig, OcrConfig, ServerConfig};

const DEFAULT_PORT: u16 = 10_000;
const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_OCR_TIMEOUT_MS: u64 = 15_000;

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_lookup(|key| env::var(key).ok())
}

impl AppConfig {
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server = ServerConfig {
            bind_address: parse_or("BIND_ADDRESS", var("BIND_ADDRESS"), IpAddr::from([0, 0, 0, 0]))?,
            port: parse_or("PORT", var("PORT"), DEFAULT_PORT)?,
            max_image_bytes: parse_or(
                "MAX_IMAGE_BYTES",
                var("MAX_IMAGE_BYTES"),
                DEFAULT_MAX_IMAGE_BYTES,
            )?,
            cors_allowed_origins: parse_origins(var("CORS_ALLOWED_ORIGINS"))?,
        };

        let logging = LoggingConfig {
            level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            logs_dir: var("LOGS_DIR").unwrap_or_else(|| "logs".to_string()),
        };

        let ocr = OcrConfig {
            tesseract_cmd: var("TESSERACT_CMD").unwrap_or_else(|| "tesseract".to_string()),
            languages: var("OCR_LANGUAGES").unwrap_or_else(|| "eng".to_string()),
            timeout: Duration::from_millis(parse_or(
                "OCR_TIMEOUT",
                var("OCR_TIMEOUT"),
                DEFAULT_OCR_TIMEOUT_MS,
            )?),
        };

        Ok(Self {
            server,
            logging,
            ocr,
        })
    }
}

fn parse_or<T: FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}

fn parse_origins(value: Option<String>) -> Result<Option<Vec<String>>, ConfigError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let origins = raw
        .split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>();
    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        return Ok(None);
    }
    if let Some(bad) = origins.iter().find(|origin| !origin.starts_with("http")) {
        return Err(ConfigError::Invalid {
            key: "CORS_ALLOWED_ORIGINS",
            value: bad.clone(),
        });
    }
    Ok(Some(origins))
}
