//! Configuration module for Drive Index.

use serde::Deserialize;
use std::path::Path;

use crate::drive::query::MAX_PAGE_SIZE;
use crate::{IndexError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path prefix the app is mounted under (e.g. "/drive"), used in redirects.
    #[serde(default)]
    pub base_path: String,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_path: String::new(),
            cors_origins: vec![],
        }
    }
}

/// Google Drive connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DriveConfig {
    /// Base URL of the Drive v3 API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// OAuth access token (takes precedence over `api_key`).
    #[serde(default)]
    pub access_token: String,
    /// API key, usable for publicly shared folders.
    #[serde(default)]
    pub api_key: String,
    /// Id of the folder whose contents are listed.
    #[serde(default)]
    pub root_folder: String,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Total request timeout in seconds.
    #[serde(default = "default_total_timeout")]
    pub total_timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://www.googleapis.com/drive/v3".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_total_timeout() -> u64 {
    30
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            access_token: String::new(),
            api_key: String::new(),
            root_folder: String::new(),
            connect_timeout_secs: default_connect_timeout(),
            total_timeout_secs: default_total_timeout(),
        }
    }
}

/// File listing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Fields requested for every record.
    #[serde(default = "default_fields")]
    pub fields: String,
    /// Ordering of the listing.
    #[serde(default = "default_order_by")]
    pub order_by: String,
    /// Records per page.
    #[serde(default = "default_items_per_page")]
    pub items_per_page: u32,
    /// Banners larger than this (in bytes) are served from Drive directly.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Exact name of the readme file.
    #[serde(default = "default_readme")]
    pub readme: String,
    /// Name prefix of the banner image.
    #[serde(default = "default_banner")]
    pub banner: String,
    /// Name prefixes of files left out of listings.
    #[serde(default = "default_hidden_files")]
    pub hidden_files: Vec<String>,
    /// Cache-Control header for listing and banner responses.
    #[serde(default = "default_cache_control")]
    pub cache_control: String,
}

fn default_fields() -> String {
    "id,name,mimeType,size,webContentLink,modifiedTime,fileExtension".to_string()
}

fn default_order_by() -> String {
    "folder,name,modifiedTime desc".to_string()
}

fn default_items_per_page() -> u32 {
    50
}

fn default_max_file_size() -> u64 {
    4 * 1024 * 1024 // 4MB
}

fn default_readme() -> String {
    "README.md".to_string()
}

fn default_banner() -> String {
    "banner".to_string()
}

fn default_hidden_files() -> Vec<String> {
    vec![".password".to_string(), ".hidden".to_string()]
}

fn default_cache_control() -> String {
    "public, max-age=60, s-maxage=60, stale-while-revalidate=300".to_string()
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            fields: default_fields(),
            order_by: default_order_by(),
            items_per_page: default_items_per_page(),
            max_file_size: default_max_file_size(),
            readme: default_readme(),
            banner: default_banner(),
            hidden_files: default_hidden_files(),
            cache_control: default_cache_control(),
        }
    }
}

/// Identifier codec configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodecConfig {
    /// Secret the codec keys are derived from (must be set).
    #[serde(default)]
    pub secret: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/driveindex.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Drive configuration.
    #[serde(default)]
    pub drive: DriveConfig,
    /// Listing configuration.
    #[serde(default)]
    pub files: FilesConfig,
    /// Codec configuration.
    #[serde(default)]
    pub codec: CodecConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(IndexError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| IndexError::Validation(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `DRIVEINDEX_CODEC_SECRET`: codec secret
    /// - `DRIVEINDEX_ACCESS_TOKEN`: Drive OAuth access token
    /// - `DRIVEINDEX_API_KEY`: Drive API key
    /// - `DRIVEINDEX_ROOT_FOLDER`: id of the listed folder
    ///
    /// Empty values are ignored.
    pub fn apply_env_overrides(&mut self) {
        let overrides: [(&str, &mut String); 4] = [
            ("DRIVEINDEX_CODEC_SECRET", &mut self.codec.secret),
            ("DRIVEINDEX_ACCESS_TOKEN", &mut self.drive.access_token),
            ("DRIVEINDEX_API_KEY", &mut self.drive.api_key),
            ("DRIVEINDEX_ROOT_FOLDER", &mut self.drive.root_folder),
        ];
        for (name, target) in overrides {
            if let Ok(value) = std::env::var(name) {
                if !value.is_empty() {
                    *target = value;
                }
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - the codec secret is not set
    /// - the root folder is not set
    /// - neither an access token nor an API key is set
    /// - `items_per_page` is outside 1..=1000
    /// - `api_base` is not a valid URL
    pub fn validate(&self) -> Result<()> {
        if self.codec.secret.is_empty() {
            return Err(IndexError::Validation(
                "codec.secret is not set. \
                 Set it in config.toml or via DRIVEINDEX_CODEC_SECRET environment variable."
                    .to_string(),
            ));
        }
        if self.drive.root_folder.is_empty() {
            return Err(IndexError::Validation(
                "drive.root_folder is not set.".to_string(),
            ));
        }
        if self.drive.access_token.is_empty() && self.drive.api_key.is_empty() {
            return Err(IndexError::Validation(
                "either drive.access_token or drive.api_key must be set.".to_string(),
            ));
        }
        if self.files.items_per_page == 0 || self.files.items_per_page > MAX_PAGE_SIZE {
            return Err(IndexError::Validation(format!(
                "files.items_per_page must be between 1 and {MAX_PAGE_SIZE}."
            )));
        }
        url::Url::parse(&self.drive.api_base)
            .map_err(|e| IndexError::Validation(format!("drive.api_base is invalid: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.codec.secret = "secret".to_string();
        config.drive.root_folder = "root-folder".to_string();
        config.drive.access_token = "token".to_string();
        config
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert!(config.server.base_path.is_empty());
        assert!(config.server.cors_origins.is_empty());

        assert_eq!(config.drive.api_base, "https://www.googleapis.com/drive/v3");
        assert!(config.drive.access_token.is_empty());
        assert!(config.drive.root_folder.is_empty());
        assert_eq!(config.drive.connect_timeout_secs, 10);
        assert_eq!(config.drive.total_timeout_secs, 30);

        assert_eq!(config.files.items_per_page, 50);
        assert_eq!(config.files.max_file_size, 4 * 1024 * 1024);
        assert_eq!(config.files.readme, "README.md");
        assert_eq!(config.files.banner, "banner");
        assert_eq!(config.files.hidden_files, vec![".password", ".hidden"]);
        assert!(config.files.fields.contains("webContentLink"));

        assert!(config.codec.secret.is_empty());

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/driveindex.log");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080
base_path = "/drive"
cors_origins = ["http://localhost:3000"]

[drive]
api_base = "http://127.0.0.1:9000/drive/v3"
access_token = "ya29.token"
root_folder = "0AbCdEf"
connect_timeout_secs = 5
total_timeout_secs = 15

[files]
fields = "id,name,mimeType"
order_by = "name"
items_per_page = 100
max_file_size = 1048576
readme = "index.md"
banner = "cover"
hidden_files = ["_", "."]
cache_control = "no-cache"

[codec]
secret = "s3cret"

[logging]
level = "debug"
file = "custom/logs/app.log"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.base_path, "/drive");
        assert_eq!(config.server.cors_origins, vec!["http://localhost:3000"]);

        assert_eq!(config.drive.api_base, "http://127.0.0.1:9000/drive/v3");
        assert_eq!(config.drive.access_token, "ya29.token");
        assert_eq!(config.drive.root_folder, "0AbCdEf");
        assert_eq!(config.drive.connect_timeout_secs, 5);
        assert_eq!(config.drive.total_timeout_secs, 15);

        assert_eq!(config.files.fields, "id,name,mimeType");
        assert_eq!(config.files.order_by, "name");
        assert_eq!(config.files.items_per_page, 100);
        assert_eq!(config.files.max_file_size, 1048576);
        assert_eq!(config.files.readme, "index.md");
        assert_eq!(config.files.banner, "cover");
        assert_eq!(config.files.hidden_files, vec!["_", "."]);
        assert_eq!(config.files.cache_control, "no-cache");

        assert_eq!(config.codec.secret, "s3cret");

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/app.log");

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[drive]
root_folder = "folder-1"

[files]
readme = "README.txt"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.drive.root_folder, "folder-1");
        assert_eq!(config.files.readme, "README.txt");

        // Default values
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.files.banner, "banner");
        assert_eq!(config.files.items_per_page, 50);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.drive.api_base, "https://www.googleapis.com/drive/v3");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        assert!(result.is_err());
        if let Err(IndexError::Validation(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Validation error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");
        assert!(matches!(result, Err(IndexError::Io(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[drive]\nroot_folder = \"from-file\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.drive.root_folder, "from-file");
    }

    #[test]
    fn test_example_config_parses() {
        let config = Config::parse(include_str!("../config.example.toml")).unwrap();
        let defaults = Config::default();

        assert_eq!(config.files.fields, defaults.files.fields);
        assert_eq!(config.files.order_by, defaults.files.order_by);
        assert_eq!(config.files.max_file_size, defaults.files.max_file_size);
        assert_eq!(config.files.hidden_files, defaults.files.hidden_files);
        assert_eq!(config.files.cache_control, defaults.files.cache_control);
        assert_eq!(config.logging.file, defaults.logging.file);
    }

    #[test]
    fn test_apply_env_overrides() {
        let original = std::env::var("DRIVEINDEX_CODEC_SECRET").ok();

        std::env::set_var("DRIVEINDEX_CODEC_SECRET", "env-secret");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.codec.secret, "env-secret");

        std::env::set_var("DRIVEINDEX_CODEC_SECRET", "");
        let mut config = Config::default();
        config.codec.secret = "original-secret".to_string();
        config.apply_env_overrides();
        assert_eq!(config.codec.secret, "original-secret");

        if let Some(val) = original {
            std::env::set_var("DRIVEINDEX_CODEC_SECRET", val);
        } else {
            std::env::remove_var("DRIVEINDEX_CODEC_SECRET");
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validate_missing_secret() {
        let mut config = valid_config();
        config.codec.secret.clear();
        let result = config.validate();
        if let Err(IndexError::Validation(msg)) = result {
            assert!(msg.contains("codec.secret"));
        } else {
            panic!("Expected Validation error");
        }
    }

    #[test]
    fn test_validate_missing_root_folder() {
        let mut config = valid_config();
        config.drive.root_folder.clear();
        assert!(matches!(config.validate(), Err(IndexError::Validation(_))));
    }

    #[test]
    fn test_validate_missing_credentials() {
        let mut config = valid_config();
        config.drive.access_token.clear();
        assert!(config.validate().is_err());

        config.drive.api_key = "key".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_page_size_bounds() {
        let mut config = valid_config();
        config.files.items_per_page = 0;
        assert!(config.validate().is_err());

        config.files.items_per_page = 1001;
        assert!(config.validate().is_err());

        config.files.items_per_page = 1000;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_api_base() {
        let mut config = valid_config();
        config.drive.api_base = "::not a url::".to_string();
        assert!(config.validate().is_err());
    }
}
