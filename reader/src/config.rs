//! 启动时从JSON文件加载的配置
//!
//! ```json
//! {
//!   "YoudaoAppKey": "your-app-key",
//!   "YoudaoAppSecret": "your-app-secret",
//!   "ListenAddr": "0.0.0.0:8080",
//!   "UploadDir": "uploads",
//!   "AllowedOrigins": ["http://localhost:3000", "http://localhost:3001"]
//! }
//! ```
//! 只有`YoudaoAppKey`和`YoudaoAppSecret`是必填的。

use crate::credentials::Credentials;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
/// 设置后从这个路径读取配置文件
pub const CONFIG_PATH_ENV: &str = "READER_CONFIG";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("read config file {path:?} failed: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse config file {path:?} failed: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    pub youdao_app_key: String,
    pub youdao_app_secret: String,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_owned()
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_owned(),
        "http://localhost:3001".to_owned(),
    ]
}

impl Config {
    /// `READER_CONFIG`指定的路径，没有设置时为当前目录下的`config.json`
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading config");

        let file_str = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::from_json(&file_str).map_err(|source| Error::Parse {
            path: path.to_owned(),
            source,
        })?;

        if config.credentials().is_placeholder() {
            warn!("youdao api credentials are not set, please update the config file");
        } else {
            info!("youdao api credentials loaded");
        }
        Ok(config)
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.youdao_app_key, &self.youdao_app_secret)
    }
}

#[test]
fn minimal_config_test() {
    let config =
        Config::from_json(r#"{"YoudaoAppKey": "k", "YoudaoAppSecret": "s"}"#).unwrap();
    assert_eq!(config.youdao_app_key, "k");
    assert_eq!(config.youdao_app_secret, "s");
    assert_eq!(config.listen_addr, "0.0.0.0:8080");
    assert_eq!(config.upload_dir, PathBuf::from("uploads"));
    assert_eq!(
        config.allowed_origins,
        ["http://localhost:3000", "http://localhost:3001"]
    );
    assert!(!config.credentials().is_placeholder());
}

#[test]
fn full_config_test() {
    let config = Config::from_json(
        r#"{
            "YoudaoAppKey": "your-app-key",
            "YoudaoAppSecret": "your-app-secret",
            "ListenAddr": "127.0.0.1:9000",
            "UploadDir": "/tmp/books",
            "AllowedOrigins": ["https://reader.example.com"]
        }"#,
    )
    .unwrap();
    assert_eq!(config.listen_addr, "127.0.0.1:9000");
    assert_eq!(config.upload_dir, PathBuf::from("/tmp/books"));
    assert_eq!(config.allowed_origins, ["https://reader.example.com"]);
    assert!(config.credentials().is_placeholder());
}

#[test]
fn missing_credentials_test() {
    assert!(Config::from_json(r#"{"YoudaoAppKey": "k"}"#).is_err());
}

#[test]
fn load_errors_test() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.json");
    assert!(matches!(Config::load(&missing), Err(Error::Io { .. })));

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{not json").unwrap();
    assert!(matches!(Config::load(&broken), Err(Error::Parse { .. })));

    let good = dir.path().join("config.json");
    std::fs::write(&good, r#"{"YoudaoAppKey": "k", "YoudaoAppSecret": "s"}"#).unwrap();
    assert_eq!(Config::load(&good).unwrap().youdao_app_key, "k");
}
