//! Youdao application credentials.
//!
//! `config.json`里默认填写的是占位值，这时不会请求有道，翻译接口直接返回提示信息。

pub const PLACEHOLDER_APP_KEY: &str = "your-app-key";
pub const PLACEHOLDER_APP_SECRET: &str = "your-app-secret";

#[derive(Clone)]
pub struct Credentials {
    pub app_key: String,
    pub app_secret: String,
}

impl Credentials {
    pub fn new(app_key: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            app_secret: app_secret.into(),
        }
    }

    /// 任意一项还是占位值即视为未配置
    pub fn is_placeholder(&self) -> bool {
        self.app_key == PLACEHOLDER_APP_KEY || self.app_secret == PLACEHOLDER_APP_SECRET
    }
}

// app_secret不输出到日志
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("app_key", &self.app_key)
            .field("app_secret", &"***")
            .finish()
    }
}

#[test]
fn is_placeholder_test() {
    assert!(Credentials::new(PLACEHOLDER_APP_KEY, PLACEHOLDER_APP_SECRET).is_placeholder());
    assert!(Credentials::new("real-key", PLACEHOLDER_APP_SECRET).is_placeholder());
    assert!(Credentials::new(PLACEHOLDER_APP_KEY, "real-secret").is_placeholder());
    assert!(!Credentials::new("real-key", "real-secret").is_placeholder());
}

#[test]
fn debug_hides_secret_test() {
    let s = format!("{:?}", Credentials::new("k", "top-secret"));
    assert!(s.contains("\"k\""));
    assert!(!s.contains("top-secret"));
}
