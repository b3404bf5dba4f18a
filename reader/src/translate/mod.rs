//! 有道文本翻译

use crate::credentials::Credentials;
use bon::bon;
use reader_common::youdao_sign::{Clock, RandomSalt, SaltSource, SystemClock};
use std::sync::Arc;

mod error;
pub use error::Error;

mod trans;
pub use trans::render_translation;
mod types_rs;
pub use types_rs::*;

pub const DEFAULT_ENDPOINT: &str = "https://openapi.youdao.com/api";
pub const SOURCE_LANGUAGE: &str = "en";
pub const TARGET_LANGUAGE: &str = "zh-CHS";

/// 未配置有道密钥时返回的提示
pub const NOT_CONFIGURED_NOTICE: &str = "请先设置有道翻译API密钥";

/// 把一个单词翻译为可以直接展示的文本
#[async_trait::async_trait]
pub trait WordTranslator: Send + Sync {
    async fn translate_word(&self, word: &str) -> Result<String, Error>;
}

pub struct Client {
    credentials: Credentials,
    endpoint: String,
    http_client: reqwest::Client,
    salt_source: Arc<dyn SaltSource>,
    clock: Arc<dyn Clock>,
}

#[bon]
impl Client {
    #[builder(on(String, into))]
    pub fn new(
        credentials: Credentials,
        #[builder(default = DEFAULT_ENDPOINT.to_owned())] endpoint: String,
        #[builder(default = Arc::new(RandomSalt) as Arc<dyn SaltSource>)]
        salt_source: Arc<dyn SaltSource>,
        #[builder(default = Arc::new(SystemClock) as Arc<dyn Clock>)]
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            credentials,
            endpoint,
            http_client: reqwest::Client::new(),
            salt_source,
            clock,
        }
    }
}
