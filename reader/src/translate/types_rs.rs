use serde::Deserialize;

// region    --- query
/// 有道文本翻译接口的返回
///
/// 只解析用到的字段，`errorCode`为"0"时表示成功
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub error_code: String,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub translation: Option<Vec<String>>,
    #[serde(default)]
    pub basic: Option<Basic>,
    #[serde(default)]
    pub web: Option<Vec<WebEntry>>,
}

/// 词义
#[derive(Deserialize, Debug, Default)]
pub struct Basic {
    #[serde(default)]
    pub explains: Option<Vec<String>>,
}

/// 网络释义
#[derive(Deserialize, Debug)]
pub struct WebEntry {
    pub key: String,
    #[serde(default)]
    pub value: Vec<String>,
}
// endregion --- query
