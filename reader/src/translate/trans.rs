use super::{
    Client, Error, NOT_CONFIGURED_NOTICE, QueryResponse, SOURCE_LANGUAGE, TARGET_LANGUAGE,
    WordTranslator,
};
use reader_common::helper::read_success_text;
use reader_common::youdao_sign::{SignParams, SignedForm, build_signed_form};
use tracing::{debug, info, warn};

impl Client {
    /// 生成带签名的表单参数，每次调用都会重新取salt和curtime
    pub fn signed_form<'a>(&'a self, word: &'a str) -> SignedForm<'a> {
        let params = SignParams {
            app_key: &self.credentials.app_key,
            app_secret: &self.credentials.app_secret,
            q: word,
            from: SOURCE_LANGUAGE,
            to: TARGET_LANGUAGE,
        };
        build_signed_form(params, self.salt_source.as_ref(), self.clock.as_ref())
    }

    /// > <a href="https://ai.youdao.com/DOCSIRMA/html/trans/api/wbfy/index.html" target="_blank">api文档地址</a>
    ///
    /// 注意事项:
    /// 1. 只请求一次，失败不重试
    /// 2. `errorCode`不为"0"时返回`Error::Provider`
    pub async fn query(&self, word: &str) -> Result<QueryResponse, Error> {
        let form = self.signed_form(word);
        info!(
            word,
            salt = %form.salt,
            curtime = %form.curtime,
            sign = %form.sign,
            "youdao request"
        );

        let resp = self
            .http_client
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await?;
        let text = read_success_text(resp).await?;
        debug!(body = %text, "youdao raw response");

        let res = serde_json::from_str::<QueryResponse>(&text)?;
        if res.error_code != "0" {
            return Err(Error::Provider(res.error_code));
        }
        Ok(res)
    }
}

#[async_trait::async_trait]
impl WordTranslator for Client {
    async fn translate_word(&self, word: &str) -> Result<String, Error> {
        if self.credentials.is_placeholder() {
            warn!(word, "youdao credentials are not configured, skip request");
            return Ok(NOT_CONFIGURED_NOTICE.to_owned());
        }

        let res = self.query(word).await?;
        Ok(render_translation(&res))
    }
}

/// 把有道的返回拼成展示用的文本
///
/// ```text
/// 翻译1, 翻译2
/// 解释: 释义1, 释义2
/// 网络释义:
/// - key: v1, v2
/// ```
pub fn render_translation(res: &QueryResponse) -> String {
    let mut out = String::new();

    if let Some(translation) = res.translation.as_deref() {
        out.push_str(&translation.join(", "));
    }

    let explains = res
        .basic
        .as_ref()
        .and_then(|b| b.explains.as_deref())
        .unwrap_or_default();
    if !explains.is_empty() {
        out.push_str("\n解释: ");
        out.push_str(&explains.join(", "));
    }

    let web = res.web.as_deref().unwrap_or_default();
    if !web.is_empty() {
        out.push_str("\n网络释义:\n");
        for item in web {
            out.push_str(&format!("- {}: {}\n", item.key, item.value.join(", ")));
        }
    }

    out
}

#[cfg(test)]
fn test_client(credentials: crate::credentials::Credentials) -> Client {
    use reader_common::youdao_sign::{FixedClock, FixedSalt};
    use std::sync::Arc;

    Client::builder()
        .credentials(credentials)
        // 测试中不应该有请求能连上这个地址
        .endpoint("http://127.0.0.1:9/api")
        .salt_source(Arc::new(FixedSalt("42".to_owned())))
        .clock(Arc::new(FixedClock(1000)))
        .build()
}

#[test]
fn render_full_response_test() {
    let json = r#"{
        "errorCode": "0",
        "query": "good",
        "translation": ["好"],
        "basic": {"explains": ["adj. 好的", "n. 好处"]},
        "web": [
            {"key": "good", "value": ["好", "善"]},
            {"key": "Good Friday", "value": ["耶稣受难日"]}
        ]
    }"#;
    let res: QueryResponse = serde_json::from_str(json).unwrap();

    assert_eq!(
        render_translation(&res),
        "好\n解释: adj. 好的, n. 好处\n网络释义:\n- good: 好, 善\n- Good Friday: 耶稣受难日\n"
    );
}

#[test]
fn render_translation_only_test() {
    let json = r#"{"errorCode": "0", "translation": ["你好", "哈喽"]}"#;
    let res: QueryResponse = serde_json::from_str(json).unwrap();
    assert_eq!(render_translation(&res), "你好, 哈喽");
}

#[test]
fn render_skips_empty_sections_test() {
    let json = r#"{"errorCode": "0", "translation": [], "basic": {"explains": []}, "web": []}"#;
    let res: QueryResponse = serde_json::from_str(json).unwrap();
    assert_eq!(render_translation(&res), "");

    let json = r#"{"errorCode": "0", "basic": {}, "web": [{"key": "x", "value": []}]}"#;
    let res: QueryResponse = serde_json::from_str(json).unwrap();
    assert_eq!(render_translation(&res), "\n网络释义:\n- x: \n");
}

#[test]
fn signed_form_test() {
    use crate::credentials::Credentials;

    let client = test_client(Credentials::new("k", "s"));
    let form = client.signed_form("hello");

    assert_eq!(form.q, "hello");
    assert_eq!(form.from, "en");
    assert_eq!(form.to, "zh-CHS");
    assert_eq!(form.app_key, "k");
    assert_eq!(form.salt, "42");
    assert_eq!(form.curtime, "1000");
    assert_eq!(form.sign_type, "v3");
    assert_eq!(form.sign, reader_common::helper::md5_hex(b"khello421000s"));
}

#[tokio::test]
async fn placeholder_credentials_skip_request_test() {
    use crate::credentials::{Credentials, PLACEHOLDER_APP_KEY, PLACEHOLDER_APP_SECRET};

    let client = test_client(Credentials::new(
        PLACEHOLDER_APP_KEY,
        PLACEHOLDER_APP_SECRET,
    ));
    let res = client.translate_word("example").await.unwrap();
    assert_eq!(res, NOT_CONFIGURED_NOTICE);
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error_test() {
    use crate::credentials::Credentials;

    let client = test_client(Credentials::new("k", "s"));
    let err = client.translate_word("hello").await.unwrap_err();
    assert!(matches!(err, Error::Reqwest(_)), "unexpected error: {err}");
}
