use reader::credentials::Credentials;
use reader::translate::*;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct YoudaoConfig {
    pub app_key: String,
    pub app_secret: String,
}

impl YoudaoConfig {
    pub fn get_conf() -> Self {
        let file_str = std::fs::read_to_string("tests/translate/config.toml").unwrap();
        toml::from_str(&file_str).unwrap()
    }
}

fn get_trans_client() -> Client {
    let conf = YoudaoConfig::get_conf();
    Client::builder()
        .credentials(Credentials::new(conf.app_key, conf.app_secret))
        .build()
}

#[tokio::test]
#[ignore]
async fn query_test() {
    let client = get_trans_client();
    let res = client.query("hello").await;

    match res {
        Ok(s) => println!("[success] res:\n{:#?}", s),
        Err(e) => println!("[error] {:#?}", e),
    }
}

#[tokio::test]
#[ignore]
async fn translate_word_test() {
    let client = get_trans_client();
    let res = client.translate_word("example").await;

    match res {
        Ok(s) => println!("[success] res:\n{}", s),
        Err(e) => println!("[error] {:#?}", e),
    }
}

#[tokio::test]
async fn placeholder_credentials_test() {
    let client = Client::builder()
        .credentials(Credentials::new("your-app-key", "your-app-secret"))
        .endpoint("http://127.0.0.1:9/api")
        .build();

    let res = client.translate_word("example").await.unwrap();
    assert_eq!(res, NOT_CONFIGURED_NOTICE);
    assert_eq!(res, "请先设置有道翻译API密钥");
}
