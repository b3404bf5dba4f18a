use crate::Error;
use md5::{Digest, Md5};
use time::OffsetDateTime;

/// 当前的Unix时间戳，单位秒
pub fn unix_timestamp() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

/// 小写十六进制的MD5摘要
pub fn md5_hex(bytes: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[test]
fn md5_hex_test() {
    assert_eq!(md5_hex(b""), "d41d8cd98f00b204e9800998ecf8427e");
    assert_eq!(md5_hex(b"khello421000s"), "555a1c0261b743bdf9a5ba9f4eda5578");
}

pub async fn into_request_failed_error(resp: reqwest::Response) -> Error {
    let status = resp.status();
    let body = resp.text().await;
    match body {
        Ok(message) => Error::RequestAPIFailed {
            status: status.to_string(),
            message,
        },
        Err(e) => Error::Reqwest(e),
    }
}

/// 非2xx状态码时返回`RequestAPIFailed`，否则返回body原文
pub async fn read_success_text(resp: reqwest::Response) -> Result<String, Error> {
    let status = resp.status();

    if !status.is_success() {
        return Err(into_request_failed_error(resp).await);
    }

    Ok(resp.text().await?)
}
