use crate::helper::{md5_hex, unix_timestamp};
use rand::Rng;
use serde::Serialize;
use std::borrow::Cow;

// 有道智云签名文档：https://ai.youdao.com/DOCSIRMA/html/trans/api/wbfy/index.html
// sign = md5(appKey + input + salt + curtime + appSecret)

pub const SIGN_TYPE: &str = "v3";

/// 签名中使用的salt
pub trait SaltSource: Send + Sync {
    fn salt(&self) -> String;
}

/// 签名中使用的curtime，Unix时间戳(秒)
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// 0~9999的随机整数
pub struct RandomSalt;

impl SaltSource for RandomSalt {
    fn salt(&self) -> String {
        rand::rng().random_range(0..10_000u32).to_string()
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        unix_timestamp()
    }
}

/// 固定的salt，测试时使用
pub struct FixedSalt(pub String);

impl SaltSource for FixedSalt {
    fn salt(&self) -> String {
        self.0.clone()
    }
}

/// 固定的时间，测试时使用
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

pub struct SignParams<'a> {
    pub app_key: &'a str,
    pub app_secret: &'a str,
    pub q: &'a str,
    pub from: &'a str,
    pub to: &'a str,
}

/// 以form表单发送给有道的参数，字段名和文档一致
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignedForm<'a> {
    pub q: &'a str,
    pub from: &'a str,
    pub to: &'a str,
    pub app_key: &'a str,
    pub salt: String,
    pub sign: String,
    pub sign_type: &'static str,
    pub curtime: String,
}

/// 签名中的input
///
/// q的字节长度<=20时为q本身，否则为 前10个字节 + 字节长度 + 后10个字节
pub fn truncate(q: &[u8]) -> Cow<'_, [u8]> {
    let len = q.len();
    if len <= 20 {
        return Cow::Borrowed(q);
    }

    let len_str = len.to_string();
    let mut input = Vec::with_capacity(20 + len_str.len());
    input.extend_from_slice(&q[..10]);
    input.extend_from_slice(len_str.as_bytes());
    input.extend_from_slice(&q[len - 10..]);
    Cow::Owned(input)
}

// 按字节拼接，多字节字符被截断时也不会panic
pub fn sign(app_key: &str, app_secret: &str, q: &str, salt: &str, curtime: &str) -> String {
    let input = truncate(q.as_bytes());

    let mut sign_input = Vec::with_capacity(
        app_key.len() + input.len() + salt.len() + curtime.len() + app_secret.len(),
    );
    sign_input.extend_from_slice(app_key.as_bytes());
    sign_input.extend_from_slice(&input);
    sign_input.extend_from_slice(salt.as_bytes());
    sign_input.extend_from_slice(curtime.as_bytes());
    sign_input.extend_from_slice(app_secret.as_bytes());

    md5_hex(&sign_input)
}

// 签名入口
pub fn build_signed_form<'a>(
    params: SignParams<'a>,
    salt_source: &dyn SaltSource,
    clock: &dyn Clock,
) -> SignedForm<'a> {
    let salt = salt_source.salt();
    let curtime = clock.now().to_string();
    let sign = sign(params.app_key, params.app_secret, params.q, &salt, &curtime);

    SignedForm {
        q: params.q,
        from: params.from,
        to: params.to,
        app_key: params.app_key,
        salt,
        sign,
        sign_type: SIGN_TYPE,
        curtime,
    }
}

#[test]
fn truncate_boundary_test() {
    let twenty = "abcdefghijklmnopqrst";
    assert_eq!(truncate(twenty.as_bytes()).as_ref(), twenty.as_bytes());

    let twenty_one = "abcdefghijklmnopqrstu";
    assert_eq!(
        truncate(twenty_one.as_bytes()).as_ref(),
        b"abcdefghij21lmnopqrstu"
    );
}

#[test]
fn truncate_counts_bytes_test() {
    // 8个"é"是16个字节，加上5个ascii字符共21个字节
    let q = "héééééééé1234";
    assert_eq!(q.len(), 21);
    let input = truncate(q.as_bytes());
    assert_eq!(input.len(), 10 + 2 + 10);
    assert_eq!(&input[10..12], b"21");
}

#[test]
fn sign_test() {
    assert_eq!(
        sign("k", "s", "hello", "42", "1000"),
        md5_hex(b"khello421000s")
    );
    assert_eq!(
        sign("k", "s", "hello", "42", "1000"),
        "555a1c0261b743bdf9a5ba9f4eda5578"
    );
    assert_eq!(
        sign("k", "s", "abcdefghijklmnopqrst", "42", "1000"),
        "aca7795cc7f59a9661add4d585f10b9c"
    );
    assert_eq!(
        sign("k", "s", "abcdefghijklmnopqrstu", "42", "1000"),
        "e16bbe653e25349390a8af323e9825cf"
    );
}

#[test]
fn sign_with_multibyte_word_test() {
    // 截断点落在多字节字符中间
    let s = sign("k", "s", "aaaaaaaaaéxxxxxxxxxxxxxxxx", "1", "2");
    assert_eq!(s.len(), 32);
}

#[test]
fn build_signed_form_test() {
    let params = SignParams {
        app_key: "k",
        app_secret: "s",
        q: "hello",
        from: "en",
        to: "zh-CHS",
    };
    let form = build_signed_form(params, &FixedSalt("42".to_owned()), &FixedClock(1000));

    assert_eq!(
        form,
        SignedForm {
            q: "hello",
            from: "en",
            to: "zh-CHS",
            app_key: "k",
            salt: "42".to_owned(),
            sign: "555a1c0261b743bdf9a5ba9f4eda5578".to_owned(),
            sign_type: "v3",
            curtime: "1000".to_owned(),
        }
    );
}

#[test]
fn random_salt_range_test() {
    for _ in 0..200 {
        let salt: u32 = RandomSalt.salt().parse().unwrap();
        assert!(salt < 10_000);
    }
}
