#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("youdao api returned error code: {0}")]
    Provider(String),
    #[error("request api failed: {status}, message: {message}")]
    RequestAPIFailed { status: String, message: String },
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("decode youdao response failed: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reader_common::Error> for Error {
    fn from(e: reader_common::Error) -> Self {
        match e {
            reader_common::Error::RequestAPIFailed { status, message } => {
                Error::RequestAPIFailed { status, message }
            }
            reader_common::Error::Reqwest(e) => Error::Reqwest(e),
        }
    }
}
