#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid word: {0:?}")]
    InvalidWord(String),
    #[error("word text must not be empty")]
    EmptyText,
}
