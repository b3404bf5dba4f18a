#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("book not found: {0}")]
    NotFound(String),
    #[error("invalid file name: {0:?}")]
    InvalidFileName(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
