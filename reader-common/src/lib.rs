mod error;
pub use error::Error;

pub mod helper;
pub mod youdao_sign;
