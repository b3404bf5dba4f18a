//! 生词本：单词的翻译缓存以及学习状态

mod error;
pub use error::Error;

mod service;
pub use service::{VocabularyService, normalize_word, resolve_display_translation};

mod store;
pub use store::VocabularyStore;

mod types_rs;
pub use types_rs::*;
