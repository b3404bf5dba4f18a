use super::{Error, TranslateResult, VocabularyEntry, VocabularyStore};
use crate::translate::{self, WordTranslator};
use std::sync::Arc;
use tracing::{info, warn};

/// 去掉首尾的非ASCII字母数字字符，中间的标点保留
pub fn normalize_word(raw: &str) -> &str {
    raw.trim_matches(|c: char| !c.is_ascii_alphanumeric())
}

/// 请求成功用翻译结果，失败则用占位翻译`翻译: {word}`
pub fn resolve_display_translation(
    word: &str,
    fetched: Result<String, translate::Error>,
) -> String {
    match fetched {
        Ok(translation) => translation,
        Err(e) => {
            warn!(word, error = %e, "translate word failed, use placeholder");
            format!("翻译: {word}")
        }
    }
}

/// 生词本的对外操作：翻译、保存、列出单词
pub struct VocabularyService {
    store: Arc<VocabularyStore>,
    translator: Arc<dyn WordTranslator>,
}

impl VocabularyService {
    pub fn new(store: Arc<VocabularyStore>, translator: Arc<dyn WordTranslator>) -> Self {
        Self { store, translator }
    }

    /// 翻译一个单词
    ///
    /// 已有非空翻译时直接返回缓存，否则请求翻译并写回。
    /// 翻译失败不会返回错误，写入的是占位翻译。
    pub async fn translate(&self, raw_word: &str) -> Result<TranslateResult, Error> {
        let word = normalize_word(raw_word);
        if word.is_empty() {
            return Err(Error::InvalidWord(raw_word.to_owned()));
        }

        let entry = match self.store.get(word) {
            Some(entry) if !entry.translation.is_empty() => entry,
            _ => {
                // 请求期间不持有store的锁
                let fetched = self.attempt_fetch(word).await;
                let translation = resolve_display_translation(word, fetched);
                self.store.upsert_translation(word, translation)
            }
        };

        info!(word, "translated word");
        Ok(entry.into())
    }

    pub async fn attempt_fetch(&self, word: &str) -> Result<String, translate::Error> {
        self.translator.translate_word(word).await
    }

    pub fn save(&self, entry: VocabularyEntry) -> Result<VocabularyEntry, Error> {
        if entry.text.is_empty() {
            return Err(Error::EmptyText);
        }

        let saved = self.store.save(entry);
        info!(word = %saved.text, status = ?saved.status, "saved word");
        Ok(saved)
    }

    pub fn list_words(&self) -> Vec<VocabularyEntry> {
        self.store.list_all()
    }
}
