use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum WordStatus {
    Familiar,
    #[default]
    Unfamiliar,
    Learning,
}

/// 生词本中的一个单词
///
/// `translation`为空表示还没有翻译过
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VocabularyEntry {
    pub text: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub status: WordStatus,
}

impl VocabularyEntry {
    pub fn new(text: impl Into<String>, translation: impl Into<String>, status: WordStatus) -> Self {
        Self {
            text: text.into(),
            translation: translation.into(),
            status,
        }
    }
}

/// 翻译接口的返回
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TranslateResult {
    pub word: String,
    pub translation: String,
    pub status: WordStatus,
}

impl From<VocabularyEntry> for TranslateResult {
    fn from(entry: VocabularyEntry) -> Self {
        Self {
            word: entry.text,
            translation: entry.translation,
            status: entry.status,
        }
    }
}

#[test]
fn entry_serde_test() {
    let entry = VocabularyEntry::new("run", "跑", WordStatus::Learning);
    let json = serde_json::to_string(&entry).unwrap();
    assert_eq!(json, r#"{"text":"run","translation":"跑","status":"learning"}"#);

    // 缺省的字段使用默认值
    let entry: VocabularyEntry = serde_json::from_str(r#"{"text":"run"}"#).unwrap();
    assert_eq!(entry, VocabularyEntry::new("run", "", WordStatus::Unfamiliar));

    assert!(serde_json::from_str::<VocabularyEntry>(r#"{"text":"run","status":"bogus"}"#).is_err());
}
