use super::{VocabularyEntry, WordStatus};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// 进程内的生词表，key是规范化之后的单词
///
/// 所有操作共用一把锁，锁内不做任何网络请求
#[derive(Default)]
pub struct VocabularyStore {
    words: Mutex<HashMap<String, VocabularyEntry>>,
}

impl VocabularyStore {
    pub fn new() -> Self {
        Self::default()
    }

    // 锁中毒说明之前有操作在临界区内panic，这里继续panic
    fn words(&self) -> MutexGuard<'_, HashMap<String, VocabularyEntry>> {
        self.words.lock().expect("vocabulary store lock poisoned")
    }

    pub fn get(&self, text: &str) -> Option<VocabularyEntry> {
        self.words().get(text).cloned()
    }

    /// 写入翻译；新单词的状态为`unfamiliar`，已有单词保留原来的状态
    pub fn upsert_translation(&self, text: &str, translation: String) -> VocabularyEntry {
        let mut words = self.words();
        let entry = words
            .entry(text.to_owned())
            .or_insert_with(|| VocabularyEntry::new(text, "", WordStatus::Unfamiliar));
        entry.translation = translation;
        entry.clone()
    }

    /// 保存调用方传入的单词
    ///
    /// 已存在时沿用库里的`translation`，调用方不能把已有的翻译清空
    pub fn save(&self, mut entry: VocabularyEntry) -> VocabularyEntry {
        let mut words = self.words();
        if let Some(existing) = words.get(&entry.text) {
            entry.translation = existing.translation.clone();
        }
        words.insert(entry.text.clone(), entry.clone());
        entry
    }

    /// 无序快照
    pub fn list_all(&self) -> Vec<VocabularyEntry> {
        self.words().values().cloned().collect()
    }
}

#[test]
fn get_missing_test() {
    let store = VocabularyStore::new();
    assert_eq!(store.get("nothing"), None);
}

#[test]
fn upsert_translation_test() {
    let store = VocabularyStore::new();

    let entry = store.upsert_translation("run", "跑".to_owned());
    assert_eq!(entry, VocabularyEntry::new("run", "跑", WordStatus::Unfamiliar));

    store.save(VocabularyEntry::new("run", "", WordStatus::Learning));
    let entry = store.upsert_translation("run", "奔跑".to_owned());
    assert_eq!(entry, VocabularyEntry::new("run", "奔跑", WordStatus::Learning));
    assert_eq!(store.get("run"), Some(entry));
}

#[test]
fn save_keeps_existing_translation_test() {
    let store = VocabularyStore::new();
    store.upsert_translation("run", "跑".to_owned());

    let saved = store.save(VocabularyEntry::new("run", "", WordStatus::Familiar));
    assert_eq!(saved, VocabularyEntry::new("run", "跑", WordStatus::Familiar));

    // 传入的翻译同样会被已有的覆盖
    let saved = store.save(VocabularyEntry::new("run", "别的", WordStatus::Learning));
    assert_eq!(saved.translation, "跑");
    assert_eq!(store.get("run").unwrap().status, WordStatus::Learning);
}

#[test]
fn save_new_entry_test() {
    let store = VocabularyStore::new();
    let saved = store.save(VocabularyEntry::new("walk", "走", WordStatus::Learning));
    assert_eq!(saved, VocabularyEntry::new("walk", "走", WordStatus::Learning));
    assert_eq!(store.list_all(), vec![saved]);
}

#[test]
fn one_entry_per_text_test() {
    let store = VocabularyStore::new();
    store.upsert_translation("a", "1".to_owned());
    store.save(VocabularyEntry::new("a", "", WordStatus::Familiar));
    store.upsert_translation("a", "2".to_owned());
    store.save(VocabularyEntry::new("b", "", WordStatus::Unfamiliar));

    let mut texts: Vec<_> = store.list_all().into_iter().map(|e| e.text).collect();
    texts.sort();
    assert_eq!(texts, ["a", "b"]);
}

#[test]
fn concurrent_updates_are_not_lost_test() {
    use std::sync::Arc;

    let store = Arc::new(VocabularyStore::new());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            std::thread::spawn(move || {
                for j in 0..100 {
                    let text = format!("w{}", j % 10);
                    if i % 2 == 0 {
                        store.upsert_translation(&text, format!("t{j}"));
                    } else {
                        store.save(VocabularyEntry::new(text, "", WordStatus::Learning));
                    }
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let all = store.list_all();
    assert_eq!(all.len(), 10);
    // save只改状态，upsert写入的翻译不会丢
    assert!(all.iter().all(|e| !e.translation.is_empty()));
}
