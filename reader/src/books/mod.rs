//! 上传的书籍，元数据只保存在内存中

mod error;
pub use error::Error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::info;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub path: String,
}

pub struct BookStore {
    dir: PathBuf,
    books: RwLock<Vec<Book>>,
}

impl BookStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            books: RwLock::new(Vec::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 创建存放上传文件的目录
    pub async fn init(&self) -> Result<(), Error> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// 保存上传的文件并登记为一本书
    ///
    /// 只使用文件名的最后一段，同名文件直接覆盖，但会登记为新的书
    pub async fn store_uploaded_file(&self, name: &str, bytes: &[u8]) -> Result<Book, Error> {
        let file_name = Path::new(name)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::InvalidFileName(name.to_owned()))?;

        let path = self.dir.join(file_name);
        tokio::fs::write(&path, bytes).await?;

        let title = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name)
            .to_owned();

        // id按登记顺序递增，在写锁内分配
        let mut books = self.books.write().await;
        let book = Book {
            id: (books.len() + 1).to_string(),
            title,
            path: path.to_string_lossy().into_owned(),
        };
        books.push(book.clone());

        info!(id = %book.id, title = %book.title, "book uploaded");
        Ok(book)
    }

    /// 按上传顺序
    pub async fn list_books(&self) -> Vec<Book> {
        self.books.read().await.clone()
    }

    /// 返回书的信息和文件内容，非UTF-8的字节会被替换
    pub async fn get_book(&self, id: &str) -> Result<(Book, String), Error> {
        let book = self
            .books
            .read()
            .await
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_owned()))?;

        let bytes = tokio::fs::read(&book.path).await?;
        let content = String::from_utf8_lossy(&bytes).into_owned();
        info!(id = %book.id, title = %book.title, "fetched book");
        Ok((book, content))
    }
}

#[tokio::test]
async fn store_and_get_book_test() {
    let dir = tempfile::tempdir().unwrap();
    let store = BookStore::new(dir.path().join("uploads"));
    store.init().await.unwrap();

    let book = store
        .store_uploaded_file("Pride and Prejudice.txt", b"It is a truth")
        .await
        .unwrap();
    assert_eq!(book.id, "1");
    assert_eq!(book.title, "Pride and Prejudice");
    assert!(Path::new(&book.path).ends_with("uploads/Pride and Prejudice.txt"));

    let (fetched, content) = store.get_book("1").await.unwrap();
    assert_eq!(fetched, book);
    assert_eq!(content, "It is a truth");
}

#[tokio::test]
async fn sequential_ids_test() {
    let dir = tempfile::tempdir().unwrap();
    let store = BookStore::new(dir.path());

    let a = store.store_uploaded_file("a.txt", b"a").await.unwrap();
    let b = store.store_uploaded_file("b.tar.gz", b"b").await.unwrap();
    // 同名文件会覆盖内容，但登记为新书
    let c = store.store_uploaded_file("a.txt", b"c").await.unwrap();

    assert_eq!((a.id.as_str(), b.id.as_str(), c.id.as_str()), ("1", "2", "3"));
    assert_eq!(b.title, "b.tar");
    assert_eq!(store.list_books().await, vec![a, b, c]);
    assert_eq!(store.get_book("1").await.unwrap().1, "c");
}

#[tokio::test]
async fn strips_directories_from_name_test() {
    let dir = tempfile::tempdir().unwrap();
    let store = BookStore::new(dir.path().join("uploads"));
    store.init().await.unwrap();

    let book = store
        .store_uploaded_file("../../escape.txt", b"x")
        .await
        .unwrap();
    assert_eq!(book.title, "escape");
    assert!(dir.path().join("uploads/escape.txt").exists());
    assert!(!dir.path().join("escape.txt").exists());

    let err = store.store_uploaded_file("..", b"x").await.unwrap_err();
    assert!(matches!(err, Error::InvalidFileName(_)));
    let err = store.store_uploaded_file("", b"x").await.unwrap_err();
    assert!(matches!(err, Error::InvalidFileName(_)));
}

#[tokio::test]
async fn missing_book_test() {
    let dir = tempfile::tempdir().unwrap();
    let store = BookStore::new(dir.path());
    let err = store.get_book("7").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(id) if id == "7"));
}

#[tokio::test]
async fn lossy_content_test() {
    let dir = tempfile::tempdir().unwrap();
    let store = BookStore::new(dir.path());
    store
        .store_uploaded_file("bin.txt", &[b'o', b'k', 0xff])
        .await
        .unwrap();
    let (_, content) = store.get_book("1").await.unwrap();
    assert_eq!(content, "ok\u{fffd}");
}
