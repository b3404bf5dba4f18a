#![cfg(feature = "server")]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use reader::books::BookStore;
use reader::server::{AppState, router};
use reader::translate::{self, WordTranslator};
use reader::vocabulary::{VocabularyService, VocabularyStore};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt;

/// "fail"开头的单词返回错误，其它返回固定格式的翻译
struct StubTranslator {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl WordTranslator for StubTranslator {
    async fn translate_word(&self, word: &str) -> Result<String, translate::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if word.starts_with("fail") {
            return Err(translate::Error::Provider("411".to_owned()));
        }
        Ok(format!("译: {word}"))
    }
}

struct TestApp {
    app: Router,
    translator: Arc<StubTranslator>,
    _dir: tempfile::TempDir,
}

impl TestApp {
    async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let translator = Arc::new(StubTranslator {
            calls: AtomicUsize::new(0),
        });
        let books = BookStore::new(dir.path().join("uploads"));
        books.init().await.unwrap();

        let state = AppState {
            vocabulary: Arc::new(VocabularyService::new(
                Arc::new(VocabularyStore::new()),
                translator.clone(),
            )),
            books: Arc::new(books),
        };
        let app = router(state, &["http://localhost:3000".to_owned()]);

        Self {
            app,
            translator,
            _dir: dir,
        }
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let resp = self.app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn post_json(&self, uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
        let req = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap();
        self.send(req).await
    }

    async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn upload(&self, field: &str, file_name: &str, content: &str) -> (StatusCode, Vec<u8>) {
        let boundary = "X-READER-BOUNDARY";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             {content}\r\n\
             --{boundary}--\r\n"
        );
        let req = Request::post("/api/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(req).await
    }
}

fn json_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn translate_test() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post_json("/api/translate", r#"{"word": "\"Hello,\""}"#)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_body(&body),
        json!({"word": "Hello", "translation": "译: Hello", "status": "unfamiliar"})
    );

    // 第二次命中缓存
    let (status, body) = app.post_json("/api/translate", r#"{"word": "Hello"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["translation"], "译: Hello");
    assert_eq!(app.translator.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn translate_failure_placeholder_test() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post_json("/api/translate", r#"{"word": "fail42"}"#)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_body(&body),
        json!({"word": "fail42", "translation": "翻译: fail42", "status": "unfamiliar"})
    );

    let (_, body) = app.get("/api/words").await;
    assert_eq!(
        json_body(&body),
        json!([{"text": "fail42", "translation": "翻译: fail42", "status": "unfamiliar"}])
    );
}

#[tokio::test]
async fn translate_bad_request_test() {
    let app = TestApp::new().await;

    let (status, body) = app.post_json("/api/translate", r#"{"word": "?!"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, b"Invalid word");

    let (status, body) = app.post_json("/api/translate", "not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, b"Invalid request");

    let (status, _) = app.post_json("/api/translate", r#"{"text": "a"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(app.translator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn save_and_list_words_test() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post_json("/api/words", r#"{"text": "run", "translation": "", "status": "learning"}"#)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_body(&body),
        json!({"text": "run", "translation": "", "status": "learning"})
    );

    let (status, _) = app
        .post_json("/api/words", r#"{"text": "walk", "status": "familiar"}"#)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get("/api/words").await;
    assert_eq!(status, StatusCode::OK);
    let mut words: Vec<Value> = serde_json::from_slice(&body).unwrap();
    words.sort_by(|a, b| a["text"].as_str().cmp(&b["text"].as_str()));
    assert_eq!(
        words,
        vec![
            json!({"text": "run", "translation": "", "status": "learning"}),
            json!({"text": "walk", "translation": "", "status": "familiar"}),
        ]
    );
}

#[tokio::test]
async fn save_preserves_translation_test() {
    let app = TestApp::new().await;

    app.post_json("/api/translate", r#"{"word": "run"}"#).await;
    let (status, body) = app
        .post_json("/api/words", r#"{"text": "run", "translation": "", "status": "familiar"}"#)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_body(&body),
        json!({"text": "run", "translation": "译: run", "status": "familiar"})
    );

    let (_, body) = app.post_json("/api/translate", r#"{"word": "run"}"#).await;
    assert_eq!(json_body(&body)["status"], "familiar");
}

#[tokio::test]
async fn save_bad_request_test() {
    let app = TestApp::new().await;

    let (status, _) = app.post_json("/api/words", r#"{"text": ""}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post_json("/api/words", r#"{"text": "a", "status": "unknown"}"#)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app.get("/api/words").await;
    assert_eq!(json_body(&body), json!([]));
}

#[tokio::test]
async fn upload_and_read_book_test() {
    let app = TestApp::new().await;

    let (status, body) = app.upload("file", "Emma.txt", "Emma Woodhouse").await;
    assert_eq!(status, StatusCode::OK);
    let res = json_body(&body);
    assert_eq!(res["message"], "File uploaded successfully");
    assert_eq!(res["book"]["id"], "1");
    assert_eq!(res["book"]["title"], "Emma");

    let (status, body) = app.get("/api/books").await;
    assert_eq!(status, StatusCode::OK);
    let books = json_body(&body);
    assert_eq!(books.as_array().unwrap().len(), 1);
    assert_eq!(books[0]["title"], "Emma");

    let (status, body) = app.get("/api/books/1").await;
    assert_eq!(status, StatusCode::OK);
    let res = json_body(&body);
    assert_eq!(res["book"]["id"], "1");
    assert_eq!(res["content"], "Emma Woodhouse");
}

#[tokio::test]
async fn upload_without_file_field_test() {
    let app = TestApp::new().await;

    let (status, body) = app.upload("other", "Emma.txt", "x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, b"Error retrieving the file");

    let (_, body) = app.get("/api/books").await;
    assert_eq!(json_body(&body), json!([]));
}

#[tokio::test]
async fn book_not_found_test() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/books/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, b"Book not found");
}

#[tokio::test]
async fn cors_preflight_test() {
    let app = TestApp::new().await;

    let req = Request::builder()
        .method("OPTIONS")
        .uri("/api/translate")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let resp = app.app.clone().oneshot(req).await.unwrap();
    assert_eq!(
        resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    assert_eq!(
        resp.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );
}
