//! HTTP接口
//!
//! | method | path | |
//! |---|---|---|
//! | POST | `/api/translate` | 翻译单词 |
//! | GET | `/api/words` | 生词列表 |
//! | POST | `/api/words` | 保存单词 |
//! | POST | `/api/upload` | 上传书籍，multipart表单的`file`字段 |
//! | GET | `/api/books` | 书籍列表 |
//! | GET | `/api/books/{id}` | 书籍信息和内容 |

mod error;
pub use error::ApiError;

mod handlers;
pub use handlers::{BookContentResponse, TranslateRequest, UploadResponse};

use crate::books::BookStore;
use crate::vocabulary::VocabularyService;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// 上传文件的大小上限，10MB
pub const MAX_UPLOAD_BYTES: usize = 10 << 20;

#[derive(Clone)]
pub struct AppState {
    pub vocabulary: Arc<VocabularyService>,
    pub books: Arc<BookStore>,
}

pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/api/translate", post(handlers::translate))
        .route(
            "/api/words",
            get(handlers::list_words).post(handlers::save_word),
        )
        .route(
            "/api/upload",
            post(handlers::upload_book).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/books", get(handlers::list_books))
        .route("/api/books/{id}", get(handlers::get_book))
        .with_state(state)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignore invalid cors origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    info!(addr = ?listener.local_addr()?, "server is running");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server exited");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
