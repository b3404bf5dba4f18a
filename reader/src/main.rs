use anyhow::Context;
use reader::books::BookStore;
use reader::config::Config;
use reader::server::{self, AppState};
use reader::translate;
use reader::vocabulary::{VocabularyService, VocabularyStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reader=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load(Config::default_path()).context("failed to load config")?;
    info!(app_key = %config.youdao_app_key, "starting server");

    let client = translate::Client::builder()
        .credentials(config.credentials())
        .build();
    let vocabulary = VocabularyService::new(Arc::new(VocabularyStore::new()), Arc::new(client));

    let books = BookStore::new(&config.upload_dir);
    books
        .init()
        .await
        .with_context(|| format!("failed to create upload dir {:?}", books.dir()))?;

    let state = AppState {
        vocabulary: Arc::new(vocabulary),
        books: Arc::new(books),
    };
    let app = server::router(state, &config.allowed_origins);

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    server::serve(listener, app).await.context("server error")?;

    Ok(())
}
