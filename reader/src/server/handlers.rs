use super::{ApiError, AppState};
use crate::books::Book;
use crate::vocabulary::{TranslateResult, VocabularyEntry};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct TranslateRequest {
    pub word: String,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    pub book: Book,
}

#[derive(Serialize)]
pub struct BookContentResponse {
    pub book: Book,
    pub content: String,
}

// region    --- words
pub async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResult>, ApiError> {
    let Json(req) = payload?;
    let res = state.vocabulary.translate(&req.word).await?;
    Ok(Json(res))
}

pub async fn list_words(State(state): State<AppState>) -> Json<Vec<VocabularyEntry>> {
    Json(state.vocabulary.list_words())
}

pub async fn save_word(
    State(state): State<AppState>,
    payload: Result<Json<VocabularyEntry>, JsonRejection>,
) -> Result<Json<VocabularyEntry>, ApiError> {
    let Json(entry) = payload?;
    let saved = state.vocabulary.save(entry)?;
    Ok(Json(saved))
}
// endregion --- words

// region    --- books
/// 表单中`file`字段是上传的文件，其它字段忽略
pub async fn upload_book(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let name = field
            .file_name()
            .map(str::to_owned)
            .ok_or(ApiError::InvalidUpload)?;
        let bytes = field.bytes().await?;
        let book = state.books.store_uploaded_file(&name, &bytes).await?;

        return Ok(Json(UploadResponse {
            message: "File uploaded successfully",
            book,
        }));
    }

    Err(ApiError::InvalidUpload)
}

pub async fn list_books(State(state): State<AppState>) -> Json<Vec<Book>> {
    Json(state.books.list_books().await)
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BookContentResponse>, ApiError> {
    let (book, content) = state.books.get_book(&id).await?;
    Ok(Json(BookContentResponse { book, content }))
}
// endregion --- books
