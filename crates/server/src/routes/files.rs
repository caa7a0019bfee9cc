use crate::error::ApiResult;
use crate::state::AppState;
use axum::extract::{Multipart, State};
use axum::Json;
use std::sync::Arc;
use storefront::files::{FileElementResponse, UploadedFile};

/// Multipart form field carrying the uploads.
pub const UPLOAD_FIELD: &str = "files";

pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<Vec<FileElementResponse>>> {
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?.to_vec();
        files.push(UploadedFile { name, data });
    }

    let saved = state.files.save(files).await?;
    tracing::info!(count = saved.len(), "files uploaded");
    Ok(Json(saved))
}
