use std::sync::Arc;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use bytes::Bytes;
use futures::StreamExt;
use tokio_util::io::StreamReader;
use tower_cookies::Cookies;

use crate::error::OperationError;
use crate::flash::{self, Flashes};
use crate::state::AppState;
use crate::utils::index_url;
use crate::views::{render_template, UploadView};

/// GET /upload - 上传页面
pub async fn upload_form(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> Response {
    let mut flashes = flash::take(&cookies, &state.flash_cookie);
    let buckets = state.ops.list_containers(&mut flashes).await;
    render_template(UploadView::new(buckets, flashes))
}

/// POST /upload - 流式上传文件到所选存储桶
///
/// The file part is streamed straight to the provider when the `bucket` field
/// precedes it; otherwise it is buffered until the bucket is known. A file
/// part without a file name counts as absent.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    mut multipart: Multipart,
) -> Response {
    let mut bucket: Option<String> = None;
    let mut buffered: Option<(String, Bytes)> = None;
    let mut outcome: Option<Result<(), OperationError>> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("upload: malformed multipart body: {}", e);
                return (StatusCode::BAD_REQUEST, "Malformed upload form").into_response();
            }
        };

        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "bucket" => match field.text().await {
                Ok(value) if !value.is_empty() => bucket = Some(value),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("upload: unreadable bucket field: {}", e);
                    return (StatusCode::BAD_REQUEST, "Malformed upload form").into_response();
                }
            },
            "file" if outcome.is_none() && buffered.is_none() => {
                let filename = field.file_name().unwrap_or("").to_string();
                if filename.is_empty() {
                    continue;
                }
                match bucket.clone() {
                    Some(target) => {
                        let stream = field.map(|chunk| {
                            chunk.map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
                        });
                        let mut reader = StreamReader::new(Box::pin(stream));
                        outcome = Some(state.ops.upload_object(&target, &mut reader, &filename).await);
                    }
                    None => match field.bytes().await {
                        Ok(data) => buffered = Some((filename, data)),
                        Err(e) => {
                            tracing::warn!("upload: failed to read file field: {}", e);
                            return (StatusCode::BAD_REQUEST, "Malformed upload form").into_response();
                        }
                    },
                }
            }
            _ => {}
        }
    }

    if outcome.is_none() {
        if let (Some(target), Some((filename, data))) = (bucket.as_deref(), buffered) {
            let mut reader = std::io::Cursor::new(data);
            outcome = Some(state.ops.upload_object(target, &mut reader, &filename).await);
        }
    }

    match outcome {
        Some(result) => {
            let mut flashes = Flashes::new();
            match result {
                Ok(()) => flashes.success("File uploaded successfully!"),
                Err(e) => {
                    tracing::error!("upload: failed: {}", e);
                    flashes.push(e.severity(), format!("Upload failed: {}", e));
                }
            }
            flash::stash(&cookies, &state.flash_cookie, flashes);
        }
        None => tracing::debug!("upload: file or bucket missing, nothing uploaded"),
    }

    Redirect::to("/").into_response()
}

/// GET /delete/:bucket_name/:filename - 删除对象
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Path((bucket_name, filename)): Path<(String, String)>,
) -> Redirect {
    let mut flashes = Flashes::new();
    match state.ops.delete_object(&bucket_name, &filename).await {
        Ok(()) => flashes.danger(format!("{} deleted from {}!", filename, bucket_name)),
        Err(e) => {
            tracing::error!("delete: {}/{} failed: {}", bucket_name, filename, e);
            flashes.push(e.severity(), format!("Delete failed: {}", e));
        }
    }
    flash::stash(&cookies, &state.flash_cookie, flashes);
    Redirect::to(&index_url(Some(&bucket_name)))
}

/// GET /copy/:bucket_name/:filename - 复制为 copy_of_<filename>
pub async fn copy_file(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Path((bucket_name, filename)): Path<(String, String)>,
) -> Redirect {
    let mut flashes = Flashes::new();
    match state.ops.copy_object(&bucket_name, &filename).await {
        Ok(new_key) => flashes.info(format!("Copied {} to {} in {}!", filename, new_key, bucket_name)),
        Err(e) => {
            tracing::error!("copy: {}/{} failed: {}", bucket_name, filename, e);
            flashes.push(e.severity(), format!("Copy failed: {}", e));
        }
    }
    flash::stash(&cookies, &state.flash_cookie, flashes);
    Redirect::to(&index_url(Some(&bucket_name)))
}

/// GET /move/:bucket_name/:filename/:new_folder - 移动到 <new_folder>/<filename>（复制后删除）
pub async fn move_file(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Path((bucket_name, filename, new_folder)): Path<(String, String, String)>,
) -> Redirect {
    let mut flashes = Flashes::new();
    match state.ops.move_object(&bucket_name, &filename, &new_folder).await {
        Ok(_) => flashes.warning(format!("Moved {} to {} in {}!", filename, new_folder, bucket_name)),
        Err(e) => {
            tracing::error!("move: {}/{} -> {} failed: {}", bucket_name, filename, new_folder, e);
            flashes.push(e.severity(), format!("Move failed: {}", e));
        }
    }
    flash::stash(&cookies, &state.flash_cookie, flashes);
    Redirect::to(&index_url(Some(&bucket_name)))
}
