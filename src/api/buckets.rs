use std::sync::Arc;
use axum::{
    extract::{Path, Query, State},
    response::{Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_cookies::Cookies;

use crate::flash::{self, Flashes};
use crate::state::AppState;
use crate::views::{render_template, IndexView};

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub bucket: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BucketForm {
    pub bucket_name: Option<String>,
}

impl BucketForm {
    fn name(&self) -> Option<&str> {
        self.bucket_name.as_deref().filter(|n| !n.is_empty())
    }
}

/// Shared body of the two listing routes
async fn render_listing(state: &AppState, cookies: &Cookies, requested: Option<String>) -> Response {
    let mut flashes = flash::take(cookies, &state.flash_cookie);
    let buckets = state.ops.list_containers(&mut flashes).await;

    let selected = requested.or_else(|| buckets.first().cloned());
    let files = match selected.as_deref() {
        Some(bucket) => state.ops.list_objects(bucket, &mut flashes).await,
        None => Vec::new(),
    };

    render_template(IndexView::new(buckets, selected, files, flashes))
}

/// GET / - 存储桶列表，默认选中第一个存储桶
pub async fn index(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Query(query): Query<IndexQuery>,
) -> Response {
    let requested = query.bucket.filter(|b| !b.is_empty());
    render_listing(&state, &cookies, requested).await
}

/// GET /view_bucket/:bucket_name - 查看指定存储桶
pub async fn view_bucket(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Path(bucket_name): Path<String>,
) -> Response {
    render_listing(&state, &cookies, Some(bucket_name)).await
}

/// POST /create_bucket - 创建存储桶
pub async fn create_bucket(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Form(form): Form<BucketForm>,
) -> Redirect {
    if let Some(name) = form.name() {
        let mut flashes = Flashes::new();
        match state.ops.create_container(name).await {
            Ok(()) => flashes.success(format!("Bucket {} created successfully!", name)),
            Err(e) => {
                tracing::error!("create_bucket: {} failed: {}", name, e);
                flashes.push(e.severity(), format!("Create failed: {}", e));
            }
        }
        flash::stash(&cookies, &state.flash_cookie, flashes);
    }
    Redirect::to("/")
}

/// POST /delete_bucket - 删除存储桶（非空存储桶由服务端拒绝）
pub async fn delete_bucket(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Form(form): Form<BucketForm>,
) -> Redirect {
    if let Some(name) = form.name() {
        let mut flashes = Flashes::new();
        match state.ops.delete_container(name).await {
            Ok(()) => flashes.danger(format!("Bucket {} deleted!", name)),
            Err(e) => {
                tracing::error!("delete_bucket: {} failed: {}", name, e);
                flashes.push(e.severity(), format!("Delete failed: {}", e));
            }
        }
        flash::stash(&cookies, &state.flash_cookie, flashes);
    }
    Redirect::to("/")
}
