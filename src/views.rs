//! View models for the two console pages / 页面视图模型
//!
//! Handlers build these from operation results; Askama renders them from
//! `templates/`.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::flash::{Flashes, FlashMessage};
use crate::storage::ObjectRecord;
use crate::utils::{encode_path, format_size};

/// One entry of the bucket list
#[derive(Debug, Clone)]
pub struct BucketRow {
    pub name: String,
    pub view_url: String,
    pub selected: bool,
}

/// One object of the selected bucket, with its action links
#[derive(Debug, Clone)]
pub struct ObjectRow {
    pub key: String,
    pub size: String,
    pub last_modified: String,
    pub delete_url: String,
    pub copy_url: String,
    /// `/move/<bucket>/<key>/`; the page appends the folder
    pub move_base_url: String,
}

impl ObjectRow {
    fn new(bucket: &str, record: ObjectRecord) -> Self {
        let move_base_url = format!("{}/", encode_path("/move", &[bucket, &record.key]));
        Self {
            delete_url: encode_path("/delete", &[bucket, &record.key]),
            copy_url: encode_path("/copy", &[bucket, &record.key]),
            move_base_url,
            size: format_size(record.size),
            last_modified: record.last_modified.unwrap_or_default(),
            key: record.key,
        }
    }
}

/// Listing page
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexView {
    pub buckets: Vec<BucketRow>,
    pub selected_bucket: Option<String>,
    pub files: Vec<ObjectRow>,
    pub messages: Vec<FlashMessage>,
}

impl IndexView {
    pub fn new(
        buckets: Vec<String>,
        selected_bucket: Option<String>,
        files: Vec<ObjectRecord>,
        messages: Flashes,
    ) -> Self {
        let buckets = buckets
            .into_iter()
            .map(|name| BucketRow {
                view_url: encode_path("/view_bucket", &[&name]),
                selected: selected_bucket.as_deref() == Some(name.as_str()),
                name,
            })
            .collect();
        let files = match selected_bucket.as_deref() {
            Some(bucket) => files.into_iter().map(|f| ObjectRow::new(bucket, f)).collect(),
            None => Vec::new(),
        };

        Self {
            buckets,
            selected_bucket,
            files,
            messages: messages.into_vec(),
        }
    }
}

/// Upload form
#[derive(Template)]
#[template(path = "upload.html")]
pub struct UploadView {
    pub buckets: Vec<String>,
    pub messages: Vec<FlashMessage>,
}

impl UploadView {
    pub fn new(buckets: Vec<String>, messages: Flashes) -> Self {
        Self {
            buckets,
            messages: messages.into_vec(),
        }
    }
}

/// Render a template, logging and falling back to plain text on failure
pub fn render_template<T: Template>(template: T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template rendering error").into_response()
        }
    }
}
