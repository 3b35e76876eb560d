/// 格式化文件大小
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{}B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1}KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1}MB", bytes as f64 / 1024.0 / 1024.0)
    } else {
        format!("{:.2}GB", bytes as f64 / 1024.0 / 1024.0 / 1024.0)
    }
}

/// Build a path from literal prefix and percent-encoded segments / 构建URL路径
///
/// Keys may contain `/`, which is encoded so each key stays one path segment.
pub fn encode_path(prefix: &str, segments: &[&str]) -> String {
    let mut path = prefix.trim_end_matches('/').to_string();
    for segment in segments {
        path.push('/');
        path.push_str(&urlencoding::encode(segment));
    }
    path
}

/// `/` with the selected bucket as query parameter.
pub fn index_url(bucket: Option<&str>) -> String {
    match bucket {
        Some(b) => format!("/?bucket={}", urlencoding::encode(b)),
        None => "/".to_string(),
    }
}
