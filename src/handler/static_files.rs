//! Static file serving module
//!
//! Serves dashboard assets (scripts, styles, images) from the static
//! directory with `ETag` revalidation.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Serve `relative_path` from `static_dir`
pub async fn serve_static(
    ctx: &RequestContext<'_>,
    static_dir: &Path,
    relative_path: &str,
) -> Response<Full<Bytes>> {
    match load_static_file(static_dir, relative_path).await {
        Some((content, content_type)) => build_static_file_response(
            content,
            content_type,
            ctx.if_none_match.as_deref(),
            ctx.is_head,
        ),
        None => http::build_404_response(),
    }
}

/// Load a file from the static directory, refusing anything that
/// resolves outside of it
///
/// `relative_path` is the raw URL path segment and is percent-decoded
/// before the traversal check.
pub async fn load_static_file(
    static_dir: &Path,
    relative_path: &str,
) -> Option<(Vec<u8>, &'static str)> {
    let Ok(decoded) = urlencoding::decode(relative_path) else {
        logger::log_warning(&format!(
            "Static path is not valid UTF-8 once decoded: {relative_path}"
        ));
        return None;
    };
    let relative_path = decoded.trim_start_matches('/');
    if relative_path.is_empty() {
        return None;
    }

    let static_dir_canonical = match fs::canonicalize(static_dir).await {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static directory not found or inaccessible '{}': {e}",
                static_dir.display()
            ));
            return None;
        }
    };

    // File not found is common (404), no need to log
    let file_path = fs::canonicalize(static_dir.join(relative_path)).await.ok()?;
    if !file_path.starts_with(&static_dir_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {relative_path} -> {}",
            file_path.display()
        ));
        return None;
    }
    if !fs::metadata(&file_path).await.ok()?.is_file() {
        return None;
    }

    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_path.display()
            ));
            return None;
        }
    };

    Some((content, mime::content_type_for(&file_path)))
}

fn build_static_file_response(
    data: Vec<u8>,
    content_type: &str,
    if_none_match: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(&data);

    if cache::check_etag_match(if_none_match, &etag) {
        return http::build_304_response(&etag);
    }

    http::build_cached_response(Bytes::from(data), content_type, &etag, is_head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn static_fixture() -> TempDir {
        let root = TempDir::new().unwrap();
        std::fs::create_dir_all(root.path().join("static/css")).unwrap();
        std::fs::write(root.path().join("static/css/site.css"), "body{}").unwrap();
        std::fs::write(root.path().join("secret.txt"), "top secret").unwrap();
        root
    }

    #[tokio::test]
    async fn test_load_nested_asset() {
        let root = static_fixture();
        let (content, content_type) = load_static_file(&root.path().join("static"), "css/site.css")
            .await
            .unwrap();
        assert_eq!(content, b"body{}");
        assert_eq!(content_type, "text/css; charset=utf-8");
    }

    #[tokio::test]
    async fn test_traversal_is_refused() {
        let root = static_fixture();
        let static_dir = root.path().join("static");
        assert!(load_static_file(&static_dir, "../secret.txt").await.is_none());
        assert!(load_static_file(&static_dir, "css/../../secret.txt").await.is_none());
    }

    #[tokio::test]
    async fn test_percent_encoded_names_are_decoded() {
        let root = static_fixture();
        let static_dir = root.path().join("static");
        std::fs::write(static_dir.join("my chart.js"), "draw();").unwrap();

        let (content, content_type) = load_static_file(&static_dir, "my%20chart.js")
            .await
            .unwrap();
        assert_eq!(content, b"draw();");
        assert_eq!(content_type, "text/javascript; charset=utf-8");

        assert!(load_static_file(&static_dir, "%2e%2e/secret.txt").await.is_none());
        assert!(load_static_file(&static_dir, "css%2F..%2F..%2Fsecret.txt").await.is_none());
        assert!(load_static_file(&static_dir, "bad%ff.js").await.is_none());
    }

    #[tokio::test]
    async fn test_directories_and_missing_files_are_not_served() {
        let root = static_fixture();
        let static_dir = root.path().join("static");
        assert!(load_static_file(&static_dir, "css").await.is_none());
        assert!(load_static_file(&static_dir, "").await.is_none());
        assert!(load_static_file(&static_dir, "missing.js").await.is_none());
        assert!(load_static_file(&root.path().join("nope"), "a.js").await.is_none());
    }

    #[test]
    fn test_etag_revalidation() {
        let etag = cache::generate_etag(b"body{}");
        let resp =
            build_static_file_response(b"body{}".to_vec(), "text/css", Some(&etag), false);
        assert_eq!(resp.status(), 304);

        let resp = build_static_file_response(b"body{}".to_vec(), "text/css", None, false);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["ETag"], etag.as_str());
    }
}
