//! Dashboard page module
//!
//! The page is a shell: no data is injected server-side, the browser
//! pulls the datasets from `/api/*` after load.

use crate::error::{ServeError, ServeResult};
use crate::http;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Dashboard template on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTemplate {
    path: PathBuf,
}

impl PageTemplate {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render the template into an HTML document
    pub async fn render(&self) -> ServeResult<String> {
        let raw = fs::read(&self.path)
            .await
            .map_err(|e| ServeError::io(&self.path, e))?;
        String::from_utf8(raw).map_err(|e| ServeError::Template {
            path: self.path.clone(),
            reason: format!("not valid UTF-8 ({e})"),
        })
    }
}

/// Serve the dashboard page
pub async fn serve(page: &PageTemplate, is_head: bool) -> ServeResult<Response<Full<Bytes>>> {
    let html = page.render().await?;
    Ok(http::build_html_response(html, is_head))
}
