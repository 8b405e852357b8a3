//! Dataset endpoint module
//!
//! Each `/api/<name>` route is one `DatasetSource`: read `<data_dir>/<name>.json`,
//! parse it, and send it back re-serialized. Nothing is cached; every
//! request sees the file as it is on disk at that moment.

use crate::error::{ServeError, ServeResult};
use crate::http;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Datasets the dashboard consumes, in route registration order
pub const DATASET_NAMES: [&str; 3] = ["marketShare", "revenueTrends", "marketSegmentation"];

/// URL prefix for dataset routes
pub const API_PREFIX: &str = "/api";

/// A named JSON document on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSource {
    name: String,
    path: PathBuf,
}

impl DatasetSource {
    /// Dataset `name` stored as `<data_dir>/<name>.json`
    pub fn new(name: &str, data_dir: &Path) -> Self {
        Self {
            name: name.to_string(),
            path: data_dir.join(format!("{name}.json")),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Route this dataset is served on
    pub fn route(&self) -> String {
        format!("{API_PREFIX}/{}", self.name)
    }

    /// Read and parse the document
    pub async fn load(&self) -> ServeResult<Value> {
        let raw = fs::read(&self.path)
            .await
            .map_err(|e| ServeError::io(&self.path, e))?;
        serde_json::from_slice(&raw).map_err(|source| ServeError::Json {
            path: self.path.clone(),
            source,
        })
    }

    /// Read, parse and re-serialize the document as a response body
    ///
    /// Output is compact JSON with the source's key order, newline-terminated.
    pub async fn render(&self) -> ServeResult<Bytes> {
        let document = self.load().await?;
        let mut body = serde_json::to_vec(&document).map_err(|source| ServeError::Json {
            path: self.path.clone(),
            source,
        })?;
        body.push(b'\n');
        Ok(Bytes::from(body))
    }
}

/// Serve one dataset request
pub async fn serve(source: &DatasetSource, is_head: bool) -> ServeResult<Response<Full<Bytes>>> {
    let body = source.render().await?;
    Ok(http::build_json_response(body, is_head))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        std::fs::write(dir.path().join(format!("{name}.json")), content).unwrap();
    }

    #[test]
    fn test_factory_derives_path_and_route() {
        let source = DatasetSource::new("revenueTrends", Path::new("/srv/app/data"));
        assert_eq!(source.name(), "revenueTrends");
        assert_eq!(source.path(), Path::new("/srv/app/data/revenueTrends.json"));
        assert_eq!(source.route(), "/api/revenueTrends");
    }

    #[tokio::test]
    async fn test_render_preserves_key_order_and_values() {
        let dir = TempDir::new().unwrap();
        write(&dir, "marketShare", r#"{"Vendor A": 40, "Vendor B": 35, "Vendor C": 25}"#);

        let body = DatasetSource::new("marketShare", dir.path())
            .render()
            .await
            .unwrap();
        assert_eq!(body, "{\"Vendor A\":40,\"Vendor B\":35,\"Vendor C\":25}\n");
    }

    #[tokio::test]
    async fn test_load_nested_document() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "revenueTrends",
            r#"{"labels": ["Q1", "Q2"], "series": [{"name": "Cloud", "values": [1.5, 2.25]}], "note": null}"#,
        );

        let value = DatasetSource::new("revenueTrends", dir.path())
            .load()
            .await
            .unwrap();
        assert_eq!(value["labels"][1], "Q2");
        assert_eq!(value["series"][0]["values"][1], 2.25);
        assert!(value["note"].is_null());
    }

    #[tokio::test]
    async fn test_top_level_array_is_accepted() {
        let dir = TempDir::new().unwrap();
        write(&dir, "marketSegmentation", r#"[{"segment": "SMB", "share": 0.4}]"#);

        let body = DatasetSource::new("marketSegmentation", dir.path())
            .render()
            .await
            .unwrap();
        assert_eq!(body, "[{\"segment\":\"SMB\",\"share\":0.4}]\n");
    }

    #[tokio::test]
    async fn test_numbers_keep_their_source_text() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "revenueTrends",
            r#"{"big": 18446744073709551616, "precise": 0.10000000000000000001, "neg": -9223372036854775809}"#,
        );

        let body = DatasetSource::new("revenueTrends", dir.path())
            .render()
            .await
            .unwrap();
        assert_eq!(
            body,
            "{\"big\":18446744073709551616,\"precise\":0.10000000000000000001,\"neg\":-9223372036854775809}\n"
        );
    }

    #[tokio::test]
    async fn test_nesting_deeper_than_limit_is_json_error() {
        let dir = TempDir::new().unwrap();
        let shallow = format!("{}{}", "[".repeat(100), "]".repeat(100));
        let deep = format!("{}{}", "[".repeat(200), "]".repeat(200));
        let source = DatasetSource::new("marketSegmentation", dir.path());

        write(&dir, "marketSegmentation", &shallow);
        assert_eq!(source.render().await.unwrap(), format!("{shallow}\n"));

        write(&dir, "marketSegmentation", &deep);
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, ServeError::Json { .. }));
        assert!(err.to_string().contains("recursion limit"));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = DatasetSource::new("revenueTrends", dir.path())
            .load()
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_malformed_file_is_json_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, "marketShare", r#"{"Vendor A": 40,"#);

        let err = DatasetSource::new("marketShare", dir.path())
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, ServeError::Json { .. }));
    }

    #[tokio::test]
    async fn test_file_is_reread_every_request() {
        let dir = TempDir::new().unwrap();
        let source = DatasetSource::new("marketShare", dir.path());

        write(&dir, "marketShare", r#"{"Vendor A": 40}"#);
        assert_eq!(source.render().await.unwrap(), "{\"Vendor A\":40}\n");

        write(&dir, "marketShare", r#"{"Vendor A": 41}"#);
        assert_eq!(source.render().await.unwrap(), "{\"Vendor A\":41}\n");
    }

    #[tokio::test]
    async fn test_shipped_datasets_parse() {
        let data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        for name in DATASET_NAMES {
            let value = DatasetSource::new(name, &data_dir).load().await.unwrap();
            assert!(value.is_object(), "{name}");
        }
    }
}
