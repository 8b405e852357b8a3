//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: route lookup, method
//! validation, dispatch, and turning handler failures into 500s.

use crate::config::{AppState, Config};
use crate::error::ServeResult;
use crate::handler::dashboard::{self, PageTemplate};
use crate::handler::dataset::{self, DatasetSource, DATASET_NAMES};
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, SERVER};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response};
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// What a path resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Rendered dashboard page
    Dashboard(PageTemplate),
    /// JSON passthrough of one dataset file
    Dataset(DatasetSource),
    /// Liveness/readiness probe
    Health,
}

/// Exact-path route table, built once at startup
#[derive(Debug)]
pub struct RouteTable {
    routes: HashMap<String, Endpoint>,
    static_prefix: String,
    static_dir: PathBuf,
}

impl RouteTable {
    pub fn new(config: &Config) -> Self {
        let mut routes = HashMap::new();

        routes.insert(
            "/".to_string(),
            Endpoint::Dashboard(PageTemplate::new(config.app.template_path())),
        );

        let data_dir = config.app.data_path();
        for name in DATASET_NAMES {
            let source = DatasetSource::new(name, &data_dir);
            routes.insert(source.route(), Endpoint::Dataset(source));
        }

        if config.health.enabled {
            routes.insert(config.health.liveness_path.clone(), Endpoint::Health);
            routes.insert(config.health.readiness_path.clone(), Endpoint::Health);
        }

        let static_prefix = format!("{}/", config.app.static_url_path.trim_end_matches('/'));

        Self {
            routes,
            static_prefix,
            static_dir: config.app.static_path(),
        }
    }

    pub fn resolve(&self, path: &str) -> Option<&Endpoint> {
        self.routes.get(path)
    }

    /// Part of `path` below the static prefix, if it is an asset request
    pub fn static_asset<'p>(&self, path: &'p str) -> Option<&'p str> {
        path.strip_prefix(self.static_prefix.as_str())
            .filter(|rest| !rest.is_empty())
    }

    /// Registered paths, sorted
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.routes.keys().cloned().collect();
        paths.sort();
        paths
    }
}

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub method: &'a Method,
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

impl<'a> RequestContext<'a> {
    fn from_parts(parts: &'a Parts) -> Self {
        Self {
            method: &parts.method,
            path: parts.uri.path(),
            is_head: parts.method == Method::HEAD,
            if_none_match: parts
                .headers
                .get("if-none-match")
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string),
        }
    }
}

/// Main entry point for HTTP request handling
///
/// The request body is never read; every route is a body-less GET.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer: Option<SocketAddr>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, _) = req.into_parts();
    let ctx = RequestContext::from_parts(&parts);

    let mut response = route_request(&ctx, &state).await;
    apply_common_headers(&mut response, &state.config);

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::from_request(peer, &parts);
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Resolved request target
enum Target<'r, 'p> {
    Endpoint(&'r Endpoint),
    /// Still percent-encoded path below the static prefix
    Asset(&'p str),
}

/// Route request based on path, then check the method
async fn route_request(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let routes = &state.routes;

    let target = match routes.resolve(ctx.path) {
        Some(endpoint) => Target::Endpoint(endpoint),
        None => match routes.static_asset(ctx.path) {
            Some(relative) => Target::Asset(relative),
            None => return http::build_404_response(),
        },
    };

    if let Some(resp) = check_http_method(ctx.method, state.config.http.enable_cors) {
        return resp;
    }

    let result = match target {
        Target::Endpoint(endpoint) => dispatch_endpoint(ctx, endpoint).await,
        Target::Asset(relative) => {
            Ok(static_files::serve_static(ctx, &routes.static_dir, relative).await)
        }
    };

    result.unwrap_or_else(|err| {
        logger::log_exception(ctx.method.as_str(), ctx.path, &err);
        http::build_500_response()
    })
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

async fn dispatch_endpoint(
    ctx: &RequestContext<'_>,
    endpoint: &Endpoint,
) -> ServeResult<Response<Full<Bytes>>> {
    match endpoint {
        Endpoint::Dashboard(page) => dashboard::serve(page, ctx.is_head).await,
        Endpoint::Dataset(source) => dataset::serve(source, ctx.is_head).await,
        Endpoint::Health => Ok(http::build_health_response("ok")),
    }
}

fn apply_common_headers(response: &mut Response<Full<Bytes>>, config: &Config) {
    let headers = response.headers_mut();
    match HeaderValue::from_str(&config.http.server_name) {
        Ok(v) => {
            headers.insert(SERVER, v);
        }
        Err(_) => logger::log_warning(&format!(
            "Invalid server_name for Server header: {:?}",
            config.http.server_name
        )),
    }
    if config.http.enable_cors {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    }
}
