//! `fetch-unsplash` proxy: forwards two photo-provider calls with a
//! server-held access key.
//!
//! `GET /fetch-unsplash?id=image` returns a random photo and
//! `GET /fetch-unsplash?id=download&downloadLocation=URL` pings the provider's
//! download-accounting URL. Successful calls answer `200 {"data": ...}`;
//! everything else answers `404 {"error": "..."}`.

use std::time::Duration;

use log::{debug, info, warn};
use serde_json::{json, Value};
use url::Url;

use crate::{Error, Result};

/// Paths the proxy answers on.
pub const ROUTES: [&str; 2] = ["/fetch-unsplash", "/.netlify/functions/fetch-unsplash"];

/// Proxy configuration
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Photo provider access key, appended as `client_id`
    pub access_key: String,
    /// Base URL of the photo provider API
    pub api_base: String,
    /// Timeout for upstream calls in milliseconds
    pub timeout_ms: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            api_base: "https://api.unsplash.com".to_string(),
            timeout_ms: 30000,
        }
    }
}

impl ProxyConfig {
    /// Read `ACCESS_KEY` (required) and `UNSPLASH_API_BASE` (optional).
    pub fn from_env() -> Result<Self> {
        let access_key = std::env::var("ACCESS_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::ConfigError("ACCESS_KEY is not set".into()))?;
        let mut cfg = Self {
            access_key,
            ..Default::default()
        };
        if let Ok(base) = std::env::var("UNSPLASH_API_BASE") {
            cfg.api_base = base;
        }
        Ok(cfg)
    }
}

/// Outbound GET returning a JSON document.
pub trait Upstream {
    fn get_json(&self, url: &Url) -> Result<Value>;
}

/// Blocking reqwest client used by the proxy server.
pub struct HttpUpstream {
    client: reqwest::blocking::Client,
}

impl HttpUpstream {
    pub fn new(config: &ProxyConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl Upstream for HttpUpstream {
    fn get_json(&self, url: &Url) -> Result<Value> {
        // The provider's JSON is passed through whatever the status code.
        self.client
            .get(url.clone())
            .send()
            .map_err(|e| Error::ProxyError(format!("GET {} failed: {}", url.path(), e)))?
            .json::<Value>()
            .map_err(|e| Error::ProxyError(format!("Invalid JSON from {}: {}", url.path(), e)))
    }
}

/// Query parameters of a proxy call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyRequest {
    pub id: Option<String>,
    pub download_location: Option<String>,
}

impl ProxyRequest {
    pub fn from_query(query: &str) -> Self {
        let mut req = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "id" => req.id = Some(value.into_owned()),
                "downloadLocation" => req.download_location = Some(value.into_owned()),
                _ => {}
            }
        }
        req
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    pub status: u16,
    pub body: Value,
}

impl ProxyResponse {
    fn data(data: Value) -> Self {
        Self {
            status: 200,
            body: json!({ "data": data }),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: 404,
            body: json!({ "error": message.into() }),
        }
    }
}

pub struct Proxy<U> {
    config: ProxyConfig,
    upstream: U,
}

impl<U: Upstream> Proxy<U> {
    pub fn new(config: ProxyConfig, upstream: U) -> Self {
        Self { config, upstream }
    }

    pub fn handle(&self, req: &ProxyRequest) -> ProxyResponse {
        match self.forward(req) {
            Ok(resp) => resp,
            Err(err) => {
                warn!("proxy call {:?} failed: {}", req.id, err);
                ProxyResponse::error(err.to_string())
            }
        }
    }

    fn forward(&self, req: &ProxyRequest) -> Result<ProxyResponse> {
        match req.id.as_deref() {
            Some("image") => {
                let url = self.with_credential(&format!(
                    "{}/photos/random",
                    self.config.api_base.trim_end_matches('/')
                ))?;
                Ok(ProxyResponse::data(self.upstream.get_json(&url)?))
            }
            Some("download") => match req.download_location.as_deref().filter(|l| !l.is_empty()) {
                Some(location) => {
                    let url = self.with_credential(location)?;
                    Ok(ProxyResponse::data(self.upstream.get_json(&url)?))
                }
                None => Ok(ProxyResponse::error("Missing download location")),
            },
            _ => Ok(ProxyResponse::error("Invalid ID")),
        }
    }

    /// Append `client_id`, keeping any query string the URL already has.
    fn with_credential(&self, raw: &str) -> Result<Url> {
        let mut url = Url::parse(raw).map_err(|e| Error::ProxyError(format!("Bad URL '{}': {}", raw, e)))?;
        url.query_pairs_mut().append_pair("client_id", &self.config.access_key);
        Ok(url)
    }

    fn respond(&self, request: tiny_http::Request) {
        let raw = request.url().to_string();
        let (path, query) = raw.split_once('?').unwrap_or((raw.as_str(), ""));
        let resp = if ROUTES.contains(&path) {
            self.handle(&ProxyRequest::from_query(query))
        } else {
            ProxyResponse::error("Not Found")
        };
        debug!("{} {} -> {}", request.method(), path, resp.status);

        let mut response = tiny_http::Response::from_string(resp.body.to_string()).with_status_code(resp.status);
        if let Ok(header) = tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
            response = response.with_header(header);
        }
        if let Err(e) = request.respond(response) {
            warn!("failed to write proxy response: {}", e);
        }
    }
}

pub fn bind(addr: &str) -> Result<tiny_http::Server> {
    tiny_http::Server::http(addr).map_err(|e| Error::ConfigError(format!("Cannot listen on {}: {}", addr, e)))
}

/// Answer requests until the server is dropped or unblocked.
pub fn serve<U: Upstream>(server: tiny_http::Server, proxy: Proxy<U>) {
    match server.server_addr().to_ip() {
        Some(addr) => info!("proxy listening on http://{}{}", addr, ROUTES[0]),
        None => info!("proxy listening"),
    }
    for request in server.incoming_requests() {
        proxy.respond(request);
    }
}
