use reqwest::blocking::{Client, Response};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use esdemo_core::config::ClusterSettings;
use esdemo_core::{Error, Result};

use crate::options::RequestOptions;
use crate::query::SearchSource;
use crate::response::{ErrorBody, GetResponse, IndexResponse, SearchResponse};

/// When a write becomes visible to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    True,
    WaitFor,
}

impl Refresh {
    fn as_param(self) -> &'static str {
        match self {
            Refresh::True => "true",
            Refresh::WaitFor => "wait_for",
        }
    }
}

/// A single document write: `PUT /{index}/_doc/{id}`.
#[derive(Debug, Clone)]
pub struct IndexRequest {
    index: String,
    id: String,
    source: Value,
    refresh: Option<Refresh>,
}

impl IndexRequest {
    pub fn new(index: impl Into<String>, id: impl Into<String>) -> Self {
        Self { index: index.into(), id: id.into(), source: Value::Object(Default::default()), refresh: None }
    }

    pub fn source<T: Serialize>(mut self, doc: &T) -> Result<Self> {
        self.source = serde_json::to_value(doc).map_err(|e| Error::Decode(format!("document source: {}", e)))?;
        Ok(self)
    }

    pub fn refresh(mut self, refresh: Refresh) -> Self {
        self.refresh = Some(refresh);
        self
    }
}

/// Shared handle to one cluster node.
///
/// The inner HTTP client pools connections and is safe to share across
/// threads; create one per process.
pub struct SearchClient {
    http: Client,
    base: Url,
}

impl SearchClient {
    pub fn new(settings: &ClusterSettings) -> Result<Self> {
        let raw = settings.base_url();
        let base = Url::parse(&raw).map_err(|e| Error::InvalidConfig(format!("cluster url '{}': {}", raw, e)))?;
        let mut builder = Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| Error::InvalidConfig(format!("http client: {}", e)))?;
        debug!(%base, "search client ready");
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `HEAD /`. Any 2xx is a live cluster; other statuses return `false`.
    pub fn ping(&self, options: &RequestOptions) -> Result<bool> {
        let resp = self.send(Method::HEAD, self.base.clone(), None, options)?;
        Ok(resp.status().is_success())
    }

    pub fn index(&self, request: &IndexRequest, options: &RequestOptions) -> Result<IndexResponse> {
        let mut url = self.endpoint(&[&request.index, "_doc", &request.id])?;
        if let Some(refresh) = request.refresh {
            url.query_pairs_mut().append_pair("refresh", refresh.as_param());
        }
        let resp = self.send(Method::PUT, url, Some(&request.source), options)?;
        let (status, body) = read_body(resp, options)?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        decode(&body, "index response")
    }

    /// `GET /{index}/_doc/{id}`. A missing document comes back with
    /// `found == false`; a missing index is an engine error.
    pub fn get(&self, index: &str, id: &str, options: &RequestOptions) -> Result<GetResponse> {
        let url = self.endpoint(&[index, "_doc", id])?;
        let resp = self.send(Method::GET, url, None, options)?;
        let (status, body) = read_body(resp, options)?;
        if status == StatusCode::NOT_FOUND {
            return serde_json::from_slice::<GetResponse>(&body).map_err(|_| status_error(status, &body));
        }
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        decode(&body, "get response")
    }

    pub fn search(&self, index: &str, source: &SearchSource, options: &RequestOptions) -> Result<SearchResponse> {
        let url = self.endpoint(&[index, "_search"])?;
        let resp = self.send(Method::POST, url, Some(&source.to_json()), options)?;
        let (status, body) = read_body(resp, options)?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        decode(&body, "search response")
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidConfig(format!("'{}' cannot be a base url", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn send(&self, method: Method, url: Url, body: Option<&Value>, options: &RequestOptions) -> Result<Response> {
        debug!(%method, %url, "sending request");
        let mut req = self.http.request(method.clone(), url.clone()).headers(options.headers().clone());
        if let Some(body) = body {
            req = req.json(body);
        }
        req.send().map_err(|e| Error::Connection(format!("{} {}: {}", method, url, e)))
    }
}

fn read_body(resp: Response, options: &RequestOptions) -> Result<(StatusCode, Vec<u8>)> {
    let limit = options.max_response_bytes();
    if let Some(len) = resp.content_length() {
        if len > limit {
            return Err(Error::ResponseTooLarge { limit, actual: len });
        }
    }
    let status = resp.status();
    let body = resp.bytes().map_err(|e| Error::Connection(format!("reading response body: {}", e)))?;
    let actual = body.len() as u64;
    if actual > limit {
        return Err(Error::ResponseTooLarge { limit, actual });
    }
    debug!(status = status.as_u16(), bytes = actual, "response received");
    Ok((status, body.to_vec()))
}

fn decode<T: DeserializeOwned>(body: &[u8], what: &str) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| Error::Decode(format!("{}: {}", what, e)))
}

fn status_error(status: StatusCode, body: &[u8]) -> Error {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => Error::Status {
            status: status.as_u16(),
            error_type: parsed.error.error_type,
            reason: parsed.error.reason.unwrap_or_default(),
        },
        Err(_) => Error::Status {
            status: status.as_u16(),
            error_type: status.canonical_reason().unwrap_or("unknown").to_string(),
            reason: String::from_utf8_lossy(body).into_owned(),
        },
    }
}
