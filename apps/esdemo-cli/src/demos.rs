//! The five client walkthroughs plus a seeding helper.
//!
//! Each routine borrows the shared client and options, sends one request
//! and prints what came back. Nothing is retried.

use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use esdemo_client::{
    Fuzziness, Highlight, IndexRequest, IndexResponse, MatchQuery, Refresh, RequestOptions, SearchClient,
    SearchHit, SearchSource,
};
use esdemo_core::types::{SamplePost, User};
use esdemo_core::Result;

pub const SAMPLE_POST_ID: &str = "kimchy-post-1";
pub const HIGHLIGHT_PRE_TAG: &str = "<span style='color:red' >";
pub const HIGHLIGHT_POST_TAG: &str = "</span>";

/// 32 lowercase hex chars, no dashes.
pub fn new_doc_id() -> String {
    Uuid::new_v4().simple().to_string()
}

pub fn demo_user() -> User {
    User::builder()
        .username("li.lian")
        .password("123456")
        .timestamp(chrono::Utc::now().timestamp_millis())
        .description("test")
        .build()
}

pub fn index_user(client: &SearchClient, options: &RequestOptions, index: &str) -> Result<IndexResponse> {
    index_user_with_id(client, options, index, &new_doc_id(), &demo_user())
}

pub fn index_user_with_id(
    client: &SearchClient,
    options: &RequestOptions,
    index: &str,
    id: &str,
    user: &User,
) -> Result<IndexResponse> {
    let request = IndexRequest::new(index, id).source(user)?;
    let resp = client.index(&request, options)?;
    info!(index, id, result = ?resp.result, "indexed user");
    if resp.is_created() {
        println!("Index ready, document {} created", resp.id);
    } else {
        println!("Document {} written with result {:?}", resp.id, resp.result);
    }
    Ok(resp)
}

/// Prints the `_source` mapping, or `null` when the id is unknown.
pub fn fetch_by_id(
    client: &SearchClient,
    options: &RequestOptions,
    index: &str,
    id: &str,
) -> Result<Option<Map<String, Value>>> {
    let resp = client.get(index, id, options)?;
    let source = if resp.found { resp.source } else { None };
    match &source {
        Some(fields) => println!("{}", Value::Object(fields.clone())),
        None => println!("null"),
    }
    Ok(source)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingOutcome {
    Connected,
    Unhealthy,
    Unreachable,
}

/// Only cluster-side failures are caught here; anything else propagates.
pub fn health_check(client: &SearchClient, options: &RequestOptions) -> Result<PingOutcome> {
    match client.ping(options) {
        Ok(true) => {
            println!("Connected to Elasticsearch at {}", client.base_url());
            Ok(PingOutcome::Connected)
        }
        Ok(false) => {
            println!("Elasticsearch at {} answered ping with a failure status", client.base_url());
            Ok(PingOutcome::Unhealthy)
        }
        Err(e) if e.is_search_engine_error() => {
            warn!(error = %e, "ping failed");
            println!("Connection to Elasticsearch failed: {}", e);
            Ok(PingOutcome::Unreachable)
        }
        Err(e) => Err(e),
    }
}

#[derive(Debug, Clone)]
pub struct FuzzyParams {
    pub field: String,
    pub text: String,
    pub fuzziness: Fuzziness,
    pub prefix_length: u32,
    pub max_expansions: u32,
}

impl Default for FuzzyParams {
    fn default() -> Self {
        Self {
            field: "user".to_string(),
            text: "kimchy".to_string(),
            fuzziness: Fuzziness::Auto,
            prefix_length: 3,
            max_expansions: 10,
        }
    }
}

pub fn fuzzy_search(
    client: &SearchClient,
    options: &RequestOptions,
    index: &str,
    params: &FuzzyParams,
) -> Result<Vec<SearchHit>> {
    let query = MatchQuery::new(params.field.as_str(), params.text.as_str())
        .fuzziness(params.fuzziness)
        .prefix_length(params.prefix_length)
        .max_expansions(params.max_expansions);
    let source = SearchSource::new().query(query).timeout(Duration::from_secs(60));
    let resp = client.search(index, &source, options)?;
    info!(index, took_ms = resp.took, hits = resp.hits.hits.len(), "fuzzy search done");
    for hit in &resp.hits.hits {
        println!("{}", hit);
    }
    Ok(resp.hits.hits)
}

#[derive(Debug, Clone)]
pub struct HighlightParams {
    pub field: String,
    pub text: String,
    pub from: usize,
    pub size: usize,
}

impl Default for HighlightParams {
    fn default() -> Self {
        Self { field: "user".to_string(), text: "kimchy".to_string(), from: 0, size: 10 }
    }
}

/// Returns each hit's source with highlighted fields swapped in.
pub fn highlight_search(
    client: &SearchClient,
    options: &RequestOptions,
    index: &str,
    params: &HighlightParams,
) -> Result<Vec<Map<String, Value>>> {
    let highlight = Highlight::new()
        .pre_tags(HIGHLIGHT_PRE_TAG)
        .post_tags(HIGHLIGHT_POST_TAG)
        .field(params.field.as_str());
    let source = SearchSource::new()
        .query(MatchQuery::new(params.field.as_str(), params.text.as_str()))
        .highlighter(highlight)
        .from(params.from)
        .size(params.size);
    let resp = client.search(index, &source, options)?;
    info!(index, took_ms = resp.took, hits = resp.hits.hits.len(), "highlight search done");
    let mut rows = Vec::with_capacity(resp.hits.hits.len());
    for hit in resp.hits.hits.iter().take(params.size) {
        let row = hit.highlighted_source();
        println!("{}", Value::Object(row.clone()));
        rows.push(row);
    }
    Ok(rows)
}

/// Writes the sample post and waits until it is searchable.
pub fn seed_sample(client: &SearchClient, options: &RequestOptions, index: &str) -> Result<IndexResponse> {
    let request = IndexRequest::new(index, SAMPLE_POST_ID)
        .source(&SamplePost::default())?
        .refresh(Refresh::WaitFor);
    let resp = client.index(&request, options)?;
    println!("Sample post {} {:?}", resp.id, resp.result);
    Ok(resp)
}
