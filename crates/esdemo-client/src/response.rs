//! Decoded cluster responses.

use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// What a write did to the target document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteResult {
    Created,
    Updated,
    Deleted,
    NotFound,
    Noop,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexResponse {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_version", default)]
    pub version: Option<i64>,
    pub result: WriteResult,
}

impl IndexResponse {
    pub fn is_created(&self) -> bool {
        self.result == WriteResult::Created
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetResponse {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_version", default)]
    pub version: Option<i64>,
    pub found: bool,
    #[serde(rename = "_source", default)]
    pub source: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub took: u64,
    #[serde(default)]
    pub timed_out: bool,
    pub hits: Hits,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hits {
    #[serde(default)]
    pub total: Option<TotalHits>,
    #[serde(default)]
    pub max_score: Option<f64>,
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TotalHits {
    pub value: u64,
    pub relation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source", default)]
    pub source: Option<Map<String, Value>>,
    #[serde(default)]
    pub highlight: BTreeMap<String, Vec<String>>,
}

impl SearchHit {
    /// The source mapping with each highlighted field replaced by its
    /// fragments, joined with a single space.
    pub fn highlighted_source(&self) -> Map<String, Value> {
        let mut source = self.source.clone().unwrap_or_default();
        for (field, fragments) in &self.highlight {
            if fragments.is_empty() {
                continue;
            }
            source.insert(field.clone(), Value::String(fragments.join(" ")));
        }
        source
    }
}

impl std::fmt::Display for SearchHit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let raw = json!({
            "_index": self.index,
            "_id": self.id,
            "_score": self.score,
            "_source": self.source,
            "highlight": self.highlight,
        });
        write!(f, "{}", raw)
    }
}

/// Body of an engine error reply: `{"error":{"type":..,"reason":..},"status":..}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: ErrorCause,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorCause {
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(default)]
    pub reason: Option<String>,
}
