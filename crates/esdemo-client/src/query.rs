//! Request-body builders for `_search`.
//!
//! Only the pieces the demos need: a `match` clause with optional fuzziness,
//! pagination, a server-side timeout and field highlighting.

use serde_json::{json, Map, Value};
use std::time::Duration;

/// Allowed edit distance for a fuzzy match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fuzziness {
    /// Let the engine pick 0, 1 or 2 edits from the term length.
    Auto,
    /// A fixed edit distance. The engine only accepts 0, 1 or 2.
    Edits(u8),
}

impl Fuzziness {
    fn to_json(self) -> Value {
        match self {
            Fuzziness::Auto => json!("AUTO"),
            Fuzziness::Edits(n) => json!(n),
        }
    }
}

impl std::str::FromStr for Fuzziness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Fuzziness::Auto);
        }
        match s.parse::<u8>() {
            Ok(n) if n <= 2 => Ok(Fuzziness::Edits(n)),
            _ => Err(format!("fuzziness must be AUTO, 0, 1 or 2, got '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchQuery {
    field: String,
    text: String,
    fuzziness: Option<Fuzziness>,
    prefix_length: Option<u32>,
    max_expansions: Option<u32>,
}

impl MatchQuery {
    pub fn new(field: impl Into<String>, text: impl Into<String>) -> Self {
        Self { field: field.into(), text: text.into(), fuzziness: None, prefix_length: None, max_expansions: None }
    }

    pub fn fuzziness(mut self, fuzziness: Fuzziness) -> Self {
        self.fuzziness = Some(fuzziness);
        self
    }

    /// Number of leading characters that must match exactly.
    pub fn prefix_length(mut self, n: u32) -> Self {
        self.prefix_length = Some(n);
        self
    }

    /// Upper bound on the terms a fuzzy clause may expand to.
    pub fn max_expansions(mut self, n: u32) -> Self {
        self.max_expansions = Some(n);
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn to_json(&self) -> Value {
        let mut params = Map::new();
        params.insert("query".into(), json!(self.text));
        if let Some(f) = self.fuzziness {
            params.insert("fuzziness".into(), f.to_json());
        }
        if let Some(n) = self.prefix_length {
            params.insert("prefix_length".into(), json!(n));
        }
        if let Some(n) = self.max_expansions {
            params.insert("max_expansions".into(), json!(n));
        }
        let mut clause = Map::new();
        clause.insert(self.field.clone(), Value::Object(params));
        json!({ "match": clause })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Highlight {
    pre_tags: Vec<String>,
    post_tags: Vec<String>,
    fields: Vec<String>,
}

impl Highlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pre_tags(mut self, tag: impl Into<String>) -> Self {
        self.pre_tags = vec![tag.into()];
        self
    }

    pub fn post_tags(mut self, tag: impl Into<String>) -> Self {
        self.post_tags = vec![tag.into()];
        self
    }

    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        if !self.pre_tags.is_empty() {
            body.insert("pre_tags".into(), json!(self.pre_tags));
        }
        if !self.post_tags.is_empty() {
            body.insert("post_tags".into(), json!(self.post_tags));
        }
        let fields: Map<String, Value> = self.fields.iter().map(|f| (f.clone(), json!({}))).collect();
        body.insert("fields".into(), Value::Object(fields));
        Value::Object(body)
    }
}

/// The body of a `_search` request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchSource {
    query: Option<MatchQuery>,
    from: Option<usize>,
    size: Option<usize>,
    timeout: Option<Duration>,
    highlight: Option<Highlight>,
}

impl SearchSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: MatchQuery) -> Self {
        self.query = Some(query);
        self
    }

    pub fn from(mut self, from: usize) -> Self {
        self.from = Some(from);
        self
    }

    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn highlighter(mut self, highlight: Highlight) -> Self {
        self.highlight = Some(highlight);
        self
    }

    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        if let Some(q) = &self.query {
            body.insert("query".into(), q.to_json());
        }
        if let Some(from) = self.from {
            body.insert("from".into(), json!(from));
        }
        if let Some(size) = self.size {
            body.insert("size".into(), json!(size));
        }
        if let Some(t) = self.timeout {
            body.insert("timeout".into(), json!(time_value(t)));
        }
        if let Some(h) = &self.highlight {
            body.insert("highlight".into(), h.to_json());
        }
        Value::Object(body)
    }
}

/// Engine time units: whole seconds as `60s`, anything finer as milliseconds.
fn time_value(d: Duration) -> String {
    if d.subsec_nanos() == 0 {
        format!("{}s", d.as_secs())
    } else {
        format!("{}ms", d.as_millis())
    }
}
