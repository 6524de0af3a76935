use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use esdemo_core::config::{RequestSettings, DEFAULT_MAX_RESPONSE_BYTES};
use esdemo_core::{Error, Result};

/// Per-request settings shared by every call.
///
/// Built once at startup and passed by reference; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    headers: HeaderMap,
    max_response_bytes: u64,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self { headers: HeaderMap::new(), max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES }
    }
}

impl RequestOptions {
    pub fn from_settings(settings: &RequestSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &settings.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::InvalidConfig(format!("header name '{}': {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::InvalidConfig(format!("header '{}' value: {}", name, e)))?;
            headers.insert(name, value);
        }
        Ok(Self { headers, max_response_bytes: settings.max_response_bytes })
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn max_response_bytes(&self) -> u64 {
        self.max_response_bytes
    }
}
