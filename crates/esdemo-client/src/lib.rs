//! esdemo-client
//!
//! Thin blocking client for the handful of Elasticsearch REST calls the demos
//! use: ping, index, get and search.
pub mod client;
pub mod options;
pub mod query;
pub mod response;

pub use client::{IndexRequest, Refresh, SearchClient};
pub use options::RequestOptions;
pub use query::{Fuzziness, Highlight, MatchQuery, SearchSource};
pub use response::{GetResponse, IndexResponse, SearchHit, SearchResponse, WriteResult};
