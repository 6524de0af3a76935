//! Example payloads sent to the cluster.

use serde::{Deserialize, Serialize};

/// A demo account record.
///
/// - `username`/`password`/`description`: free text, never validated
/// - `timestamp`: milliseconds since the Unix epoch
///
/// The password is stored as given; this is example data only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
    pub description: String,
    pub timestamp: i64,
}

impl User {
    pub fn builder() -> UserBuilder {
        UserBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserBuilder {
    inner: User,
}

impl UserBuilder {
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.inner.username = username.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.inner.password = password.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.inner.description = description.into();
        self
    }

    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.inner.timestamp = timestamp;
        self
    }

    pub fn build(self) -> User {
        self.inner
    }
}

/// The canned blog-post document the search demos look for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplePost {
    pub user: String,
    #[serde(rename = "postDate")]
    pub post_date: String,
    pub message: String,
}

impl Default for SamplePost {
    fn default() -> Self {
        Self {
            user: "kimchy".to_string(),
            post_date: "2023-02-01".to_string(),
            message: "trying out Elasticsearch".to_string(),
        }
    }
}
