//! Ordered upstream endpoint list.

use std::sync::Arc;

use crate::upstream::types::UpstreamError;

/// Immutable, ordered sequence of upstream JSON-RPC endpoints.
///
/// The primary endpoint (when configured) comes first, followed by the
/// fallbacks in declared order. Duplicates are kept. Cloning is cheap and the
/// list is shared read-only by all in-flight requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointList {
    urls: Arc<[String]>,
}

impl EndpointList {
    /// Build the list from an optional primary and the fallbacks.
    ///
    /// A blank primary contributes nothing.
    pub fn new(primary: Option<&str>, fallbacks: &[String]) -> Result<Self, UpstreamError> {
        let urls: Vec<String> = primary
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .into_iter()
            .chain(fallbacks.iter().cloned())
            .collect();

        if urls.is_empty() {
            return Err(UpstreamError::NoEndpoints);
        }

        Ok(Self { urls: urls.into() })
    }

    /// The endpoint tried first on every request.
    pub fn primary(&self) -> &str {
        &self.urls[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
