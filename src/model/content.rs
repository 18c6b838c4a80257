//! Renderable advertisement content keyed by a globally unique id.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// One advertisement as loaded from the content store.
///
/// The rendering payload is opaque to the pipeline; equality and hashing go
/// by `content_id` alone so two loads of the same ad compare equal even if
/// the payload was re-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvertisementContent {
    content_id: String,
    render_content: serde_json::Value,
}

impl AdvertisementContent {
    /// Creates content with an opaque rendering payload.
    #[must_use]
    pub fn new(content_id: impl Into<String>, render_content: serde_json::Value) -> Self {
        Self {
            content_id: content_id.into(),
            render_content,
        }
    }

    /// The globally unique content id.
    #[must_use]
    pub fn content_id(&self) -> &str {
        &self.content_id
    }

    /// The opaque rendering payload.
    #[must_use]
    pub const fn render_content(&self) -> &serde_json::Value {
        &self.render_content
    }
}

impl PartialEq for AdvertisementContent {
    fn eq(&self, other: &Self) -> bool {
        self.content_id == other.content_id
    }
}

impl Eq for AdvertisementContent {}

impl Hash for AdvertisementContent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.content_id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::AdvertisementContent;
    use serde_json::json;

    #[test]
    fn equality_is_by_content_id_only() {
        let left = AdvertisementContent::new("ad-1", json!({"body": "buy more"}));
        let right = AdvertisementContent::new("ad-1", json!({"body": "buy less"}));
        let other = AdvertisementContent::new("ad-2", json!({"body": "buy more"}));
        assert_eq!(left, right);
        assert_ne!(left, other);
    }

    #[test]
    fn round_trips_through_json() {
        let content = AdvertisementContent::new("ad-1", serde_json::json!({"headline": "hi"}));
        let encoded = serde_json::to_string(&content).expect("content serializes");
        let decoded: AdvertisementContent =
            serde_json::from_str(&encoded).expect("content deserializes");
        assert_eq!(decoded, content);
        assert_eq!(decoded.render_content()["headline"], "hi");
    }
}
