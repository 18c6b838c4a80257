//! The selection outcome: a chosen ad or the empty sentinel.

use serde::{Deserialize, Serialize};

use crate::model::content::AdvertisementContent;

/// Result of one selection call.
///
/// `Empty` is a concrete variant, not a null: callers discriminate by
/// matching, never by presence checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneratedAdvertisement {
    /// An eligible ad was found; carries the content to render.
    Selected(AdvertisementContent),
    /// No candidate survived targeting; the universal fallback.
    Empty,
}

impl GeneratedAdvertisement {
    /// True when no advertisement was chosen.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The chosen content, if any.
    #[must_use]
    pub const fn content(&self) -> Option<&AdvertisementContent> {
        match self {
            Self::Selected(content) => Some(content),
            Self::Empty => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GeneratedAdvertisement;
    use crate::model::content::AdvertisementContent;

    #[test]
    fn discriminates_by_variant() {
        let selected = GeneratedAdvertisement::Selected(AdvertisementContent::new(
            "ad-1",
            serde_json::json!({}),
        ));
        assert!(!selected.is_empty());
        assert_eq!(selected.content().map(AdvertisementContent::content_id), Some("ad-1"));

        let empty = GeneratedAdvertisement::Empty;
        assert!(empty.is_empty());
        assert!(empty.content().is_none());
    }
}
