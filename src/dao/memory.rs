//! HashMap-backed lookup implementations.

use std::collections::HashMap;

use crate::core::errors::Result;
use crate::dao::{ContentLookup, TargetingLookup};
use crate::model::content::AdvertisementContent;
use crate::targeting::group::TargetingGroup;

/// In-memory [`ContentLookup`] keyed by marketplace id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentLookup {
    contents: HashMap<String, Vec<AdvertisementContent>>,
}

impl InMemoryContentLookup {
    /// Builds a lookup from an explicit marketplace → ads table.
    #[must_use]
    pub fn new(contents: HashMap<String, Vec<AdvertisementContent>>) -> Self {
        Self { contents }
    }

    /// Registers one ad under a marketplace, appending to existing entries.
    pub fn insert(&mut self, marketplace_id: impl Into<String>, content: AdvertisementContent) {
        self.contents
            .entry(marketplace_id.into())
            .or_default()
            .push(content);
    }
}

impl ContentLookup for InMemoryContentLookup {
    fn get(&self, marketplace_id: &str) -> Result<Vec<AdvertisementContent>> {
        Ok(self.contents.get(marketplace_id).cloned().unwrap_or_default())
    }
}

/// In-memory [`TargetingLookup`] keyed by content id.
#[derive(Clone, Default)]
pub struct InMemoryTargetingLookup {
    groups: HashMap<String, Vec<TargetingGroup>>,
}

impl InMemoryTargetingLookup {
    /// Builds a lookup from an explicit content → groups table.
    #[must_use]
    pub fn new(groups: HashMap<String, Vec<TargetingGroup>>) -> Self {
        Self { groups }
    }

    /// Registers one targeting group under its content id.
    pub fn insert(&mut self, group: TargetingGroup) {
        self.groups
            .entry(group.content_id().to_string())
            .or_default()
            .push(group);
    }
}

impl TargetingLookup for InMemoryTargetingLookup {
    fn get(&self, content_id: &str) -> Result<Vec<TargetingGroup>> {
        Ok(self.groups.get(content_id).cloned().unwrap_or_default())
    }
}
