//! Read-only lookup seams the selector is built against.
//!
//! Real deployments back these with a content store; tests and embedders
//! without one use the in-memory implementations in [`memory`].

pub mod memory;

pub use memory::{InMemoryContentLookup, InMemoryTargetingLookup};

use crate::core::errors::Result;
use crate::model::content::AdvertisementContent;
use crate::targeting::group::TargetingGroup;

/// Looks up the advertisements registered for a marketplace.
///
/// Pure read; must be safe to call concurrently. A missing marketplace is an
/// empty `Ok`, not an error.
pub trait ContentLookup: Send + Sync {
    /// Returns the ads for `marketplace_id`, or an empty vec if none.
    fn get(&self, marketplace_id: &str) -> Result<Vec<AdvertisementContent>>;
}

/// Looks up the targeting groups attached to one piece of ad content.
///
/// Same contract as [`ContentLookup`]: read-only, concurrent-safe, empty
/// `Ok` for unknown ids.
pub trait TargetingLookup: Send + Sync {
    /// Returns the targeting groups for `content_id`, or an empty vec if none.
    fn get(&self, content_id: &str) -> Result<Vec<TargetingGroup>>;
}
