//! Marketplace advertisement selection.
//!
//! Given a (customer, marketplace) pair, the pipeline fetches candidate ads,
//! evaluates each candidate's targeting groups concurrently against the
//! request, and returns the eligible ad with the highest historical
//! click-through rate — or [`model::GeneratedAdvertisement::Empty`] when
//! nothing qualifies.
//!
//! The two storage seams ([`dao::ContentLookup`], [`dao::TargetingLookup`])
//! and the predicate capability ([`targeting::TargetingPredicate`]) are
//! traits; everything behind them is a collaborator, not part of this crate.
//!
//! ```
//! use std::sync::Arc;
//!
//! use ad_selector::dao::{InMemoryContentLookup, InMemoryTargetingLookup};
//! use ad_selector::model::AdvertisementContent;
//! use ad_selector::selection::AdSelector;
//! use ad_selector::targeting::TargetingGroup;
//!
//! let mut contents = InMemoryContentLookup::default();
//! contents.insert("US", AdvertisementContent::new("ad-1", serde_json::json!({"body": "hi"})));
//! let mut targeting = InMemoryTargetingLookup::default();
//! targeting.insert(TargetingGroup::new("ad-1", 0.2, Vec::new()));
//!
//! let selector = AdSelector::new(Arc::new(contents), Arc::new(targeting));
//! let ad = selector.select_advertisement(Some("customer-1"), "US");
//! assert_eq!(ad.content().map(|c| c.content_id()), Some("ad-1"));
//! ```

pub mod core;
pub mod dao;
pub mod model;
pub mod selection;
pub mod targeting;
