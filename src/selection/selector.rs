//! Orchestration: fetch candidates, evaluate targeting, rank by CTR.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, warn};

use crate::core::config::SelectorConfig;
use crate::dao::{ContentLookup, TargetingLookup};
use crate::model::advertisement::GeneratedAdvertisement;
use crate::model::content::AdvertisementContent;
use crate::model::context::RequestContext;
use crate::selection::ordering;
use crate::targeting::evaluator::TargetingEvaluator;
use crate::targeting::group::TargetingGroup;

/// Picks the advertisement to render for a (customer, marketplace) pair.
///
/// Both lookups are injected at construction; the selector never builds its
/// own collaborators. Stateless across calls: every invocation fetches,
/// evaluates, and ranks from scratch, then drops all intermediates.
pub struct AdSelector {
    content_lookup: Arc<dyn ContentLookup>,
    targeting_lookup: Arc<dyn TargetingLookup>,
    config: SelectorConfig,
    random: Mutex<Box<dyn RngCore + Send>>,
}

impl AdSelector {
    /// Creates a selector with the default configuration.
    #[must_use]
    pub fn new(
        content_lookup: Arc<dyn ContentLookup>,
        targeting_lookup: Arc<dyn TargetingLookup>,
    ) -> Self {
        Self::with_config(content_lookup, targeting_lookup, SelectorConfig::default())
    }

    /// Creates a selector with explicit tunables.
    #[must_use]
    pub fn with_config(
        content_lookup: Arc<dyn ContentLookup>,
        targeting_lookup: Arc<dyn TargetingLookup>,
        config: SelectorConfig,
    ) -> Self {
        Self {
            content_lookup,
            targeting_lookup,
            config,
            random: Mutex::new(Box::new(StdRng::from_os_rng())),
        }
    }

    /// Replaces the injected random source.
    ///
    /// The seat exists for future weighted selection; the current ranking
    /// rule is deterministic and never draws from it.
    pub fn set_random(&mut self, random: Box<dyn RngCore + Send>) {
        self.random = Mutex::new(random);
    }

    /// The injected random source.
    #[must_use]
    pub const fn random(&self) -> &Mutex<Box<dyn RngCore + Send>> {
        &self.random
    }

    /// Selects the eligible advertisement with the highest click-through
    /// rate for this customer and marketplace.
    ///
    /// Total over its inputs: every failure mode — empty marketplace id,
    /// lookup failure, no candidates, no satisfied targeting group —
    /// collapses to [`GeneratedAdvertisement::Empty`]. Never returns an
    /// error and never panics on collaborator misbehavior.
    #[must_use]
    pub fn select_advertisement(
        &self,
        customer_id: Option<&str>,
        marketplace_id: &str,
    ) -> GeneratedAdvertisement {
        let context = match RequestContext::new(customer_id, marketplace_id) {
            Ok(context) => context,
            Err(err) => {
                warn!(error = %err, "marketplace id must not be empty; returning empty ad");
                return GeneratedAdvertisement::Empty;
            }
        };

        let contents = self.fetch_contents(marketplace_id);
        if contents.is_empty() {
            return GeneratedAdvertisement::Empty;
        }

        let evaluator =
            TargetingEvaluator::with_deadline(context, self.config.evaluation_deadline());

        let all_groups = self.fetch_groups(&contents);
        let eligible: Vec<&TargetingGroup> = all_groups
            .iter()
            .filter(|group| evaluator.evaluate(group).is_true())
            .collect();
        if eligible.is_empty() {
            return GeneratedAdvertisement::Empty;
        }

        let reference = ordering::reference_sequence(&eligible);
        let mut candidates: Vec<AdvertisementContent> = contents
            .into_iter()
            .filter(|content| {
                eligible
                    .iter()
                    .any(|group| group.content_id() == content.content_id())
            })
            .collect();
        ordering::sort_by_reference(&mut candidates, &reference);

        // Groups pointing at content ids the marketplace never returned are
        // ignored; if nothing survives the restriction there is no winner.
        match candidates.pop() {
            Some(winner) => GeneratedAdvertisement::Selected(winner),
            None => GeneratedAdvertisement::Empty,
        }
    }

    fn fetch_contents(&self, marketplace_id: &str) -> Vec<AdvertisementContent> {
        self.content_lookup.get(marketplace_id).unwrap_or_else(|err| {
            debug!(marketplace_id, error = %err, "content lookup failed; treating as no candidates");
            Vec::new()
        })
    }

    fn fetch_groups(&self, contents: &[AdvertisementContent]) -> Vec<TargetingGroup> {
        let mut groups = Vec::new();
        for content in contents {
            match self.targeting_lookup.get(content.content_id()) {
                Ok(found) => groups.extend(found),
                Err(err) => {
                    debug!(
                        content_id = content.content_id(),
                        error = %err,
                        "targeting lookup failed; treating as no groups"
                    );
                }
            }
        }
        groups
    }
}
