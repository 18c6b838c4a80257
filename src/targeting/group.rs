//! A conjunction of predicates plus a CTR, attached to one ad content.

use std::fmt;
use std::sync::Arc;

use crate::targeting::predicate::TargetingPredicate;

/// One targeting group: matches a request iff every predicate is TRUE.
///
/// A content id may carry several groups; the content is eligible if at
/// least one of them matches. `click_through_rate` is non-negative with no
/// assumed upper bound. Immutable for the duration of a request.
#[derive(Clone)]
pub struct TargetingGroup {
    content_id: String,
    click_through_rate: f64,
    predicates: Vec<Arc<dyn TargetingPredicate>>,
}

impl TargetingGroup {
    /// Creates a group for the given content.
    #[must_use]
    pub fn new(
        content_id: impl Into<String>,
        click_through_rate: f64,
        predicates: Vec<Arc<dyn TargetingPredicate>>,
    ) -> Self {
        Self {
            content_id: content_id.into(),
            click_through_rate,
            predicates,
        }
    }

    /// The content this group belongs to.
    #[must_use]
    pub fn content_id(&self) -> &str {
        &self.content_id
    }

    /// Historical click-through rate used as the ranking key.
    #[must_use]
    pub const fn click_through_rate(&self) -> f64 {
        self.click_through_rate
    }

    /// The predicates forming this group's conjunction.
    #[must_use]
    pub fn predicates(&self) -> &[Arc<dyn TargetingPredicate>] {
        &self.predicates
    }
}

impl fmt::Debug for TargetingGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetingGroup")
            .field("content_id", &self.content_id)
            .field("click_through_rate", &self.click_through_rate)
            .field("predicates", &self.predicates.len())
            .finish()
    }
}
