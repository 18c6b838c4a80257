//! The predicate capability and its three-valued result.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::context::RequestContext;

/// Outcome of evaluating one predicate against a request.
///
/// Three-valued on purpose: `Indeterminate` is a real state (a data store
/// the predicate consults was unreachable, a panic was caught), not a
/// boolean with a side channel. Only `True` counts as satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetingPredicateResult {
    /// The request satisfies the predicate.
    True,
    /// The request does not satisfy the predicate.
    False,
    /// The predicate could not be decided; treated as non-TRUE.
    Indeterminate,
}

impl TargetingPredicateResult {
    /// True only for the `True` variant.
    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::True)
    }
}

/// The single capability targeting predicates expose.
///
/// Variants (age bands, parental status, purchase categories, ...) live
/// outside this crate; the pipeline depends on nothing but `evaluate`.
/// Implementations must be thread-safe: the evaluator runs them on worker
/// threads.
pub trait TargetingPredicate: Send + Sync {
    /// Decides this predicate for the given request.
    fn evaluate(&self, context: &RequestContext) -> TargetingPredicateResult;
}

/// A predicate that always returns the same result. Handy for wiring and
/// indispensable in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedPredicate(pub TargetingPredicateResult);

impl TargetingPredicate for FixedPredicate {
    fn evaluate(&self, _context: &RequestContext) -> TargetingPredicateResult {
        self.0
    }
}

/// Adapts a closure into a [`TargetingPredicate`].
pub struct PredicateFn<F>(pub F);

impl<F> TargetingPredicate for PredicateFn<F>
where
    F: Fn(&RequestContext) -> TargetingPredicateResult + Send + Sync,
{
    fn evaluate(&self, context: &RequestContext) -> TargetingPredicateResult {
        (self.0)(context)
    }
}

impl<F> fmt::Debug for PredicateFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PredicateFn")
    }
}
