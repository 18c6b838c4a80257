//! Targeting rules: predicate capability, group conjunctions, and the
//! concurrent evaluator that decides whether a group matches a request.

pub mod evaluator;
pub mod group;
pub mod predicate;

pub use evaluator::{TargetingEvaluator, EVALUATION_DEADLINE};
pub use group::TargetingGroup;
pub use predicate::{FixedPredicate, PredicateFn, TargetingPredicate, TargetingPredicateResult};
