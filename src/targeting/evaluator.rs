//! Concurrent conjunction evaluation with a bounded overall deadline.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, RecvTimeoutError};
use tracing::warn;

use crate::model::context::RequestContext;
use crate::targeting::group::TargetingGroup;
use crate::targeting::predicate::TargetingPredicateResult;

/// Overall per-group wait for predicate fan-out. Predicates that have not
/// reported by then count as non-TRUE and the group resolves to FALSE.
pub const EVALUATION_DEADLINE: Duration = Duration::from_millis(11_000);

/// Evaluates targeting groups against one request context.
///
/// Bound to a single [`RequestContext`] for its lifetime; one instance is
/// built per selection call and discarded with it.
#[derive(Debug, Clone)]
pub struct TargetingEvaluator {
    context: Arc<RequestContext>,
    deadline: Duration,
}

impl TargetingEvaluator {
    /// Creates an evaluator with the production deadline.
    #[must_use]
    pub fn new(context: RequestContext) -> Self {
        Self::with_deadline(context, EVALUATION_DEADLINE)
    }

    /// Creates an evaluator with an explicit deadline. Tests use short
    /// deadlines to exercise the timeout path in milliseconds.
    #[must_use]
    pub fn with_deadline(context: RequestContext, deadline: Duration) -> Self {
        Self {
            context: Arc::new(context),
            deadline,
        }
    }

    /// The request context this evaluator is bound to.
    #[must_use]
    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Decides whether every predicate in `group` holds for the bound
    /// request context.
    ///
    /// Returns TRUE iff all predicates report TRUE within the deadline; a
    /// group with no predicates is trivially TRUE. All predicates are
    /// launched up front — no short-circuit on the first FALSE — so the
    /// combined result cannot depend on scheduling order. A predicate panic
    /// counts as `Indeterminate` for that predicate; a timed-out or
    /// interrupted wait logs and resolves the group to FALSE. This method
    /// never fails loudly.
    #[must_use]
    pub fn evaluate(&self, group: &TargetingGroup) -> TargetingPredicateResult {
        let predicates = group.predicates();
        if predicates.is_empty() {
            return TargetingPredicateResult::True;
        }

        let (sender, receiver) = bounded::<TargetingPredicateResult>(predicates.len());
        for predicate in predicates {
            let predicate = Arc::clone(predicate);
            let context = Arc::clone(&self.context);
            let sender = sender.clone();
            let worker_sender = sender.clone();
            let worker = thread::Builder::new()
                .name("targeting-predicate".to_string())
                .spawn(move || {
                    let result =
                        panic::catch_unwind(AssertUnwindSafe(|| predicate.evaluate(&context)))
                            .unwrap_or(TargetingPredicateResult::Indeterminate);
                    // Receiver may already have given up; nothing to do then.
                    let _ = worker_sender.send(result);
                });
            if worker.is_err() {
                // Could not even start the worker; its slot stays unfilled
                // unless we report for it.
                let _ = sender.send(TargetingPredicateResult::Indeterminate);
            }
        }
        drop(sender);

        let deadline = Instant::now() + self.deadline;
        let mut results = Vec::with_capacity(predicates.len());
        while results.len() < predicates.len() {
            match receiver.recv_deadline(deadline) {
                Ok(result) => results.push(result),
                Err(RecvTimeoutError::Timeout) => {
                    warn!(
                        marketplace_id = self.context.marketplace_id(),
                        content_id = group.content_id(),
                        outstanding = predicates.len() - results.len(),
                        "predicate evaluation missed the deadline; group resolves to FALSE"
                    );
                    return TargetingPredicateResult::False;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    warn!(
                        content_id = group.content_id(),
                        "predicate evaluation interrupted; group resolves to FALSE"
                    );
                    return TargetingPredicateResult::False;
                }
            }
        }

        if results.iter().all(|result| result.is_true()) {
            TargetingPredicateResult::True
        } else {
            TargetingPredicateResult::False
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use super::{TargetingEvaluator, EVALUATION_DEADLINE};
    use crate::model::context::RequestContext;
    use crate::targeting::group::TargetingGroup;
    use crate::targeting::predicate::{
        FixedPredicate, PredicateFn, TargetingPredicate, TargetingPredicateResult,
    };

    fn context() -> RequestContext {
        RequestContext::new(Some("c1"), "US").expect("valid context")
    }

    fn fixed(result: TargetingPredicateResult) -> Arc<dyn TargetingPredicate> {
        Arc::new(FixedPredicate(result))
    }

    #[test]
    fn production_deadline_is_eleven_seconds() {
        assert_eq!(EVALUATION_DEADLINE, Duration::from_millis(11_000));
    }

    #[test]
    fn empty_group_is_trivially_true() {
        let evaluator = TargetingEvaluator::new(context());
        let group = TargetingGroup::new("ad-1", 0.1, Vec::new());
        assert_eq!(evaluator.evaluate(&group), TargetingPredicateResult::True);
    }

    #[test]
    fn all_true_predicates_satisfy_the_group() {
        let evaluator = TargetingEvaluator::new(context());
        let group = TargetingGroup::new(
            "ad-1",
            0.1,
            vec![
                fixed(TargetingPredicateResult::True),
                fixed(TargetingPredicateResult::True),
                fixed(TargetingPredicateResult::True),
            ],
        );
        assert_eq!(evaluator.evaluate(&group), TargetingPredicateResult::True);
    }

    #[test]
    fn wide_fan_out_collects_every_worker_result() {
        let evaluator = TargetingEvaluator::new(context());
        // One spoiler buried among many fast TRUE predicates: the group
        // must drain all worker sends and still resolve to FALSE.
        let mut predicates: Vec<Arc<dyn TargetingPredicate>> = (0..31)
            .map(|_| fixed(TargetingPredicateResult::True))
            .collect();
        predicates.push(fixed(TargetingPredicateResult::False));
        let group = TargetingGroup::new("ad-1", 0.1, predicates);
        assert_eq!(evaluator.evaluate(&group), TargetingPredicateResult::False);

        let all_true: Vec<Arc<dyn TargetingPredicate>> = (0..32)
            .map(|_| fixed(TargetingPredicateResult::True))
            .collect();
        let group = TargetingGroup::new("ad-1", 0.1, all_true);
        assert_eq!(evaluator.evaluate(&group), TargetingPredicateResult::True);
    }

    #[test]
    fn any_non_true_predicate_fails_the_group() {
        let evaluator = TargetingEvaluator::new(context());
        for spoiler in [
            TargetingPredicateResult::False,
            TargetingPredicateResult::Indeterminate,
        ] {
            let group = TargetingGroup::new(
                "ad-1",
                0.1,
                vec![fixed(TargetingPredicateResult::True), fixed(spoiler)],
            );
            assert_eq!(evaluator.evaluate(&group), TargetingPredicateResult::False);
        }
    }

    #[test]
    fn panicking_predicate_counts_as_indeterminate() {
        let evaluator = TargetingEvaluator::new(context());
        let group = TargetingGroup::new(
            "ad-1",
            0.1,
            vec![Arc::new(PredicateFn(|_: &RequestContext| {
                panic!("predicate blew up")
            }))],
        );
        assert_eq!(evaluator.evaluate(&group), TargetingPredicateResult::False);
    }

    #[test]
    fn slow_predicate_misses_the_deadline() {
        let evaluator = TargetingEvaluator::with_deadline(context(), Duration::from_millis(50));
        let group = TargetingGroup::new(
            "ad-1",
            0.1,
            vec![
                fixed(TargetingPredicateResult::True),
                Arc::new(PredicateFn(|_: &RequestContext| {
                    std::thread::sleep(Duration::from_millis(500));
                    TargetingPredicateResult::True
                })),
            ],
        );
        let started = Instant::now();
        assert_eq!(evaluator.evaluate(&group), TargetingPredicateResult::False);
        assert!(started.elapsed() < Duration::from_millis(450));
    }

    #[test]
    fn predicates_run_concurrently_not_serially() {
        let evaluator = TargetingEvaluator::with_deadline(context(), Duration::from_secs(5));
        let predicates: Vec<Arc<dyn TargetingPredicate>> = (0..4)
            .map(|_| {
                Arc::new(PredicateFn(|_: &RequestContext| {
                    std::thread::sleep(Duration::from_millis(100));
                    TargetingPredicateResult::True
                })) as Arc<dyn TargetingPredicate>
            })
            .collect();
        let group = TargetingGroup::new("ad-1", 0.1, predicates);
        let started = Instant::now();
        assert_eq!(evaluator.evaluate(&group), TargetingPredicateResult::True);
        // Four 100ms predicates in series would take 400ms.
        assert!(started.elapsed() < Duration::from_millis(350));
    }
}
