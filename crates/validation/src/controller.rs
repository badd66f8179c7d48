//! Validation race controller
//!
//! Issues remote name checks and folds their answers back into a
//! `ValidationState`. Issuing is split from awaiting so that the owner can
//! spawn the remote call and keep handling input while it runs; responses
//! come back through `resolve` in whatever order the network delivers them.

use crate::state::{Settlement, ValidationPhase, ValidationResponse, ValidationState};
use futures::future::{BoxFuture, FutureExt};
use nameform_core::{GatewayError, NameValidator};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// A validation call in flight, yielding its tagged response
///
/// Holds no borrow of the controller, so it can be spawned.
pub type PendingValidation = BoxFuture<'static, ValidationResponse>;

/// Owns the race-guard state for one field and the gateway it validates with
pub struct RaceController {
    state: ValidationState,
    validator: Arc<dyn NameValidator>,
    timeout: Option<Duration>,
}

impl RaceController {
    pub fn new(validator: Arc<dyn NameValidator>) -> Self {
        Self {
            state: ValidationState::new(),
            validator,
            timeout: None,
        }
    }

    /// Bound each remote call; an elapsed call counts as a transport failure
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Issue a validation for `candidate`
    ///
    /// The field turns busy and loses its error immediately. The returned
    /// future performs the remote call; hand its output to `resolve`.
    pub fn validate(&mut self, candidate: impl Into<String>) -> PendingValidation {
        let request = self.state.begin(candidate);
        debug!(
            "issued validation #{} for {:?} ({} outstanding)",
            request.sequence,
            request.candidate,
            self.state.outstanding()
        );

        let validator = Arc::clone(&self.validator);
        let timeout = self.timeout;

        async move {
            let call = validator.is_name_valid(&request.candidate);
            let outcome = match timeout {
                Some(limit) => match tokio::time::timeout(limit, call).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(GatewayError::Timeout(
                        u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                    )),
                },
                None => call.await,
            };

            ValidationResponse {
                sequence: request.sequence,
                candidate: request.candidate,
                outcome,
            }
        }
        .boxed()
    }

    /// Fold a response into the field state, dropping it if stale
    pub fn resolve(&mut self, response: ValidationResponse) -> Settlement {
        if let Err(e) = &response.outcome {
            warn!(
                "validation #{} for {:?} failed: {}",
                response.sequence, response.candidate, e
            );
        }

        let candidate = response.candidate.clone();
        let settlement = self.state.settle(response);

        match &settlement {
            Settlement::Stale { sequence, latest } => {
                debug!(
                    "dropped stale validation #{} for {:?} (latest is #{})",
                    sequence, candidate, latest
                );
            }
            Settlement::Applied { sequence, phase } => match phase {
                ValidationPhase::Valid => info!("#{} {:?} is available", sequence, candidate),
                ValidationPhase::Invalid(_) => info!("#{} {:?} is taken", sequence, candidate),
                _ => debug!("#{} {:?} left undecided", sequence, candidate),
            },
        }

        settlement
    }

    /// Issue, await and resolve in one step
    pub async fn validate_now(&mut self, candidate: impl Into<String>) -> Settlement {
        let pending = self.validate(candidate);
        let response = pending.await;
        self.resolve(response)
    }

    /// Drop the field error, keeping in-flight requests outstanding
    pub fn clear_error(&mut self) {
        self.state.clear_error();
    }

    pub fn state(&self) -> &ValidationState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn field_error(&self) -> Option<&str> {
        self.state.field_error()
    }

    pub fn phase(&self) -> &ValidationPhase {
        self.state.phase()
    }

    pub fn outstanding(&self) -> usize {
        self.state.outstanding()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TAKEN_MESSAGE;
    use async_trait::async_trait;

    /// Answers immediately: names in `taken` are rejected, "boom" fails
    struct FakeDirectory {
        taken: Vec<&'static str>,
    }

    #[async_trait]
    impl NameValidator for FakeDirectory {
        async fn is_name_valid(&self, name: &str) -> Result<bool, GatewayError> {
            if name == "boom" {
                return Err(GatewayError::Transport("connection refused".into()));
            }
            Ok(!self.taken.contains(&name))
        }
    }

    /// Never answers
    struct HangingDirectory;

    #[async_trait]
    impl NameValidator for HangingDirectory {
        async fn is_name_valid(&self, _name: &str) -> Result<bool, GatewayError> {
            std::future::pending().await
        }
    }

    fn controller() -> RaceController {
        RaceController::new(Arc::new(FakeDirectory {
            taken: vec!["eve", "mallory"],
        }))
    }

    #[tokio::test]
    async fn test_validate_now_available() {
        let mut controller = controller();

        let settlement = controller.validate_now("bob").await;

        assert_eq!(
            settlement,
            Settlement::Applied {
                sequence: 1,
                phase: ValidationPhase::Valid
            }
        );
        assert!(!controller.is_busy());
        assert_eq!(controller.field_error(), None);
    }

    #[tokio::test]
    async fn test_validate_now_taken() {
        let mut controller = controller();

        controller.validate_now("eve").await;

        assert_eq!(controller.field_error(), Some(TAKEN_MESSAGE));
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_busy_until_response_resolved() {
        let mut controller = controller();

        let pending = controller.validate("bob");
        assert!(controller.is_busy());
        assert_eq!(controller.phase(), &ValidationPhase::Pending(1));

        let response = pending.await;
        assert!(controller.is_busy());

        controller.resolve(response);
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_responses_arriving_3_1_2() {
        let mut controller = controller();

        let p1 = controller.validate("e");
        let p2 = controller.validate("ev");
        let p3 = controller.validate("eve");

        let r3 = p3.await;
        let r1 = p1.await;
        let r2 = p2.await;

        assert!(!controller.resolve(r3).is_stale());
        assert!(controller.resolve(r1).is_stale());
        assert!(controller.resolve(r2).is_stale());

        assert_eq!(controller.field_error(), Some(TAKEN_MESSAGE));
        assert!(!controller.is_busy());
        assert_eq!(controller.outstanding(), 0);
    }

    #[tokio::test]
    async fn test_older_response_cannot_clear_busy() {
        let mut controller = controller();

        let p1 = controller.validate("eve");
        let p2 = controller.validate("bob");

        let settlement = controller.resolve(p1.await);
        assert_eq!(settlement, Settlement::Stale { sequence: 1, latest: 2 });
        assert!(controller.is_busy());
        assert_eq!(controller.field_error(), None);

        controller.resolve(p2.await);
        assert!(!controller.is_busy());
        assert_eq!(controller.phase(), &ValidationPhase::Valid);
    }

    #[tokio::test]
    async fn test_transport_failure_sets_no_error() {
        let mut controller = controller();

        let settlement = controller.validate_now("boom").await;

        assert_eq!(
            settlement,
            Settlement::Applied {
                sequence: 1,
                phase: ValidationPhase::Idle
            }
        );
        assert_eq!(controller.field_error(), None);
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_new_validation_clears_taken_error() {
        let mut controller = controller();
        controller.validate_now("eve").await;
        assert!(controller.field_error().is_some());

        let _pending = controller.validate("bob");

        assert_eq!(controller.field_error(), None);
        assert!(controller.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_counts_as_failure() {
        let mut controller = RaceController::new(Arc::new(HangingDirectory))
            .with_timeout(Some(Duration::from_millis(250)));

        let response = controller.validate("bob").await;
        assert_eq!(response.outcome, Err(GatewayError::Timeout(250)));

        controller.resolve(response);
        assert!(!controller.is_busy());
        assert_eq!(controller.field_error(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_timeout_leaves_hung_call_pending() {
        let mut controller = RaceController::new(Arc::new(HangingDirectory));

        let pending = controller.validate("bob");
        let raced = tokio::time::timeout(Duration::from_secs(3600), pending).await;

        assert!(raced.is_err());
        assert!(controller.is_busy());
    }
}
