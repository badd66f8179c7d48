//! Race-guard bookkeeping for one validated field
//!
//! Every validation gets a sequence id from a counter that only grows. A
//! response may change the field only if it carries the highest id issued
//! so far; anything older is stale and dropped untouched, whatever order
//! the responses arrive in.

use nameform_core::GatewayError;
use serde::Serialize;
use std::collections::BTreeSet;

/// Message shown when the remote directory reports the name as taken
pub const TAKEN_MESSAGE: &str = "The name has already been taken";

/// Observable validation status of a field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum ValidationPhase {
    /// Nothing issued yet, or no decision was reached
    #[default]
    Idle,
    /// Waiting on the request with this sequence id
    Pending(u64),
    Valid,
    Invalid(String),
}

/// One issued validation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRequest {
    pub sequence: u64,
    pub candidate: String,
}

/// Answer to a validation call, tagged with the id it was issued under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResponse {
    pub sequence: u64,
    pub candidate: String,
    pub outcome: Result<bool, GatewayError>,
}

/// What settling a response did to the field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// The response was current and decided the field state
    Applied {
        sequence: u64,
        phase: ValidationPhase,
    },
    /// A newer request exists; the response was dropped
    Stale { sequence: u64, latest: u64 },
}

impl Settlement {
    pub fn is_stale(&self) -> bool {
        matches!(self, Settlement::Stale { .. })
    }
}

/// Sequence counter plus the last-resolved marker for one field
///
/// Owned by a single task; nothing here is shared or locked.
#[derive(Debug, Clone)]
pub struct ValidationState {
    /// Id handed to the next request (starts at 1)
    next_sequence: u64,
    /// Highest id issued so far, 0 before the first request
    highest_issued: u64,
    /// Highest id whose response was applied
    highest_resolved: u64,
    /// Ids issued whose response has not come back, stale ones included
    in_flight: BTreeSet<u64>,
    field_error: Option<String>,
    phase: ValidationPhase,
}

impl Default for ValidationState {
    fn default() -> Self {
        Self {
            next_sequence: 1,
            highest_issued: 0,
            highest_resolved: 0,
            in_flight: BTreeSet::new(),
            field_error: None,
            phase: ValidationPhase::Idle,
        }
    }
}

impl ValidationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a request for `candidate`
    ///
    /// Marks the field busy and clears its error.
    pub fn begin(&mut self, candidate: impl Into<String>) -> ValidationRequest {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        self.highest_issued = sequence;
        self.in_flight.insert(sequence);
        self.field_error = None;
        self.phase = ValidationPhase::Pending(sequence);

        ValidationRequest {
            sequence,
            candidate: candidate.into(),
        }
    }

    /// Fold a response into the field state
    ///
    /// Only the response for the highest issued id is applied. A transport
    /// failure decides nothing: the field goes back to `Idle` without an
    /// error, but it still counts as the resolution of that request.
    pub fn settle(&mut self, response: ValidationResponse) -> Settlement {
        let sequence = response.sequence;

        // Repeats and ids never issued are dropped without touching the count
        let was_in_flight = self.in_flight.remove(&sequence);
        if !was_in_flight || sequence != self.highest_issued {
            return Settlement::Stale {
                sequence,
                latest: self.highest_issued,
            };
        }

        self.highest_resolved = sequence;
        self.phase = match response.outcome {
            Ok(true) => {
                self.field_error = None;
                ValidationPhase::Valid
            }
            Ok(false) => {
                self.field_error = Some(TAKEN_MESSAGE.to_string());
                ValidationPhase::Invalid(TAKEN_MESSAGE.to_string())
            }
            Err(_) => ValidationPhase::Idle,
        };

        Settlement::Applied {
            sequence,
            phase: self.phase.clone(),
        }
    }

    /// Drop the field error without touching in-flight bookkeeping
    ///
    /// A pending request stays pending and will still be settled.
    pub fn clear_error(&mut self) {
        self.field_error = None;
        if !matches!(self.phase, ValidationPhase::Pending(_)) {
            self.phase = ValidationPhase::Idle;
        }
    }

    /// True while the latest issued request has not been resolved
    pub fn is_busy(&self) -> bool {
        self.highest_resolved < self.highest_issued
    }

    pub fn field_error(&self) -> Option<&str> {
        self.field_error.as_deref()
    }

    pub fn phase(&self) -> &ValidationPhase {
        &self.phase
    }

    pub fn highest_issued(&self) -> u64 {
        self.highest_issued
    }

    pub fn highest_resolved(&self) -> u64 {
        self.highest_resolved
    }

    pub fn outstanding(&self) -> usize {
        self.in_flight.len()
    }
}
