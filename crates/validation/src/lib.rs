//! Asynchronous name validation for Nameform
//!
//! This crate provides:
//! - Trailing-edge debouncing with an owned, abortable timer
//! - Sequence-tagged validation requests
//! - Stale-response detection (last issued wins, whatever the arrival order)
//! - Busy tracking that only the latest request can clear

pub mod controller;
pub mod debounce;
pub mod state;

pub use controller::{PendingValidation, RaceController};
pub use debounce::Debouncer;
pub use state::{
    Settlement, ValidationPhase, ValidationRequest, ValidationResponse, ValidationState,
    TAKEN_MESSAGE,
};
