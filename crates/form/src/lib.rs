//! Form session for Nameform
//!
//! Binds the name and location fields to the debounce -> validate pipeline,
//! combines synchronous required checks with the asynchronous name check,
//! and gates submission into the entry store.

pub mod config;
pub mod fields;
pub mod session;

pub use config::FormConfig;
pub use fields::{Field, FieldError, FieldErrors};
pub use session::{FormSession, FormView, SessionEvent, SessionUpdate, SubmitError};
