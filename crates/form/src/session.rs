//! Form session: field state, validation wiring and submit gating
//!
//! Name edits go through the debouncer; when it fires, the session issues a
//! validation through its race controller and spawns the remote call. Both
//! the debounce firing and the eventual response come back as events on the
//! session's own channel, so every state change happens on the task that
//! owns the session.

use crate::config::FormConfig;
use crate::fields::{Field, FieldError, FieldErrors};
use nameform_core::{Entry, LocationCatalog, LocationSource, NameValidator};
use nameform_store::EntryStore;
use nameform_validation::{
    Debouncer, RaceController, Settlement, ValidationPhase, ValidationResponse,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Internal work delivered to the session
#[derive(Debug)]
pub enum SessionEvent {
    /// The debounce window closed on this name
    ///
    /// `generation` identifies the edit that scheduled it; a later edit or
    /// reset makes the event obsolete even if it is already queued.
    NameSettled { generation: u64, name: String },
    /// A validation call came back
    Validated(ValidationResponse),
}

/// What applying an event did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    ValidationIssued { sequence: u64, candidate: String },
    ValidationSettled(Settlement),
}

/// Why a submit was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Name validation is still in progress")]
    Busy,

    #[error("Form has errors: {0}")]
    Invalid(FieldErrors),
}

/// Render-ready snapshot of the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub name: String,
    pub location: String,
    pub errors: FieldErrors,
    pub validating: bool,
    pub can_submit: bool,
    pub name_phase: ValidationPhase,
    pub locations: LocationCatalog,
}

/// One mounted instance of the form
pub struct FormSession {
    name: String,
    location: String,
    /// Required errors raised by blur or a submit attempt
    name_required: bool,
    location_required: bool,
    /// Bumped on every name edit and reset
    name_generation: u64,
    controller: RaceController,
    debouncer: Debouncer<(u64, String)>,
    catalog: LocationCatalog,
    store: EntryStore,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
}

impl FormSession {
    /// Mount a session, fetching the location catalog once
    ///
    /// A failed fetch is logged and leaves the catalog empty.
    pub async fn mount(
        config: &FormConfig,
        validator: Arc<dyn NameValidator>,
        locations: &dyn LocationSource,
        store: EntryStore,
    ) -> Self {
        let catalog = match locations.locations().await {
            Ok(list) => {
                debug!("loaded {} locations", list.len());
                LocationCatalog::new(list)
            }
            Err(e) => {
                error!("Failed to load locations: {}", e);
                LocationCatalog::empty()
            }
        };

        Self::with_catalog(config, validator, catalog, store)
    }

    /// Build a session around an already known catalog
    pub fn with_catalog(
        config: &FormConfig,
        validator: Arc<dyn NameValidator>,
        catalog: LocationCatalog,
        store: EntryStore,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let settled_tx = events_tx.clone();
        let debouncer =
            Debouncer::new(config.debounce(), move |(generation, name): (u64, String)| {
                let _ = settled_tx.send(SessionEvent::NameSettled { generation, name });
            });

        let controller =
            RaceController::new(validator).with_timeout(config.validation_timeout());

        Self {
            name: String::new(),
            location: String::new(),
            name_required: false,
            location_required: false,
            name_generation: 0,
            controller,
            debouncer,
            catalog,
            store,
            events_tx,
            events_rx,
        }
    }

    /// Name field edited
    ///
    /// A non-empty value clears the required error and (re)starts the
    /// debounce window. An empty value cancels any scheduled validation.
    pub fn change_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
        self.name_generation += 1;

        if is_blank(&self.name) {
            self.debouncer.cancel();
            return;
        }

        self.name_required = false;
        self.debouncer.trigger((self.name_generation, self.name.clone()));
    }

    /// Location field edited
    ///
    /// Any non-empty selection is accepted, listed in the catalog or not.
    pub fn change_location(&mut self, value: impl Into<String>) {
        self.location = value.into();

        if is_blank(&self.location) {
            return;
        }

        self.location_required = false;
        if !self.catalog.contains(&self.location) {
            debug!("location {:?} is not in the catalog", self.location);
        }
    }

    /// Field lost focus: raise the required error if it is empty
    pub fn blur(&mut self, field: Field) {
        match field {
            Field::Name => self.name_required |= is_blank(&self.name),
            Field::Location => self.location_required |= is_blank(&self.location),
        }
    }

    /// Try to submit the current values
    ///
    /// On success the entry is appended to the store, all errors are
    /// cleared and both fields reset to empty.
    pub fn submit(&mut self) -> Result<Entry, SubmitError> {
        if self.controller.is_busy() {
            return Err(SubmitError::Busy);
        }

        self.blur(Field::Name);
        self.blur(Field::Location);

        let errors = self.errors();
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }

        let entry = Entry::new(self.name.clone(), self.location.clone());
        self.store.append(entry.clone());
        info!("submitted {}", entry);

        self.reset_fields();
        Ok(entry)
    }

    /// Empty the entry store and reset the form
    ///
    /// Validations already in flight keep running and settle as usual.
    pub fn clear(&mut self) {
        self.store.clear_all();
        self.reset_fields();
        info!("cleared all entries");
    }

    fn reset_fields(&mut self) {
        self.name_generation += 1;
        self.debouncer.cancel();
        self.name.clear();
        self.location.clear();
        self.name_required = false;
        self.location_required = false;
        self.controller.clear_error();
    }

    /// Wait for the next internal event
    ///
    /// Cancel-safe, so it can sit in a `select!` next to user input.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events_rx.recv().await
    }

    /// Apply one internal event
    ///
    /// Returns `None` for a debounce firing that a later edit or reset has
    /// superseded; no validation is issued for it.
    pub fn apply(&mut self, event: SessionEvent) -> Option<SessionUpdate> {
        let update = match event {
            SessionEvent::NameSettled {
                generation,
                name: candidate,
            } => {
                if generation != self.name_generation {
                    debug!("discarded superseded debounce for {:?}", candidate);
                    return None;
                }

                let pending = self.controller.validate(candidate.clone());
                let sequence = self.controller.state().highest_issued();

                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    let response = pending.await;
                    let _ = tx.send(SessionEvent::Validated(response));
                });

                SessionUpdate::ValidationIssued {
                    sequence,
                    candidate,
                }
            }
            SessionEvent::Validated(response) => {
                SessionUpdate::ValidationSettled(self.controller.resolve(response))
            }
        };

        Some(update)
    }

    /// Whether a debounce timer or a validation call is still outstanding
    pub fn has_pending_work(&self) -> bool {
        self.debouncer.is_pending() || self.controller.outstanding() > 0
    }

    /// Process events until no timer is scheduled and no call is in flight
    pub async fn settle(&mut self) -> Vec<SessionUpdate> {
        let mut updates = Vec::new();

        loop {
            while let Ok(event) = self.events_rx.try_recv() {
                updates.extend(self.apply(event));
            }

            if !self.has_pending_work() {
                // A timer may have fired between the drain and the check
                match self.events_rx.try_recv() {
                    Ok(event) => {
                        updates.extend(self.apply(event));
                        continue;
                    }
                    Err(_) => break,
                }
            }

            match self.events_rx.recv().await {
                Some(event) => updates.extend(self.apply(event)),
                None => break,
            }
        }

        updates
    }

    /// Errors currently shown under each field
    pub fn errors(&self) -> FieldErrors {
        let name = if self.name_required {
            Some(FieldError::Required(Field::Name))
        } else if self.controller.field_error().is_some() {
            Some(FieldError::Taken)
        } else {
            None
        };

        let location = self
            .location_required
            .then_some(FieldError::Required(Field::Location));

        FieldErrors { name, location }
    }

    /// No field error and no validation in flight
    pub fn can_submit(&self) -> bool {
        self.errors().is_empty() && !self.controller.is_busy()
    }

    /// True while the latest name validation is unresolved
    pub fn is_validating(&self) -> bool {
        self.controller.is_busy()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn name_phase(&self) -> &ValidationPhase {
        self.controller.phase()
    }

    pub fn catalog(&self) -> &LocationCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn view(&self) -> FormView {
        FormView {
            name: self.name.clone(),
            location: self.location.clone(),
            errors: self.errors(),
            validating: self.is_validating(),
            can_submit: self.can_submit(),
            name_phase: self.name_phase().clone(),
            locations: self.catalog.clone(),
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
