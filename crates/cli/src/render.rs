//! Terminal rendering of the form and the entry list
//!
//! Plain mode prints coloured human-readable lines; JSON mode prints one
//! JSON object per line.

use nameform_core::{Entry, LocationCatalog};
use nameform_form::{FormView, SessionUpdate, SubmitError};
use nameform_store::ListRow;
use nameform_validation::{Settlement, ValidationPhase};
use owo_colors::OwoColorize;
use serde_json::json;

/// Input commands and what they do
const COMMANDS: [(&str, &str); 11] = [
    ("name [value]", "edit the name field (empty value clears it)"),
    ("location [value]", "edit the location field"),
    ("blur name|location", "leave a field"),
    ("submit", "add the entry"),
    ("clear", "remove all entries and reset the form"),
    ("wait", "wait for pending validation"),
    ("status", "show the form"),
    ("list", "show the entries"),
    ("locations", "show the location options"),
    ("help", "show this list"),
    ("quit", "exit immediately"),
];

pub struct Printer {
    json: bool,
}

impl Printer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn emit(&self, value: serde_json::Value) {
        println!("{}", value);
    }

    pub fn catalog(&self, catalog: &LocationCatalog) {
        if self.json {
            self.emit(json!({ "event": "locations", "locations": catalog }));
            return;
        }

        if catalog.is_empty() {
            println!("{}", "No locations available".dimmed());
        } else {
            println!("{} {}", "Locations:".bold(), catalog.options().join(", "));
        }
    }

    pub fn update(&self, update: &SessionUpdate) {
        match update {
            SessionUpdate::ValidationIssued { sequence, candidate } => {
                if self.json {
                    self.emit(json!({
                        "event": "validation_issued",
                        "sequence": sequence,
                        "candidate": candidate,
                    }));
                } else {
                    println!(
                        "{}",
                        format!("Validating {:?} (#{})...", candidate, sequence).dimmed()
                    );
                }
            }
            SessionUpdate::ValidationSettled(Settlement::Stale { sequence, latest }) => {
                if self.json {
                    self.emit(json!({
                        "event": "validation_stale",
                        "sequence": sequence,
                        "latest": latest,
                    }));
                } else {
                    println!(
                        "{}",
                        format!("Dropped stale response #{} (latest is #{})", sequence, latest)
                            .dimmed()
                    );
                }
            }
            SessionUpdate::ValidationSettled(Settlement::Applied { sequence, phase }) => {
                if self.json {
                    self.emit(json!({
                        "event": "validation_settled",
                        "sequence": sequence,
                        "phase": phase,
                    }));
                    return;
                }

                match phase {
                    ValidationPhase::Valid => println!("{} Name is available", "✓".green()),
                    ValidationPhase::Invalid(message) => println!("{} {}", "✗".red(), message.red()),
                    _ => println!(
                        "{}",
                        "Could not validate the name, it was neither accepted nor rejected"
                            .yellow()
                    ),
                }
            }
        }
    }

    pub fn submitted(&self, entry: &Entry) {
        if self.json {
            self.emit(json!({ "event": "submitted", "entry": entry }));
        } else {
            println!("{} Added {}", "✓".green(), entry);
        }
    }

    pub fn rejected(&self, err: &SubmitError) {
        if self.json {
            self.emit(json!({ "event": "rejected", "reason": err.to_string() }));
        } else {
            println!("{} {}", "✗".red(), err.to_string().red());
        }
    }

    pub fn cleared(&self) {
        if self.json {
            self.emit(json!({ "event": "cleared" }));
        } else {
            println!("{} Cleared all entries", "✓".green());
        }
    }

    pub fn status(&self, view: &FormView) {
        if self.json {
            self.emit(json!({ "event": "status", "form": view }));
            return;
        }

        println!("{}", "Names Form".bold());
        println!("  {:<10} {}", "Name".cyan(), view.name);
        if let Some(err) = &view.errors.name {
            println!("  {:<10} {}", "", err.to_string().red());
        }
        if view.validating {
            println!("  {:<10} {}", "", "Validating...".dimmed());
        }
        println!("  {:<10} {}", "Location".cyan(), view.location);
        if let Some(err) = &view.errors.location {
            println!("  {:<10} {}", "", err.to_string().red());
        }
        if view.can_submit {
            println!("  {}", "[Add] enabled".green());
        } else {
            println!("  {}", "[Add] disabled".yellow());
        }
    }

    pub fn list(&self, rows: &[ListRow]) {
        if self.json {
            self.emit(json!({ "event": "list", "rows": rows }));
            return;
        }

        println!(
            "{}",
            format!("{:<20} {:<20}", "Name", format!("Location ({})", rows.len()))
                .bold()
                .reversed()
        );
        for row in rows {
            let line = format!("{:<20} {:<20}", row.name, row.location);
            if row.shaded {
                println!("{}", line.on_bright_black());
            } else {
                println!("{}", line);
            }
        }
    }

    pub fn invalid_input(&self, message: &str) {
        if self.json {
            self.emit(json!({ "event": "invalid_input", "message": message }));
        } else {
            println!("{} {}", "?".yellow(), message);
        }
    }

    pub fn help(&self) {
        if self.json {
            let commands: Vec<_> = COMMANDS
                .iter()
                .map(|(usage, what)| json!({ "usage": usage, "description": what }))
                .collect();
            self.emit(json!({ "event": "help", "commands": commands }));
            return;
        }

        println!("{}", "Commands:".bold());
        for (usage, what) in COMMANDS {
            println!("  {:<20} {}", usage.cyan(), what);
        }
    }
}
