//! Interactive form session over stdin
//!
//! Each input line is one user action. Validation progress is printed as
//! it happens, interleaved with input handling.

use crate::render::Printer;
use crate::system_config::SystemConfig;
use anyhow::{Context, Result};
use nameform_core::MockDirectory;
use nameform_form::{Field, FormSession};
use nameform_store::EntryStore;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Name(String),
    Location(String),
    Blur(Field),
    Submit,
    Clear,
    Wait,
    Status,
    List,
    Locations,
    Help,
    Quit,
    Nothing,
}

fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let input = match command {
        "" => Input::Nothing,
        "name" => Input::Name(rest.to_string()),
        "location" => Input::Location(rest.to_string()),
        "blur" => match rest {
            "name" => Input::Blur(Field::Name),
            "location" => Input::Blur(Field::Location),
            other => return Err(format!("Unknown field {:?} (expected name or location)", other)),
        },
        "submit" | "add" => Input::Submit,
        "clear" => Input::Clear,
        "wait" => Input::Wait,
        "status" => Input::Status,
        "list" => Input::List,
        "locations" => Input::Locations,
        "help" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => return Err(format!("Unknown command {:?}, try 'help'", other)),
    };

    Ok(input)
}

pub async fn run(config: &SystemConfig, json: bool) -> Result<()> {
    let printer = Printer::new(json);
    let directory = Arc::new(MockDirectory::new(&config.mock));
    let store = EntryStore::new();

    let mut session =
        FormSession::mount(&config.form, directory.clone(), &*directory, store).await;
    printer.catalog(session.catalog());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };

                match parse_input(&line) {
                    Ok(Input::Quit) => return Ok(()),
                    Ok(input) => handle(&mut session, &directory, &printer, input).await,
                    Err(message) => printer.invalid_input(&message),
                }
            }
            event = session.next_event() => {
                if let Some(update) = event.and_then(|event| session.apply(event)) {
                    printer.update(&update);
                }
            }
        }
    }

    debug!("input closed, settling outstanding validation");
    for update in session.settle().await {
        printer.update(&update);
    }

    Ok(())
}

async fn handle(
    session: &mut FormSession,
    directory: &MockDirectory,
    printer: &Printer,
    input: Input,
) {
    match input {
        Input::Name(value) => session.change_name(value),
        Input::Location(value) => session.change_location(value),
        Input::Blur(field) => session.blur(field),
        Input::Submit => match session.submit() {
            Ok(entry) => {
                directory.reserve(entry.name());
                printer.submitted(&entry);
            }
            Err(err) => printer.rejected(&err),
        },
        Input::Clear => {
            session.clear();
            printer.cleared();
        }
        Input::Wait => {
            for update in session.settle().await {
                printer.update(&update);
            }
        }
        Input::Status => printer.status(&session.view()),
        Input::List => printer.list(&session.store().rows()),
        Input::Locations => printer.catalog(session.catalog()),
        Input::Help => printer.help(),
        Input::Quit | Input::Nothing => {}
    }
}
