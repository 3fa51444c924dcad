//! Standalone CLI tool for listing the action catalog of one element in a
//! recorded accessibility tree.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use serde::Serialize;

use axbridge_core::{Application, ReplayDriver};

#[derive(Parser)]
#[command(
    name = "axb-actions",
    about = "List the actions of one element in a recorded accessibility tree"
)]
struct Args {
    /// Path to the fixture JSON
    fixture: PathBuf,

    /// First element with this role identifier (e.g. AXButton)
    #[arg(long)]
    role: Option<String>,

    /// First element whose title contains this string
    #[arg(long)]
    title: Option<String>,

    /// Compact JSON output (no pretty-printing)
    #[arg(long)]
    compact: bool,
}

#[derive(Serialize)]
struct ActionEntry {
    action: String,
    description: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let text = match std::fs::read_to_string(&args.fixture) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("Failed to read {}: {err}", args.fixture.display());
            return ExitCode::FAILURE;
        }
    };

    let driver = match ReplayDriver::from_json(&text) {
        Ok(driver) => Arc::new(driver),
        Err(err) => {
            eprintln!("Failed to load fixture: {err}");
            return ExitCode::FAILURE;
        }
    };

    let Some(pid) = driver.applications().first().copied() else {
        eprintln!("Fixture registers no application");
        return ExitCode::FAILURE;
    };

    let app = match Application::new(driver, pid) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("Failed to resolve application root: {err}");
            return ExitCode::FAILURE;
        }
    };

    let Some(element) = app.find(|el| {
        let role_matches = args
            .role
            .as_deref()
            .map(|role| el.role().identifier() == role)
            .unwrap_or(true);
        let title_matches = args
            .title
            .as_deref()
            .map(|title| el.title().is_some_and(|t| t.contains(title)))
            .unwrap_or(true);
        role_matches && title_matches
    }) else {
        eprintln!("No element matches the query");
        return ExitCode::FAILURE;
    };

    let actions = match element.actions() {
        Ok(actions) => actions,
        Err(err) => {
            eprintln!("Failed to list actions: {err}");
            return ExitCode::FAILURE;
        }
    };

    let entries: Vec<ActionEntry> = actions
        .into_iter()
        .map(|action| ActionEntry {
            action: action.identifier().to_owned(),
            description: element.describe(action).unwrap_or(None),
        })
        .collect();

    let json = if args.compact {
        serde_json::to_string(&entries).unwrap()
    } else {
        serde_json::to_string_pretty(&entries).unwrap()
    };
    println!("{json}");
    ExitCode::SUCCESS
}
