//! Standalone CLI tool for dumping a recorded accessibility tree as JSON.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use axbridge_core::{capture, Application, ReplayDriver, WalkConfig};

#[derive(Parser)]
#[command(name = "axb-tree", about = "Dump a recorded accessibility tree as JSON")]
struct Args {
    /// Path to the fixture JSON
    fixture: PathBuf,

    /// Maximum tree depth
    #[arg(long, default_value = "50")]
    max_depth: usize,

    /// Maximum node count before the walk stops
    #[arg(long, default_value = "50000")]
    max_nodes: usize,

    /// Start from the first element with this role identifier (e.g. AXWindow)
    #[arg(long)]
    role: Option<String>,

    /// Start from the first element whose title contains this string
    #[arg(long)]
    title: Option<String>,

    /// Compact JSON output (no pretty-printing)
    #[arg(long)]
    compact: bool,
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

    let root = match find_start(&app, &args) {
        Ok(root) => root,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let config = WalkConfig {
        max_depth: args.max_depth,
        max_nodes: args.max_nodes,
    };
    let snapshot = capture(&root, config);

    let json = if args.compact {
        serde_json::to_string(&snapshot).unwrap()
    } else {
        serde_json::to_string_pretty(&snapshot).unwrap()
    };
    println!("{json}");
    ExitCode::SUCCESS
}

/// Resolve the element the dump starts from: the application root, or the
/// first element matching the role/title query.
fn find_start(
    app: &Application,
    args: &Args,
) -> Result<axbridge_core::Element, String> {
    if args.role.is_none() && args.title.is_none() {
        return Ok(app.root().clone());
    }

    app.find(|el| {
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
    })
    .ok_or_else(|| "No element matches the query".to_owned())
}
