//! Entry point for the `translation-field` command.
//!
//! Reads a host value as JSON from stdin, runs it through a field configured
//! from `.translation-field.json` in the working directory, and writes the
//! renderer projection as JSON to stdout.

use std::error::Error;
use std::io::{
    self,
    Read,
    Write,
};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use translation_text_field::HostValue;
use translation_text_field::config::ConfigManager;

/// Loads settings, coerces stdin and prints the projection
fn run() -> Result<(), Box<dyn Error>> {
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(Some(std::env::current_dir()?))?;
    config_manager.apply_locale_order()?;

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    let host_value = HostValue::from_json(serde_json::from_str(&input)?)?;

    let mut field = config_manager.build_field();
    field.set_value(host_value)?;

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &field.projection())?;
    writeln!(stdout)?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
