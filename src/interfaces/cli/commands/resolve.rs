//! Resolve a single locator from the command line

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::links::{LocatorKind, ResourceLocator};

pub fn resolve_input(kind: LocatorKind, input: &str) -> Result<(), CliError> {
    let locator = ResourceLocator::parse(kind, input).ok_or_else(|| {
        CliError::InputError(format!("Cannot resolve '{}' as a {} link", input.trim(), kind))
    })?;
    let links = locator.links();

    println!("{} {}", "Canonical:".bold(), locator.canonical().cyan());
    println!("{} {}", "Page:".bold(), links.page_url.blue().underline());
    println!("{} {}", "Download:".bold(), links.download_url.blue().underline());
    println!("{} {}", "Preview:".bold(), links.preview_url.blue().underline());
    Ok(())
}
