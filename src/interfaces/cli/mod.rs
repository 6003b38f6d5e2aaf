//! CLI interface module
//!
//! Staff account management, sample config generation and one-off link resolution.

pub mod commands;

use std::fmt;
use std::sync::Arc;

use crate::cli::{Commands, ConfigCommands, UserCommands};
use crate::config::StaticConfig;
use crate::errors::PortalError;
use crate::services::StaffService;
use crate::storage::StorageFactory;
use commands::{add_user, config_generate, list_users, remove_user, resolve_input, set_password};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    InputError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::InputError(msg) => format!("Input error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::InputError(msg) => {
                format!("{} {}", "Input error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<PortalError> for CliError {
    fn from(err: PortalError) -> Self {
        match err {
            PortalError::Validation(msg)
            | PortalError::Conflict(msg)
            | PortalError::NotFound(msg) => CliError::InputError(msg),
            PortalError::DatabaseConfig(_)
            | PortalError::DatabaseConnection(_)
            | PortalError::DatabaseOperation(_) => CliError::StorageError(err.to_string()),
            other => CliError::CommandError(other.to_string()),
        }
    }
}

async fn staff_service(config: &StaticConfig) -> Result<StaffService, CliError> {
    let storage = StorageFactory::create(&config.database)
        .await
        .map_err(|e| CliError::StorageError(e.to_string()))?;
    Ok(StaffService::new(Arc::clone(&storage)))
}

/// Run a CLI command from clap-parsed input
///
/// `Serve` is handled by the caller and never reaches here.
pub async fn run_cli_command(cmd: Commands, config: &StaticConfig) -> Result<(), CliError> {
    match cmd {
        Commands::Serve => Err(CliError::CommandError(
            "serve is not a CLI command".to_string(),
        )),

        Commands::Config { action } => match action {
            ConfigCommands::Generate { output_path, force } => {
                config_generate(output_path, force).await
            }
        },

        Commands::Resolve { input, kind } => {
            let kind = match kind {
                Some(kind) => kind,
                None => config.locator_kind()?,
            };
            resolve_input(kind, &input)
        }

        Commands::User { action } => {
            let staff = staff_service(config).await?;
            match action {
                UserCommands::Add {
                    email,
                    password,
                    stdin,
                } => add_user(&staff, &email, password, stdin).await,
                UserCommands::Passwd {
                    email,
                    password,
                    stdin,
                } => set_password(&staff, &email, password, stdin).await,
                UserCommands::List => list_users(&staff).await,
                UserCommands::Remove { email } => remove_user(&staff, &email).await,
            }
        }
    }
}
