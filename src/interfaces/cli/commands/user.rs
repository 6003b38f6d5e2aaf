//! 教职员账号 CLI 命令

use colored::Colorize;
use std::io::{self, BufRead, IsTerminal, Write};

use crate::interfaces::cli::CliError;
use crate::services::StaffService;

/// 从不同来源获取密码：--stdin、--password 或交互式输入
fn get_password(password: Option<String>, stdin: bool) -> Result<String, CliError> {
    if stdin {
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| CliError::InputError(format!("Failed to read from stdin: {}", e)))?;
        Ok(line.trim().to_string())
    } else if let Some(pwd) = password {
        Ok(pwd)
    } else {
        prompt_password_with_confirm()
    }
}

/// 交互式输入密码（带确认）
fn prompt_password_with_confirm() -> Result<String, CliError> {
    if !io::stdin().is_terminal() {
        return Err(CliError::InputError(
            "No password provided. Use --password or --stdin flag, or run interactively."
                .to_string(),
        ));
    }

    let read = |prompt: &str| -> Result<String, CliError> {
        print!("{}", prompt);
        io::stdout()
            .flush()
            .map_err(|e| CliError::CommandError(e.to_string()))?;
        rpassword::read_password()
            .map_err(|e| CliError::InputError(format!("Failed to read password: {}", e)))
    };

    let password = read("Enter password: ")?;
    let confirm = read("Confirm password: ")?;

    if password != confirm {
        return Err(CliError::InputError("Passwords do not match".to_string()));
    }

    Ok(password)
}

pub async fn add_user(
    staff: &StaffService,
    email: &str,
    password: Option<String>,
    stdin: bool,
) -> Result<(), CliError> {
    let password = get_password(password, stdin)?;
    let user = staff.add_user(email, &password).await?;
    println!(
        "{} Staff account created: {}",
        "✓".green().bold(),
        user.email.cyan()
    );
    Ok(())
}

pub async fn set_password(
    staff: &StaffService,
    email: &str,
    password: Option<String>,
    stdin: bool,
) -> Result<(), CliError> {
    let password = get_password(password, stdin)?;
    staff.set_password(email, &password).await?;
    println!(
        "{} Password updated for {}",
        "✓".green().bold(),
        email.trim().to_lowercase().cyan()
    );
    Ok(())
}

pub async fn list_users(staff: &StaffService) -> Result<(), CliError> {
    let users = staff.list_users().await?;

    if users.is_empty() {
        println!(
            "{} No staff accounts. Create one with `course-portal user add <email>`",
            "ℹ".bold().blue()
        );
        return Ok(());
    }

    println!("{}", "Staff accounts:".bold().green());
    println!();
    for user in &users {
        println!(
            "  {} {}",
            user.email.cyan(),
            format!("(created: {})", user.created_at.format("%Y-%m-%d %H:%M UTC")).dimmed()
        );
    }
    println!();
    println!(
        "{} Total {} accounts",
        "ℹ".bold().blue(),
        users.len().to_string().green()
    );
    Ok(())
}

pub async fn remove_user(staff: &StaffService, email: &str) -> Result<(), CliError> {
    staff.remove_user(email).await?;
    println!(
        "{} Staff account removed: {}",
        "✓".green().bold(),
        email.trim().to_lowercase().cyan()
    );
    Ok(())
}
