use clap::Parser;
use colored::Colorize;

use course_portal::cli::{Cli, Commands};
use course_portal::config::StaticConfig;
use course_portal::interfaces::cli::run_cli_command;
use course_portal::runtime::run_server;
use course_portal::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // .env 只补充未设置的环境变量
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match StaticConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    match cli.command {
        None | Some(Commands::Serve) => {
            let _guard = match init_logging(&config.logging) {
                Ok(guard) => guard,
                Err(e) => {
                    eprintln!("{}", e.format_colored());
                    std::process::exit(1);
                }
            };

            tracing::info!("Starting course-portal v{}", env!("CARGO_PKG_VERSION"));
            run_server(config).await
        }
        Some(cmd) => {
            if let Err(e) = run_cli_command(cmd, &config).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
