pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "leads")]
#[command(about = "Lead dashboard from the terminal: log in, page through leads, export to a spreadsheet")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "LEADS_SERVER_URL",
        default_value = "http://localhost:3000",
        help = "Dashboard server base URL"
    )]
    pub server: String,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Log in and store the session token")]
    Login {
        #[arg(help = "Account email")]
        email: String,
        #[arg(long, env = "LEADS_PASSWORD", hide_env_values = true, help = "Account password")]
        password: String,
        #[arg(long, help = "Log in again even when a session is already stored")]
        force: bool,
    },

    #[command(about = "Forget the stored session (no server call)")]
    Logout,

    #[command(about = "Show whether a session is stored")]
    Status,

    #[command(about = "Show one page of leads, newest first")]
    List {
        #[arg(long, default_value_t = 1, help = "Page number (1-based, clamped)")]
        page: usize,
    },

    #[command(about = "Export leads in a date range to a spreadsheet")]
    Export {
        #[arg(long, help = "First day to include (YYYY-MM-DD)")]
        start: Option<String>,
        #[arg(long, help = "Last day to include (YYYY-MM-DD)")]
        end: Option<String>,
        #[arg(long, default_value = "Leads.xlsx", help = "Output file")]
        out: PathBuf,
        #[arg(long, default_value = "Leads Data", help = "Worksheet name")]
        sheet: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let server = cli.server;

    match cli.command {
        Commands::Login { email, password, force } => {
            commands::auth::login(&server, &email, &password, force, output_format).await
        }
        Commands::Logout => commands::auth::logout(output_format),
        Commands::Status => commands::auth::status(output_format),
        Commands::List { page } => commands::leads::list(&server, page, output_format).await,
        Commands::Export { start, end, out, sheet } => {
            commands::leads::export(&server, start.as_deref(), end.as_deref(), &out, &sheet, output_format).await
        }
    }
}
