mod commands;
pub mod error;
mod utils;


use std::path::{Path, PathBuf};

use chrono::Datelike;
use clap::{Parser, Subcommand};

use crate::db::utils::now_naive;
use crate::db::{Database, SqliteDatabase};
use error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "atelier")]
#[command(author, version, about = "Atelier site administration", long_about = None)]
pub struct Cli {
    /// Path to the site database
    #[arg(long, global = true, env = "ATELIER_DB", default_value = "atelier.db")]
    pub db: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Admin account commands
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Contact request commands
    Contact {
        #[command(subcommand)]
        command: ContactCommands,
    },
    /// Show the events calendar for a month
    Calendar {
        /// Year (default: current)
        #[arg(long)]
        year: Option<i32>,
        /// Month 1-12 (default: current)
        #[arg(long)]
        month: Option<u32>,
    },
    /// Site setting commands
    Setting {
        #[command(subcommand)]
        command: SettingCommands,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create an admin account
    Create {
        email: String,
        name: String,
        /// Initial password (read from stdin when neither the flag nor the env var is set)
        #[arg(long, env = "ATELIER_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// List admin accounts
    List {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Reset an account password and end its sessions
    Password {
        email: String,
        /// New password (read from stdin when neither the flag nor the env var is set)
        #[arg(long, env = "ATELIER_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Delete an admin account
    Delete { id: String },
}

#[derive(Subcommand)]
enum ContactCommands {
    /// List contact requests
    List {
        /// Filter by status (new, in_progress, completed, archived)
        #[arg(long)]
        status: Option<String>,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Change the status of a contact request
    Status { id: String, status: String },
}

#[derive(Subcommand)]
enum SettingCommands {
    /// List site settings
    List {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Set a site setting
    Set { key: String, value: String },
    /// Delete a site setting
    Delete { key: String },
}

async fn open_database(path: &Path) -> CliResult<SqliteDatabase> {
    let db = SqliteDatabase::open(path)
        .await
        .map_err(|e| CliError::DatabaseUnavailable {
            message: e.to_string(),
        })?;
    db.migrate().await?;
    Ok(db)
}

fn password_or_stdin(password: Option<String>) -> CliResult<String> {
    match password {
        Some(password) => Ok(password),
        None => {
            eprintln!("Password:");
            utils::read_password(std::io::stdin().lock())
        }
    }
}

async fn execute<D: Database>(db: &D, command: Commands) -> CliResult<String> {
    match command {
        Commands::User { command } => match command {
            UserCommands::Create {
                email,
                name,
                password,
            } => {
                let password = password_or_stdin(password)?;
                commands::user::create_user(db, &email, &name, &password).await
            }
            UserCommands::List { format } => commands::user::list_users(db, &format).await,
            UserCommands::Password { email, password } => {
                let password = password_or_stdin(password)?;
                commands::user::set_password(db, &email, &password).await
            }
            UserCommands::Delete { id } => commands::user::delete_user(db, &id).await,
        },
        Commands::Contact { command } => match command {
            ContactCommands::List { status, format } => {
                commands::contact::list_contacts(db, status.as_deref(), &format).await
            }
            ContactCommands::Status { id, status } => {
                commands::contact::set_status(db, &id, &status).await
            }
        },
        Commands::Calendar { year, month } => {
            let today = now_naive().date();
            commands::calendar::show_calendar(
                db,
                year.unwrap_or(today.year()),
                month.unwrap_or(today.month()),
                today,
            )
            .await
        }
        Commands::Setting { command } => match command {
            SettingCommands::List { format } => commands::setting::list_settings(db, &format).await,
            SettingCommands::Set { key, value } => {
                commands::setting::set_setting(db, &key, &value).await
            }
            SettingCommands::Delete { key } => commands::setting::delete_setting(db, &key).await,
        },
    }
}

pub async fn run() -> miette::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        // Show help when no command provided
        let _ = Cli::parse_from(["atelier", "--help"]);
        return Ok(());
    };

    let db = open_database(&cli.db).await?;
    let output = execute(&db, command).await?;
    println!("{}", output);
    Ok(())
}
