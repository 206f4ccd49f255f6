//! Atelier web server binary.
//!
//! Serves the public site, the admin API and the change feed from one
//! SQLite database.

use std::net::IpAddr;
use std::path::PathBuf;

use atelier::api::{self, Config};
use atelier::auth::MAX_SESSION_DAYS;
use clap::Parser;

#[derive(Parser)]
#[command(name = "atelier-server")]
#[command(author, version, about = "Atelier site and admin API server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, env = "ATELIER_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "ATELIER_PORT", default_value = "3000")]
    port: u16,

    /// Database file path
    #[arg(long, env = "ATELIER_DB", default_value = "atelier.db")]
    db: PathBuf,

    /// Directory with static files (styles, images)
    #[arg(long, env = "ATELIER_PUBLIC_DIR")]
    public_dir: Option<PathBuf>,

    /// Production mode: session cookies are marked Secure
    #[arg(long, env = "ATELIER_PRODUCTION")]
    production: bool,

    /// Lifetime of an admin login, in days
    #[arg(
        long,
        env = "ATELIER_SESSION_DAYS",
        default_value = "7",
        value_parser = clap::value_parser!(i64).range(1..=MAX_SESSION_DAYS)
    )]
    session_days: i64,

    /// Lifetime of a "remember me" login, in days
    #[arg(
        long,
        env = "ATELIER_REMEMBER_DAYS",
        default_value = "30",
        value_parser = clap::value_parser!(i64).range(1..=MAX_SESSION_DAYS)
    )]
    remember_days: i64,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let mut config = Config {
        host: cli.host,
        port: cli.port,
        ..Config::default()
    }
    .with_db_path(cli.db)
    .with_production(cli.production)
    .with_session_days(cli.session_days, cli.remember_days);

    if let Some(dir) = cli.public_dir {
        config = config.with_public_dir(dir);
    }

    api::run(config).await?;
    Ok(())
}
