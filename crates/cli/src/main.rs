//! Deposit CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations (tables and session store)
//! deposit-cli migrate
//!
//! # Create the admin account if it does not exist
//! deposit-cli admin create -u admin -p 'a-strong-password'
//!
//! # Replace an admin password
//! deposit-cli admin set-password -u admin -p 'another-password'
//!
//! # Quote a volume with the reference pricing
//! deposit-cli quote 1.75
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `admin create` / `admin set-password` - Manage admin accounts
//! - `quote` - Print the price and box for a volume

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "deposit-cli")]
#[command(author, version, about = "Storage deposit CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Print the price and recommended box for a volume in cubic meters
    Quote {
        /// Volume in cubic meters
        #[arg(allow_negative_numbers = true)]
        volume: f64,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create an admin account unless one with the same username exists
    Create {
        /// Login name
        #[arg(short, long, default_value = "admin")]
        username: String,

        /// Password (falls back to `ADMIN_PASSWORD`)
        #[arg(short, long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Replace the password of an existing admin account
    SetPassword {
        /// Login name
        #[arg(short, long, default_value = "admin")]
        username: String,

        /// New password
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create { username, password } => {
                commands::admin::create_user(&username, &password).await?;
            }
            AdminAction::SetPassword { username, password } => {
                commands::admin::set_password(&username, &password).await?;
            }
        },
        Commands::Quote { volume } => commands::quote::print_quote(volume),
    }
    Ok(())
}
