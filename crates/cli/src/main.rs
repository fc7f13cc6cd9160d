//! Tindahan CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! tindahan migrate
//!
//! # Create an admin user
//! tindahan admin create -e admin@example.com -n "Admin Name" -p "secret-password" -r admin
//!
//! # Seed the catalog with sample data
//! tindahan seed
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tindahan")]
#[command(author, version, about = "Tindahan CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage user accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Seed the database with sample catalog data
    Seed,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin or staff user
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Password (hashed before storage)
        #[arg(short, long)]
        password: String,

        /// Role (`admin` or `staff`)
        #[arg(short, long, default_value = "admin")]
        role: String,
    },
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Admin {
            action:
                AdminAction::Create {
                    email,
                    name,
                    password,
                    role,
                },
        } => commands::admin::create_user(&email, &name, &password, &role)
            .await
            .map(|id| tracing::info!(user_id = id, "user created")),
        Commands::Seed => commands::seed::run().await,
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            std::process::ExitCode::FAILURE
        }
    }
}
