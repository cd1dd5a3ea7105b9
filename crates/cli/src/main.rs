//! Voltcart CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations (including the session store)
//! vc-cli migrate
//!
//! # Seed the catalog with sample products
//! vc-cli seed products --per-category 10
//!
//! # Create an admin account
//! vc-cli admin create -e admin@example.com -p 's3cret-pass'
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed products` - Seed the catalog with sample products
//! - `admin create` - Create admin accounts

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "vc-cli")]
#[command(author, version, about = "Voltcart CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with sample data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Seed the product catalog
    Products {
        /// Products to create per category
        #[arg(long, default_value_t = 10)]
        per_category: u32,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin account
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Initial password
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
        Commands::Seed { target } => match target {
            SeedTarget::Products { per_category } => {
                commands::seed::products(per_category).await?;
            }
        },
        Commands::Admin { action } => match action {
            AdminAction::Create { email, password } => {
                commands::admin::create_user(&email, &password).await?;
            }
        },
    }
    Ok(())
}
