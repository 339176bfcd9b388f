//! Discover Zimbabwe CLI - Browse backend content from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List every city with destinations or events
//! dz-cli cities
//!
//! # Show what's on in one city
//! dz-cli city "Victoria Falls"
//!
//! # Search accommodations
//! dz-cli accommodations --search lodge
//!
//! # Show a user's cart (needs their access token)
//! DZ_ACCESS_TOKEN=... dz-cli cart --user 6f1d0c36-8c5e-4c43-9d55-0c6f4b8e2a11
//! ```
//!
//! # Commands
//!
//! - `cities` - Sorted list of cities with content
//! - `city` - Destinations and events in one city
//! - `accommodations` - List, search or filter accommodations
//! - `cart` - A user's cart with line totals
//! - `notifications` - A user's notifications

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use discover_zimbabwe_client::ClientState;
use discover_zimbabwe_core::UserId;

mod commands;

#[derive(Parser)]
#[command(name = "dz-cli")]
#[command(author, version, about = "Discover Zimbabwe CLI tools")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json: bool,

    /// Access token of the signed-in user (defaults to the anon key)
    #[arg(long, env = "DZ_ACCESS_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List cities that have destinations or events
    Cities,
    /// Show destinations and events in a city
    City {
        /// City name (case-insensitive)
        name: String,
    },
    /// List accommodations
    Accommodations {
        /// Only names containing this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only locations containing this text
        #[arg(short, long)]
        location: Option<String>,

        /// Only featured accommodations
        #[arg(short, long)]
        featured: bool,
    },
    /// Show a user's cart
    Cart {
        /// User ID
        #[arg(short, long)]
        user: UserId,
    },
    /// Show a user's notifications
    Notifications {
        /// User ID
        #[arg(short, long)]
        user: UserId,

        /// Only print the unread count
        #[arg(long)]
        unread: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("discover_zimbabwe_client=info,dz_cli=info"));
    if cli.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = discover_zimbabwe_client::ClientConfig::from_env()?;
    let state = ClientState::new(config)?;
    let token = cli.token.map(SecretString::from);

    match cli.command {
        Commands::Cities => commands::browse::cities(&state).await?,
        Commands::City { name } => commands::browse::city(&state, &name).await?,
        Commands::Accommodations {
            search,
            location,
            featured,
        } => {
            let filter = commands::browse::AccommodationFilter {
                search,
                location,
                featured,
            };
            commands::browse::accommodations(&state, filter).await?;
        }
        Commands::Cart { user } => {
            commands::account::sign_in(&state, user, token).await;
            commands::account::cart(&state, user).await?;
        }
        Commands::Notifications { user, unread } => {
            commands::account::sign_in(&state, user, token).await;
            commands::account::notifications(&state, user, unread).await?;
        }
    }
    Ok(())
}
