//! CLI administration tool for link-warden.
//!
//! Registers and resolves links and probes the configured backends without
//! going through the HTTP API. Uses the same environment configuration as
//! the server.
//!
//! # Usage
//!
//! ```bash
//! # Register a URL (runs the threat check like the server does)
//! cargo run --bin admin -- register https://example.com
//!
//! # Look up a key
//! cargo run --bin admin -- resolve aB3xY9
//!
//! # Ask the threat checker about a URL without registering it
//! cargo run --bin admin -- check http://malware.testing.google.test/testing/malware/
//!
//! # Check store connection
//! cargo run --bin admin -- store check
//! ```
//!
//! # Environment Variables
//!
//! See [`link_warden::config`]. `STORE_BACKEND=memory` works but is of
//! little use here: the map lives only as long as the command.

use link_warden::application::services::LinkRegistrar;
use link_warden::config::{self, Config};
use link_warden::domain::entities::ThreatVerdict;
use link_warden::domain::repositories::LinkStore;
use link_warden::infrastructure::store;
use link_warden::server::build_checker;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for managing link-warden.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Register a URL and print its short key
    Register {
        /// Target URL (must start with http:// or https://)
        url: String,
    },

    /// Print the URL stored under a key
    Resolve {
        /// Short key, with or without the leading '/'
        key: String,
    },

    /// Run the threat check on a URL without registering it
    Check {
        /// URL to check
        url: String,
    },

    /// Store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

/// Store operation subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Check store connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;

    match cli.command {
        Commands::Register { url } => register(&config, &url).await?,
        Commands::Resolve { key } => resolve(&config, &key).await?,
        Commands::Check { url } => check(&config, &url).await?,
        Commands::Store { action } => match action {
            StoreAction::Check => store_check(&config).await?,
        },
    }

    Ok(())
}

/// Registers a URL through the same pipeline as `POST /`.
async fn register(config: &Config, url: &str) -> Result<()> {
    println!("{}", "🔗 Register Link".bright_blue().bold());
    println!();

    let store = store::connect(config).await?;
    let checker = build_checker(config)?;

    if !checker.is_enabled() {
        println!(
            "{}",
            "⚠️  GOOGLE_API_KEY is not set, URL will not be screened".yellow()
        );
    }

    let registrar = LinkRegistrar::new(store, checker, config.threat_check_policy);

    let link = registrar
        .register(url)
        .await
        .map_err(|e| anyhow::anyhow!("Registration failed: {}", e))?;

    println!("{}", "✅ Link registered".green().bold());
    println!();
    println!("  Key:    {}", link.path().bright_yellow().bold());
    println!("  Target: {}", link.target_url.cyan());
    println!();

    Ok(())
}

/// Prints the target stored under `key`.
async fn resolve(config: &Config, key: &str) -> Result<()> {
    let key = key.trim_start_matches('/');

    let store = store::connect(config).await?;

    let target = store
        .get(key)
        .await
        .map_err(|e| anyhow::anyhow!("Store error: {}", e))?;

    match target {
        Some(url) => {
            println!("  {} → {}", format!("/{}", key).bright_yellow(), url.cyan());
        }
        None => {
            println!("{}", format!("❌ No link under '/{}'", key).red());
        }
    }

    Ok(())
}

/// Runs the threat check and prints the raw verdict (no policy applied).
async fn check(config: &Config, url: &str) -> Result<()> {
    println!("{}", "🛡️  Threat Check".bright_blue().bold());
    println!();

    let checker = build_checker(config)?;

    if !checker.is_enabled() {
        println!(
            "{}",
            "⚠️  GOOGLE_API_KEY is not set, every URL is reported safe".yellow()
        );
    }

    match checker.check(url).await {
        Ok(ThreatVerdict::Safe) => println!("  {} {}", "SAFE".green().bold(), url),
        Ok(ThreatVerdict::Unsafe) => println!("  {} {}", "UNSAFE".red().bold(), url),
        Err(e) => {
            println!("  {} {}", "ERROR".yellow().bold(), e);
            println!(
                "  Server policy: {}",
                config.threat_check_policy.to_string().bright_white()
            );
        }
    }

    println!();

    Ok(())
}

/// Checks that the configured store answers.
async fn store_check(config: &Config) -> Result<()> {
    println!("{}", "🔍 Checking store connection...".bright_blue());

    let store: Arc<dyn LinkStore> = store::connect(config).await?;

    if store.health_check().await {
        println!(
            "{}",
            format!("✅ {} store is reachable", store.backend_name())
                .green()
                .bold()
        );
        Ok(())
    } else {
        anyhow::bail!("{} store did not answer", store.backend_name())
    }
}
