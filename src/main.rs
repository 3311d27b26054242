//! # storefront
//!
//! Command-line client for the storefront backend. Each command mounts the matching
//! screen, waits for the load to resolve and prints what a UI would render.
//!
//! ```bash
//! storefront products search widget
//! RUST_LOG=debug storefront --config storefront.toml orders list
//! storefront login alice --password secret
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use storefront::lifecycle::{AppContext, ClientConfig, ConfigError};
use storefront::order::offered_commands;
use sync_framework::tracing::setup_tracing;
use sync_framework::{AlwaysConfirm, Intent, Outcome};
use thiserror::Error;
use tracing::{info, Instrument};

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Request(String),
}

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Storefront client: products, orders, inventory and session", long_about = None)]
struct Cli {
    /// TOML config file; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Orders and the commands they offer
    Orders {
        #[command(subcommand)]
        action: ListAction,
    },
    /// Stock levels
    Inventory {
        #[command(subcommand)]
        action: ListAction,
    },
    /// Show the current session
    Session,
    /// Sign in and show the resulting identity
    Login {
        username: String,
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    List,
    Search { keyword: String },
}

#[derive(Subcommand)]
enum ListAction {
    List,
}

/// Turns a failed or blocked load into an error carrying the store's message.
fn loaded(outcome: Option<Outcome>) -> Result<(), AppError> {
    match outcome {
        Some(Outcome::Failed(err)) => Err(AppError::Request(err.to_string())),
        _ => Ok(()),
    }
}

fn dispatched(intent: Intent) -> Result<(), AppError> {
    match intent {
        Intent::Dispatched(outcome) => loaded(Some(outcome)),
        Intent::Blocked => Err(AppError::Request("Another request is in flight".to_string())),
        Intent::Declined => Ok(()),
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    setup_tracing();
    let cli = Cli::parse();

    let config = ClientConfig::load_or_default(cli.config.as_deref())?;
    let context = AppContext::from_config(&config)?;

    match cli.command {
        Commands::Products { action } => {
            let screen = context.products_screen(Arc::new(AlwaysConfirm));
            loaded(screen.mount().await)?;
            if let ProductsAction::Search { keyword } = action {
                dispatched(screen.search(&keyword).await)?;
            }
            for product in screen.state().items {
                println!("{:>5}  {:<30} {:>10.2}", product.id, product.name, product.price);
            }
        }
        Commands::Orders { action: ListAction::List } => {
            let screen = context.orders_screen();
            loaded(screen.mount().await)?;
            for order in screen.state().items {
                let commands: Vec<_> = offered_commands(&order)
                    .iter()
                    .map(|command| command.label())
                    .collect();
                println!(
                    "{:>5}  {:<20} {:<10} {:>10.2}  [{}]",
                    order.id,
                    order.customer_name,
                    order.status.as_str(),
                    order.total,
                    commands.join(", ")
                );
            }
        }
        Commands::Inventory { action: ListAction::List } => {
            let screen = context.inventory_screen();
            loaded(screen.mount().await)?;
            for (record, level) in screen.rows() {
                println!(
                    "{:>5}  available={:<6} reserved={:<6} {}",
                    record.product_id,
                    record.available,
                    record.reserved,
                    level.label()
                );
            }
        }
        Commands::Session => {
            let panel = context.session_panel();
            loaded(panel.mount().await)?;
            print_session(&panel.state());
        }
        Commands::Login { username, password } => {
            let panel = context.session_panel();
            let span = tracing::info_span!("login", %username);
            async {
                loaded(panel.mount().await)?;
                dispatched(panel.login(&username, &password).await)
            }
            .instrument(span)
            .await?;
            print_session(&panel.state());
        }
    }

    info!("Done");
    Ok(())
}

fn print_session(state: &sync_framework::SessionState) {
    match &state.identity {
        Some(identity) => println!("Signed in as {} ({})", identity.username, identity.role),
        None if state.error_message.is_empty() => println!("Not signed in"),
        None => println!("Not signed in: {}", state.error_message),
    }
}
