//! Boutique CLI - storefront and back-office operations from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! boutique products list --name keyboard
//! boutique products show 3
//!
//! # Shop as a customer
//! boutique login -e john.doe@example.com -p password123
//! boutique cart add 1 --quantity 2
//! boutique checkout --payment-method CREDIT_CARD
//!
//! # Back office
//! boutique admin login -e admin@example.com -p admin123
//! ```
//!
//! Services, fake-data flags and the storage directory come from the
//! environment (see `ClientConfig::from_env`). Results are printed as
//! pretty JSON on stdout; logs go to stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(name = "boutique")]
#[command(author, version, about = "Boutique storefront and back-office CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Inspect orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Inspect shipments
    Shipments {
        #[command(subcommand)]
        action: ShipmentsAction,
    },
    /// Log in as a customer
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "BOUTIQUE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out the customer
    Logout,
    /// Show the logged-in customer
    Whoami,
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Turn the cart into a paid order
    Checkout {
        /// Payment method (e.g. `CREDIT_CARD`, `PAYPAL`)
        #[arg(long, default_value = "CREDIT_CARD")]
        payment_method: String,
    },
    /// Back-office session
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products
    List {
        /// Case-insensitive name filter
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Show one product
    Show { id: String },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List orders
    List {
        /// Only this user's orders
        #[arg(short, long)]
        user: Option<String>,
    },
    /// Show one order
    Show { id: String },
}

#[derive(Subcommand)]
enum ShipmentsAction {
    /// Show one shipment
    Show { id: String },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add a product
    Add {
        product_id: String,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product
    Remove { product_id: String },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Log in to the back office
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "BOUTIQUE_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out of the back office
    Logout,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "boutique=info,boutique_client=info,boutique_storefront=info,boutique_admin=info".into()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = commands::Context::from_env()?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List { name } => commands::catalog::list(&ctx, name).await?,
            ProductsAction::Show { id } => commands::catalog::show(&ctx, &id).await?,
        },
        Commands::Orders { action } => match action {
            OrdersAction::List { user } => commands::orders::list(&ctx, user).await?,
            OrdersAction::Show { id } => commands::orders::show(&ctx, &id).await?,
        },
        Commands::Shipments { action } => match action {
            ShipmentsAction::Show { id } => commands::orders::show_shipment(&ctx, &id).await?,
        },
        Commands::Login { email, password } => {
            commands::session::login(&ctx, email, password).await?;
        }
        Commands::Logout => commands::session::logout(&ctx),
        Commands::Whoami => commands::session::whoami(&ctx)?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx)?,
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(&ctx, &product_id, quantity).await?,
            CartAction::Remove { product_id } => commands::cart::remove(&ctx, &product_id)?,
            CartAction::Clear => commands::cart::clear(&ctx)?,
        },
        Commands::Checkout { payment_method } => {
            commands::orders::checkout(&ctx, &payment_method).await?;
        }
        Commands::Admin { action } => match action {
            AdminAction::Login { email, password } => {
                commands::admin::login(&ctx, &email, password)?;
            }
            AdminAction::Logout => commands::admin::logout(&ctx),
        },
    }
    Ok(())
}
