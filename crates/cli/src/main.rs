//! Four Skincare CLI - the storefront in a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog, optionally by category tab
//! skincare products
//! skincare products --category serum
//!
//! # Search (one-shot, or type queries line by line)
//! skincare search vitamin
//! skincare search
//!
//! # Manage the cart (positions are 1-based, as shown by `cart show`)
//! skincare cart add 2 --quantity 2
//! skincare cart inc 1
//! skincare cart dec 1
//! skincare cart remove 1
//! skincare cart show
//!
//! # Ask about a product on WhatsApp
//! skincare inquire 4
//!
//! # Forms
//! skincare subscribe you@example.com
//! skincare contact --name "Hira" --email hira@example.pk --message "Hello"
//! ```
//!
//! Configuration comes from the environment; see
//! `four_skincare_storefront::config` for the variables.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use four_skincare_core::ProductId;
use four_skincare_storefront::config::StorefrontConfig;
use four_skincare_storefront::error::{AppError, Result};
use four_skincare_storefront::state::Storefront;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "skincare")]
#[command(author, version, about = "Four Skincare storefront")]
struct Cli {
    /// Write logs to stderr as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, optionally for one category tab
    Products {
        /// Category (`cleanser`, `serum`, `moisturizer`, `mask`) or `all`
        #[arg(short, long, default_value = "all")]
        category: String,
    },
    /// Search products by name, description or category
    Search {
        /// Query text; omit to read queries from stdin as you type them
        query: Option<String>,

        /// Category tab to search within
        #[arg(short, long, default_value = "all")]
        category: String,
    },
    /// View and change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Print the WhatsApp enquiry link for a product
    Inquire {
        /// Product id
        product: ProductId,
    },
    /// Subscribe to the newsletter
    Subscribe {
        /// Email address
        email: String,
    },
    /// Send a message through the contact form
    Contact {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        message: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart and its totals
    Show,
    /// Add a product by id
    Add {
        /// Product id
        product: ProductId,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Add one unit to the line at a position
    Inc { position: usize },
    /// Remove one unit from the line at a position
    Dec { position: usize },
    /// Remove the line at a position
    Remove { position: usize },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing(json: bool) {
    // Defaults to warnings only so command output stays readable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "four_skincare_storefront=warn,four_skincare_cli=info".into());

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(cli.log_json);
            fail(&AppError::from(e));
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing(cli.log_json);

    if let Err(e) = run(cli, config).await {
        fail(&e);
    }
}

#[allow(clippy::print_stderr)]
fn fail(error: &AppError) -> ! {
    let message = error.report();
    eprintln!("{message}");
    std::process::exit(1);
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<()> {
    let mut shop = Storefront::from_config(config)?;

    match cli.command {
        Commands::Products { category } => commands::catalog::list(&shop, &category),
        Commands::Search { query, category } => {
            commands::catalog::search(&shop, query, &category).await?;
        }
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&shop),
            CartAction::Add { product, quantity } => {
                commands::cart::add(&mut shop, product, quantity)?;
            }
            CartAction::Inc { position } => commands::cart::increment(&mut shop, position)?,
            CartAction::Dec { position } => commands::cart::decrement(&mut shop, position)?,
            CartAction::Remove { position } => commands::cart::remove(&mut shop, position)?,
        },
        Commands::Inquire { product } => commands::forms::inquire(&shop, product)?,
        Commands::Subscribe { email } => commands::forms::subscribe(&email)?,
        Commands::Contact {
            name,
            email,
            message,
        } => commands::forms::contact(name, email, message)?,
    }
    Ok(())
}
