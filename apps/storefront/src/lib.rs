//! # Storefront Library
//!
//! Host for the storefront demo: owns the catalog, the cart session and the
//! configuration, and exposes the commands the views call.
//!
//! ## Module Organization
//! ```text
//! storefront_lib/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── shell.rs        ◄─── stdin/stdout command loop
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart session behind a mutex
//! │   ├── catalog.rs  ◄─── Catalog loaded at startup
//! │   └── config.rs   ◄─── Configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── Product list
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   └── checkout.rs ◄─── Preview and confirm
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State
//! Three focused state types rather than one `AppState`; each command takes
//! only what it needs.
//!
//! ```text
//! ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐
//! │    CartState     │ │   CatalogState   │ │     AppConfig        │
//! │                  │ │                  │ │                      │
//! │  • Session id    │ │  • Products      │ │  • Store name        │
//! │  • Cart ledger   │ │  • Stock limits  │ │  • Currency symbol   │
//! │  (Mutex)         │ │  (read-only)     │ │  (read-only)         │
//! └──────────────────┘ └──────────────────┘ └──────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod shell;
pub mod state;

use std::io;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use commands::cart::{
    add_to_cart, clear_cart, decrement_cart_item, get_cart, remove_from_cart, toggle_cart_item,
};
use commands::catalog::list_products;
use commands::checkout::{checkout_preview, confirm_checkout};
use error::ApiError;
use shell::ShellCommand;
use state::{AppConfig, CartState, CatalogState, ConfigResult};

/// Filter used when neither `RUST_LOG` nor the config sets one.
const DEFAULT_LOG_FILTER: &str = "info,storefront=debug,storefront_lib=debug";

/// The running storefront: all state the commands operate on.
#[derive(Debug)]
pub struct Storefront {
    pub config: AppConfig,
    pub catalog: CatalogState,
    pub cart: CartState,
}

impl Storefront {
    /// Builds the storefront, loading the catalog named by the config
    /// (or the demo catalog when none is configured).
    pub fn new(config: AppConfig) -> ConfigResult<Self> {
        let catalog = CatalogState::load(config.catalog_path.as_deref())?;
        Ok(Self::with_catalog(config, catalog))
    }

    /// Builds the storefront around an already loaded catalog.
    pub fn with_catalog(config: AppConfig, catalog: CatalogState) -> Self {
        Storefront {
            config,
            catalog,
            cart: CartState::new(),
        }
    }

    /// Runs one command and returns its response as JSON.
    ///
    /// `Quit` has no response of its own; the shell handles it before
    /// dispatch and it answers `null` here.
    pub fn execute(&self, command: ShellCommand) -> Result<Value, ApiError> {
        let (cart, catalog, config) = (&self.cart, &self.catalog, &self.config);

        match command {
            ShellCommand::Products => to_json(list_products(cart, catalog, config)),
            ShellCommand::Cart => to_json(get_cart(cart, catalog, config)),
            ShellCommand::Add(id) => to_json(add_to_cart(cart, catalog, config, id)?),
            ShellCommand::Decrement(id) => to_json(decrement_cart_item(cart, catalog, config, id)),
            ShellCommand::Remove(id) => to_json(remove_from_cart(cart, catalog, config, id)?),
            ShellCommand::Toggle(id) => to_json(toggle_cart_item(cart, catalog, config, id)?),
            ShellCommand::Clear => to_json(clear_cart(cart, catalog, config)),
            ShellCommand::Checkout => to_json(checkout_preview(cart, catalog, config)?),
            ShellCommand::Confirm => to_json(confirm_checkout(cart, catalog, config)?),
            ShellCommand::Help => to_json(shell::HELP),
            ShellCommand::Quit => Ok(Value::Null),
        }
    }
}

fn to_json<T: Serialize>(response: T) -> Result<Value, ApiError> {
    Ok(serde_json::to_value(response)?)
}

/// Runs the storefront shell over stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// 1. Load configuration (file, then STOREFRONT_* overrides)
/// 2. Initialize logging (stderr, so stdout stays pure JSON)
/// 3. Load the catalog
/// 4. Read commands until EOF or `quit`
/// ```
///
/// A broken config file is logged and replaced by defaults. A broken
/// catalog file is fatal: serving a cart against the wrong catalog would
/// mis-price it.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let loaded = AppConfig::load(None);
    init_tracing(loaded.as_ref().ok().and_then(|c| c.log_filter.as_deref()));

    let config = loaded.unwrap_or_else(|e| {
        warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    info!(store_name = %config.store_name, "Starting storefront");

    let app = Storefront::new(config)?;
    info!(
        products = app.catalog.catalog().len(),
        session_id = %app.cart.session_id(),
        "State initialized"
    );

    let stdin = io::stdin();
    shell::run_shell(&app, stdin.lock(), io::stdout().lock())?;

    info!("Storefront stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `log_filter` in the config file or `STOREFRONT_LOG`
/// - Default: INFO, DEBUG for storefront crates
fn init_tracing(configured: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured.unwrap_or(DEFAULT_LOG_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
