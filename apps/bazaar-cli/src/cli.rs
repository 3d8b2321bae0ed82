//! Command-line surface.
//!
//! ```bash
//! bazaar login johnd 'm38rmF$'
//! bazaar products
//! bazaar product 3
//! bazaar cart add 3
//! bazaar bag show
//! bazaar bag remove 7
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use bazaar_api::ClientConfig;
use bazaar_core::{CartRecordId, ProductId};

use crate::commands;
use crate::error::{AppError, AppResult};
use crate::state::{ConfigState, Stores};

#[derive(Debug, Parser)]
#[command(name = "bazaar")]
#[command(author, version, about = "Bazaar storefront client")]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Remote API origin
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory holding bazaar.db
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep the session and cart in memory for this run only
    #[arg(long, global = true)]
    pub memory: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the product catalogue
    Products,
    /// Show one product
    Product {
        /// Product id
        id: String,
    },
    /// Log in against the remote API
    Login { username: String, password: String },
    /// Log out and empty the cart
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Local shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Remote cart records joined with product details
    Bag {
        #[command(subcommand)]
        action: BagAction,
    },
    /// Check storage health and migrations
    Doctor,
}

#[derive(Debug, Subcommand)]
pub enum CartAction {
    /// Show cart items and totals
    Show,
    /// Add one unit of a product
    Add { id: String },
    /// Remove every unit of a product
    Remove { id: ProductId },
    /// Empty the cart
    Clear,
    /// Post the cart as a remote cart record
    Submit,
}

#[derive(Debug, Subcommand)]
pub enum BagAction {
    /// Show the bag
    Show,
    /// Delete a remote cart record and all of its rows
    Remove { cart_id: CartRecordId },
}

impl Cli {
    /// Resolves configuration: file and environment, then flags.
    ///
    /// An unreadable or invalid config file falls back to defaults. Flags
    /// are validated on top and do fail.
    pub fn config_state(&self) -> AppResult<ConfigState> {
        let mut client = ClientConfig::load_or_default(self.config.clone());
        if let Some(url) = &self.api_url {
            client.api.base_url = url.clone();
        }
        if let Some(dir) = &self.data_dir {
            client.storage.data_dir = Some(dir.clone());
        }
        client.validate()?;

        let mut state = ConfigState::new(client);
        if self.memory {
            state.database_path = None;
        }
        Ok(state)
    }
}

/// Runs one command, returning its JSON output.
pub async fn execute(stores: &Stores, command: Command) -> AppResult<String> {
    match command {
        Command::Products => to_json(&commands::product::list_products(stores).await?),
        Command::Product { id } => to_json(&commands::product::product_details(stores, &id).await?),
        Command::Login { username, password } => {
            to_json(&commands::session::login(stores, &username, &password).await?)
        }
        Command::Logout => to_json(&commands::session::logout(stores).await?),
        Command::Whoami => to_json(&commands::session::whoami(stores).await?),
        Command::Cart { action } => match action {
            CartAction::Show => to_json(&commands::cart::get_cart(stores).await?),
            CartAction::Add { id } => {
                to_json(&commands::product::add_product_to_cart(stores, &id).await?)
            }
            CartAction::Remove { id } => to_json(&commands::cart::remove_from_cart(stores, id).await?),
            CartAction::Clear => to_json(&commands::cart::clear_cart(stores).await?),
            CartAction::Submit => to_json(&commands::cart::submit_cart(stores).await?),
        },
        Command::Bag { action } => match action {
            BagAction::Show => to_json(&commands::bag::bag_view(stores).await?),
            BagAction::Remove { cart_id } => {
                to_json(&commands::bag::remove_cart_record(stores, cart_id).await?)
            }
        },
        Command::Doctor => to_json(&commands::doctor::doctor(stores).await?),
    }
}

pub fn to_json<T: Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::internal(e.to_string()))
}
