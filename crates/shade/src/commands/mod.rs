//! Subcommand handlers: config → core types → output.

pub mod config_cmd;
pub mod control;
pub mod rooms;
pub mod serve;

use std::sync::Arc;

use serde::Serialize;
use shade_api::GatewayClient;
use shade_config::{Config, config_path, load_catalog, load_config};
use shade_core::{Dispatcher, RoomCatalog};
use tracing::debug;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load the layered configuration for this invocation.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let path = config_path(global.config.as_deref());
    debug!(path = %path.display(), "resolved config path");
    Ok(load_config(&path)?)
}

/// Load the room catalog named in the configuration.
pub fn catalog(cfg: &Config) -> Result<Arc<RoomCatalog>, CliError> {
    Ok(Arc::new(load_catalog(&cfg.catalog.path)?))
}

/// Build the dispatcher: validated gateway settings, catalog, HTTP client.
pub fn dispatcher(cfg: &Config) -> Result<Dispatcher<GatewayClient>, CliError> {
    let gateway = cfg.gateway_config()?;
    let catalog = catalog(cfg)?;
    let client = GatewayClient::new(&gateway.transport())?;
    Ok(Dispatcher::new(catalog, Arc::new(gateway), client))
}

/// Pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
