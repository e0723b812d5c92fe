//! Configuration subcommands.

use shade_config::{Config, render_config};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// `shade check-config`: validate everything `serve` would need and
/// print a summary. Secrets are never printed.
pub fn check(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = super::load(global)?;
    let gateway = cfg.gateway_config()?;
    let server = cfg.server_settings()?;
    let catalog = super::catalog(&cfg)?;

    let ports: serde_json::Map<String, serde_json::Value> = gateway
        .ports
        .iter()
        .map(|(segment, port)| (segment.to_string(), (*port).into()))
        .collect();
    let networks: Vec<String> = server
        .allowed_networks
        .iter()
        .map(ToString::to_string)
        .collect();

    super::print_json(&serde_json::json!({
        "gateway": {
            "scheme": gateway.scheme,
            "host": gateway.host,
            "ports": ports,
            "username_base": gateway.username_base,
            "tls": format!("{:?}", gateway.tls),
            "timeout_secs": gateway.timeout.as_secs(),
        },
        "server": {
            "bind": server.bind.to_string(),
            "static_dir": server.static_dir,
            "reports_file": server.reports_file,
            "allowed_networks": networks,
        },
        "catalog": {
            "path": cfg.catalog.path,
            "rooms": catalog.len(),
        },
    }))
}

/// `shade default-config`
pub fn default_config() -> Result<(), CliError> {
    print!("{}", render_config(&Config::example())?);
    Ok(())
}
