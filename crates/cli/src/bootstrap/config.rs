use dnsm_domain::{CliOverrides, Config};
use tracing::info;

/// Resolves, parses and validates the configuration document. Returns the
/// config together with the path record mutations are written back to.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<(Config, String)> {
    let located = Config::locate(path);
    let config = Config::load(path, overrides)?;
    config.validate()?;

    let document_path = Config::document_path(path);
    match located {
        Some(found) => info!(path = %found, "Configuration loaded"),
        None => info!(path = %document_path, "No configuration file found, using defaults"),
    }

    Ok((config, document_path))
}
