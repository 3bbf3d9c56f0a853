pub mod errors;
pub mod logging;
pub mod root;
pub mod server;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config, LOCAL_CONFIG_FILE, SYSTEM_CONFIG_FILE};
pub use server::{ServerConfig, WebConfig};
