use clap::Parser;
use dnsm_domain::CliOverrides;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "dnsm")]
#[command(version)]
#[command(about = "dnsm - local DNS records with upstream forwarding")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// DNS bind host
    #[arg(short = 'b', long)]
    host: Option<String>,

    /// Management API port
    #[arg(short = 'w', long)]
    web_port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        host: cli.host.clone(),
        web_port: cli.web_port,
        log_level: cli.log_level.clone(),
    };

    let (config, document_path) = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting dnsm v{}", env!("CARGO_PKG_VERSION"));

    let services = di::Services::new(&config, &document_path).await?;

    let dns_addr = match services.engine.start().await {
        Ok(addr) => addr,
        Err(e) => {
            error!(error = %e, "Failed to start DNS engine");
            return Err(e.into());
        }
    };
    info!(addr = %dns_addr, "DNS engine started");

    server::spawn_reload_on_hangup(services.reload.clone());

    let web_result = server::start_web_server(
        config.web.bind_address(),
        services.app_state,
        server::shutdown_signal(),
    )
    .await;

    services.engine.stop().await;

    if let Err(e) = &web_result {
        error!(error = %e, "Management API failed");
    }

    info!("Server shutdown complete");
    web_result
}
