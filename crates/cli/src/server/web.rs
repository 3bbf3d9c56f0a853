use dnsm_api::{create_app, AppState};
use std::future::Future;
use tracing::info;

pub async fn start_web_server(
    bind_addr: String,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    let local_addr = listener.local_addr()?;

    info!(
        bind_address = %local_addr,
        api_url = format!("http://{}/api/v1", local_addr),
        "Management API listening"
    );

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Management API stopped");
    Ok(())
}
