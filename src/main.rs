use contact_relay::app_state::AppState;
use contact_relay::configuration::{get_configuration, get_env};
use contact_relay::create_app;
use contact_relay::errors::Error;
use std::net::IpAddr;
use std::net::SocketAddr;
use std::str::FromStr;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn bind_address(host: &str, port: u16) -> Result<SocketAddr, Error> {
    let host = IpAddr::from_str(host)?;
    Ok(SocketAddr::from((host, port)))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {err}");
    }
    info!("Shutting down");
}

async fn run() -> Result<(), Error> {
    let environment = get_env();
    let configuration = get_configuration(&environment)?;
    let addr = bind_address(
        &configuration.application.host,
        configuration.application.port,
    )?;
    let app_state = AppState::try_from(&configuration, environment.clone())?;
    let app = create_app(app_state, &configuration.application);

    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    info!(
        "Server is running on {local_addr} ({})",
        environment.as_str()
    );
    info!("Health check: http://{local_addr}/api/health");
    info!("Test email config: http://{local_addr}/api/test-email-config");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run().await {
        error!("Failed to start server: {err}");
        std::process::exit(1);
    }
}
