use std::net::SocketAddr;

use tracing::info;

use petstore_mock::{MockConfig, MockServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let addr: SocketAddr = std::env::var("PETSTORE_MOCK_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
        .parse()?;

    // PETSTORE_MOCK_UPSERT=1 makes PUT on a missing pet create it.
    let upsert_on_update = std::env::var("PETSTORE_MOCK_UPSERT")
        .map(|v| v == "1")
        .unwrap_or(false);

    let server = MockServer::spawn(MockConfig {
        addr,
        upsert_on_update,
    })
    .await?;

    info!("Serving {}/pet, Ctrl-C to stop", server.base_url());
    tokio::signal::ctrl_c().await?;

    server.shutdown().await;
    Ok(())
}
