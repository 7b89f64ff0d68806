//! Sample client for the playlist service.
//!
//! With arguments, sends them (joined by spaces) as a single request and
//! prints the reply. Without arguments, replays a fixed set of sample
//! requests covering lookups and adds.
//!
//! Environment variables:
//! - `PLAYLIST_SERVICE_ADDRESS` — service endpoint (default `tcp://127.0.0.1:5556`)

use playlist_service::client::{PlaylistClient, DEFAULT_SERVICE_ADDRESS};

const SAMPLE_REQUESTS: &[&str] = &[
    "classical",
    "upbeat",
    "lofi",
    "focus",
    "add focus https://www.youtube.com/watch?v=oPVte6aMprI&list=RDoPVte6aMprI&start_radio=1",
    "add focus https://www.youtube.com/watch?v=nMfPqeZjc2c",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let address = std::env::var("PLAYLIST_SERVICE_ADDRESS")
        .unwrap_or_else(|_| DEFAULT_SERVICE_ADDRESS.to_string());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let requests: Vec<String> = if args.is_empty() {
        SAMPLE_REQUESTS.iter().map(|r| r.to_string()).collect()
    } else {
        vec![args.join(" ")]
    };

    let mut client = PlaylistClient::connect(&address).await?;
    for request in &requests {
        println!("Calling playlist service with {:?}...", request);
        let response = client.request(request).await?;
        println!("Response: {}\n", response);
    }
    client.close().await;

    Ok(())
}
