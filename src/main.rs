//! `multiapp` launcher: serves the built-in mini-applications.
//!
//! Run with:
//!   RUST_LOG=multiapp=debug cargo run -- --port 1234
//!
//! Try:
//!   curl http://localhost:1234/hola
//!   curl http://localhost:1234/suma/3/4
//!   curl http://localhost:1234/aleat
//!   curl http://localhost:1234/github/code

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use multiapp::{Server, apps};

#[derive(Parser)]
#[command(name = "multiapp")]
#[command(about = "Serve several mini-applications selected by path prefix", long_about = None)]
struct Cli {
    /// Host name or address to listen on.
    #[arg(long, env = "MULTIAPP_HOST", default_value = "localhost")]
    host: String,

    /// TCP port to listen on.
    #[arg(short, long, env = "MULTIAPP_PORT", default_value_t = 1234)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), multiapp::Error> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "multiapp=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let server = Server::bind(&cli.host, cli.port).await?;
    server.serve(apps::demo_router()).await;
    Ok(())
}
