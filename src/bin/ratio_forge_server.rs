//! Ratio Forge API Server binary
//!
//! HTTP REST API for generating multi-ratio workbooks.

use clap::Parser;
use royalbit_ratio_forge::api::{run_api_server, server::ApiConfig};

#[derive(Parser, Debug)]
#[command(name = "ratio-forge-server")]
#[command(version)]
#[command(author = "RoyalBit Inc. <admin@royalbit.ca>")]
#[command(about = "Ratio Forge API Server - HTTP REST API for multi-ratio workbooks")]
#[command(long_about = r#"
Ratio Forge API Server - HTTP REST API

Endpoints:
  - POST /api/v1/generate  - Generate a ratio workbook from a roster (.xlsx)
  - POST /api/v1/inspect   - Report candidate columns of a roster
  - GET  /health           - Health check
  - GET  /version          - Server version info
  - GET  /                 - API documentation

Example usage:
  ratio-forge-server                           # Start on localhost:8080
  ratio-forge-server --host 0.0.0.0 --port 3000

  curl -X POST http://localhost:8080/api/v1/generate \
    -H "Content-Type: application/json" \
    -d '{"input_path": "roster.xlsx", "range": "51-61", "output_path": "ratios"}'
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "RATIO_FORGE_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "RATIO_FORGE_PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
    };

    run_api_server(config).await
}
