use clap::{Parser, Subcommand};
use reqwest::header::CONTENT_TYPE;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "rpc-cli")]
#[command(about = "Client for the JSON-RPC failover proxy", long_about = None)]
struct Cli {
    /// Proxy RPC endpoint.
    #[arg(short, long, default_value = "http://localhost:8080/api/rpc")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which upstream the proxy treats as primary
    Health,
    /// Send a single JSON-RPC 2.0 call
    Call {
        /// Method name, e.g. eth_blockNumber
        method: String,
        /// Params as a JSON array or object
        #[arg(default_value = "[]")]
        params: String,
        /// Request id
        #[arg(long, default_value_t = 1)]
        id: u64,
    },
    /// Send an arbitrary payload (single call or batch) unchanged
    Raw {
        /// JSON payload
        payload: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = match cli.command {
        Commands::Health => client.get(&cli.url).send().await?,
        Commands::Call { method, params, id } => {
            let params: Value = serde_json::from_str(&params)?;
            let payload = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params });
            client.post(&cli.url).json(&payload).send().await?
        }
        Commands::Raw { payload } => {
            client
                .post(&cli.url)
                .header(CONTENT_TYPE, "application/json")
                .body(payload)
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: proxy returned status {}", status);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
