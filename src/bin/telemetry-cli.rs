use clap::{Parser, Subcommand};
use reqwest::StatusCode;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "telemetry-cli")]
#[command(about = "Client for the multi-tenant telemetry service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the service is up
    Status,
    /// Discover the devices of a tenant
    Discover {
        /// Tenant to query; omitted means no X-Tenant-ID header
        #[arg(short, long)]
        tenant: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/", cli.url)).send().await?;
            let status = res.status();
            let text = res.text().await?;
            if status.is_success() {
                println!("{}", text);
            } else {
                eprintln!("Error: service returned status {}", status);
            }
        }
        Commands::Discover { tenant } => {
            let mut req = client.get(format!("{}/api/v1/fabric/discover", cli.url));
            if let Some(tenant) = tenant {
                req = req.header("X-Tenant-ID", tenant);
            }
            print_response(req.send().await?).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await?;

    if status == StatusCode::OK {
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        eprintln!("Error: service returned status {}", status);
        eprintln!("Response: {}", json);
    }
    Ok(())
}
