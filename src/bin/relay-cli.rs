use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use ssr_relay::config::{load_config, RelayConfig};
use ssr_relay::relay::{build_target, HttpRenderer};

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Inspect and exercise the external renderer", long_about = None)]
struct Cli {
    /// Relay configuration file (TOML). Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the render target for a request path
    Target { path: String },
    /// POST view data to the renderer and print the render result
    Render {
        path: String,

        /// View data as a JSON object
        #[arg(short, long, default_value = "{}")]
        data: String,

        /// Query parameter forwarded to the renderer (repeatable)
        #[arg(short, long = "query", value_parser = parse_pair)]
        query: Vec<(String, String)>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };

    match cli.command {
        Commands::Target { path } => {
            println!("{}", build_target(&config.renderer, &path));
        }
        Commands::Render { path, data, query } => {
            let data: Map<String, Value> = serde_json::from_str(&data)?;
            let query: BTreeMap<String, String> = query.into_iter().collect();
            let target = build_target(&config.renderer, &path);

            let renderer = HttpRenderer::new(&config.renderer)?;
            match renderer.try_render(&target, &query, &data).await {
                Ok(result) => println!("{}", serde_json::to_string_pretty(&result)?),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    println!("{}", serde_json::to_string_pretty(&ssr_relay::RenderResult::Empty)?);
                }
            }
        }
    }

    Ok(())
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}
