mod auth;
mod error;
mod generator;
mod llm;
mod matcher;
mod models;
mod parser;
mod pipeline;
mod sdk;
mod web;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docwrap")]
#[command(about = "Analyze API documentation and generate client wrapper code")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze documentation at a URL and emit the wrapper report
    Analyze {
        /// URL of an OpenAPI spec or HTML documentation page
        url: String,

        /// What you want to build with this API
        #[arg(short, long)]
        use_case: Option<String>,

        /// Write the JSON report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Start the web interface
    Serve {
        #[arg(short, long, default_value = "3001")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            url,
            use_case,
            output,
        } => {
            println!("Analyzing documentation at {}...", url);
            let pipeline = pipeline::AnalysisPipeline::new();
            let report = pipeline.analyze(&url, use_case.as_deref()).await?;

            println!(
                "Found {} endpoints, auth: {:?}",
                report.endpoints.len(),
                report.auth.kind
            );

            let json = serde_json::to_string_pretty(&report)?;
            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, json)?;
                    println!("Report saved to: {}", path.display());
                }
                None => println!("{}", json),
            }
        }
        Commands::Serve { port } => {
            println!("Starting web server on port {}...", port);
            web::run_server(port).await?;
        }
    }

    Ok(())
}
