//! Wisp TCP relay proxy - Main Entry Point
//!
//! TODO: Handle SIGTERM/SIGINT alongside the console exit key

use std::sync::Arc;

use clap::Parser;
use log::{error, info};
use tokio::io::{AsyncBufReadExt, BufReader};

use wisp_config::validator::validate as validate_config;
use wisp_edge::{ShutdownHandle, TcpProxy};
use wisp_lb::{RoundRobin, TargetPool};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    // Sets a custom config file
    #[arg(short, long)]
    config: Option<String>,
}

// Reads console input and flips the running flag when the exit key arrives.
async fn monitor_for_exit(shutdown: Arc<ShutdownHandle>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim() == "q" {
            shutdown.trigger();
            return;
        }
    }
}

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(|| "./config/config.yaml".to_string());

    // Read configuration file
    let config_yaml = match wisp_config::loader::read_config(&config_path) {
        Ok(cfg) => cfg,
        Err(err_msg) => {
            eprintln!("Error loading config: {}", err_msg);
            std::process::exit(1);
        }
    };

    // Initialize the Logger
    wisp_utils::logger::init_logger(&config_yaml.log.level);

    // Validate Configurations
    if validate_config(&config_yaml) == false {
        error!("Configuration validation failed. Exiting...");
        std::process::exit(1);
    }

    // Targets that fail to parse are dropped here; serving with none left is
    // refused outright
    let pool = TargetPool::from_strings(&config_yaml.targets);
    let selector = match RoundRobin::new(pool) {
        Ok(selector) => Arc::new(selector),
        Err(err_msg) => {
            error!("No targets specified: {}", err_msg);
            std::process::exit(1);
        }
    };

    info!("Wisp is starting");
    let (proxy, shutdown) = match TcpProxy::bind(config_yaml, selector).await {
        Ok(bound) => bound,
        Err(err) => {
            error!("Binding server socket failed: {}", err);
            std::process::exit(1);
        }
    };

    // main keeps a handle alive for the whole run so the running flag cannot
    // vanish out from under the accept loop if console input closes early
    let shutdown = Arc::new(shutdown);
    tokio::spawn(monitor_for_exit(Arc::clone(&shutdown)));

    if let Err(err) = proxy.run().await {
        error!("Proxy server stopped unexpectedly: {}", err);
        std::process::exit(1);
    }

    info!("No longer accepting connections; active sessions drain on their own");
}
