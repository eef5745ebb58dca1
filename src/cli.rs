use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;

#[derive(Parser)]
#[command(name = "marketdeck")]
#[command(about = "Live market dashboard server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the dashboard server
    Serve {
        #[arg(short, long, default_value_t = 3000)]
        port: u16,

        /// Path to the settings file
        #[arg(short, long, default_value = "config.json")]
        config: PathBuf,

        /// Directory of static dashboard assets
        #[arg(long, default_value = "public")]
        public_dir: PathBuf,
    },
    /// Validate and summarize the settings file
    CheckConfig {
        #[arg(short, long, default_value = "config.json")]
        config: PathBuf,
    },
}

pub async fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            config,
            public_dir,
        } => {
            commands::serve::run(port, config, public_dir).await;
        }
        Commands::CheckConfig { config } => {
            commands::check_config::run(config).await;
        }
    }
}
