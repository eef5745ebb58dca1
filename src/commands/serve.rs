use crate::server::{self, AppState};
use crate::services::{CryptoService, HttpFetcher, JsonFetcher, QuoteService, SettingsStore};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

pub async fn run(port: u16, config_path: PathBuf, public_dir: PathBuf) {
    println!("🚀 Starting marketdeck server on port {}", port);
    println!("⚙️  Settings file: {}", config_path.display());
    println!("📁 Static assets: {}", public_dir.display());

    let fetcher: Arc<dyn JsonFetcher> = match HttpFetcher::new() {
        Ok(fetcher) => Arc::new(fetcher),
        Err(e) => {
            eprintln!("❌ Failed to create HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = AppState {
        crypto: Arc::new(CryptoService::new(Arc::clone(&fetcher))),
        quotes: Arc::new(QuoteService::new(fetcher)),
        settings: Arc::new(SettingsStore::new(config_path)),
        started_at: Instant::now(),
    };

    if let Err(e) = server::serve(app_state, port, public_dir).await {
        eprintln!("❌ Server error: {}", e);
        std::process::exit(1);
    }
}
