use crate::error::AppError;
use crate::services::SettingsStore;
use std::path::PathBuf;

pub async fn run(config_path: PathBuf) {
    let store = SettingsStore::new(config_path.clone());

    match store.try_load().await {
        Ok(settings) => {
            println!("✅ {} is valid", config_path.display());
            println!(
                "   Crypto: enabled={}, top {} coins, {} token filter(s)",
                settings.crypto.enabled,
                settings.crypto.coin_limit,
                settings.crypto.tokens.len()
            );
            println!(
                "   Forex:  enabled={}, {} pair(s)",
                settings.forex.enabled,
                settings.forex.pairs.len()
            );
            println!(
                "   Market: {} indices, {} stocks",
                settings.market.indices.len(),
                settings.market.stocks.len()
            );
        }
        Err(AppError::Io(_)) => {
            println!(
                "⚠️  {} not found; the server will start with built-in defaults",
                config_path.display()
            );
        }
        Err(e) => {
            eprintln!("❌ {}: {}", config_path.display(), e);
            std::process::exit(1);
        }
    }
}
