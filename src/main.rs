use std::fs::File;
use std::sync::Arc;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use eddi::core::config;
use eddi::core::storage::{ACCESS_TOKEN_KEY, FileStore, KeyValueStore, MemoryStore};
use eddi::tui;

#[derive(Parser)]
#[command(name = "eddi", about = "Terminal client for the Eddi database assistant")]
struct Args {
    /// API base URL (overrides config file and EDDI_API_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Bearer token for the API (overrides the stored access token)
    #[arg(long)]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to eddi.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("eddi.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let resolved = config::resolve(&file_config, args.base_url.as_deref());
    log::info!("Eddi starting up (server: {})", resolved.base_url);

    let store: Arc<dyn KeyValueStore> = match FileStore::open_default() {
        Ok(store) => Arc::new(store),
        Err(e) => {
            log::warn!("Falling back to in-memory storage: {}", e);
            Arc::new(MemoryStore::new())
        }
    };

    let token = args.token.or_else(|| store.get(ACCESS_TOKEN_KEY));
    if token.is_none() {
        log::warn!("No access token configured; requests will be unauthenticated");
    }

    tui::run(&resolved, store, token)
}
