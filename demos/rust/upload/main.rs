use std::path::PathBuf;

use anyhow::Result;
use bpt_store::Connection;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(
    version,
    about = "Upload a file to BPT Store and print its metadata and links.",
    long_about = "Credentials come from BPT_STORE_LOGIN and BPT_STORE_PASSWORD. \
                  Set BPT_STORE_SANDBOX=true for the sandbox or BPT_STORE_URL for a custom endpoint."
)]
struct Cli {
    /// File to upload
    path: PathBuf,
    /// File group the upload belongs to
    #[arg(long, default_value = "1")]
    group_id: String,
    /// Keep the file private (reachable only through the authenticated link)
    #[arg(long)]
    private: bool,
    /// Maximum tracing verbosity to enable: error|warn|info|debug|trace
    #[arg(long, default_value_t = LevelFilter::INFO, value_parser = clap::value_parser!(LevelFilter))]
    level: LevelFilter,
}

#[tokio::main]
async fn main() -> Result<()> {
    let Cli {
        path,
        group_id,
        private,
        level,
    } = Cli::parse();
    init_tracing(level);

    let mut conn = Connection::from_env()?;
    debug!(config = ?conn.config(), "Loaded configuration");

    info!(path = %path.display(), %group_id, private, "Uploading");
    let meta = conn.files().add(&path, &group_id, !private).await?;

    println!("{}", serde_json::to_string_pretty(&meta)?);
    if !private {
        println!("public:  {}", conn.files().public_url(&meta.hash));
    }
    println!("private: {}", conn.files().private_url(&meta.uuid));

    Ok(())
}

fn init_tracing(level: LevelFilter) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .init();
}
