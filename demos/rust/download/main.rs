use std::path::PathBuf;

use anyhow::{Result, bail};
use bpt_store::Connection;
use clap::Parser;
use std::env;

#[derive(Parser, Debug)]
#[command(version, about = "Download a file from BPT Store.", long_about = None)]
struct Cli {
    /// File uuid (private, authenticated download)
    #[clap(long, conflicts_with = "hash")]
    uuid: Option<String>,
    /// Content hash (public download, no login)
    #[clap(long)]
    hash: Option<String>,
    /// Where to write the contents; prints them when omitted
    #[clap(long, short)]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(env::var("TRACING").unwrap_or("info".to_string()))
        .init();

    let mut conn = Connection::from_env()?;
    let bytes = match (&args.uuid, &args.hash) {
        (Some(uuid), _) => conn.files().download(uuid).await?,
        (None, Some(hash)) => conn.files().download_public(hash).await?,
        (None, None) => bail!("pass --uuid or --hash"),
    };

    match args.out {
        Some(path) => {
            std::fs::write(&path, &bytes)?;
            tracing::info!(path = %path.display(), len = bytes.len(), "Saved");
        }
        None => match String::from_utf8(bytes.to_vec()) {
            Ok(string) => println!("{string}"),
            Err(_) => println!("{bytes:?}"),
        },
    }

    Ok(())
}
