use anyhow::Result;
use bpt_store::Connection;
use clap::Parser;
use std::env;

#[derive(Parser, Debug)]
#[command(version, about = "Print BPT Store links for a file.", long_about = None)]
struct Cli {
    /// Content hash, for the public link
    #[clap(long)]
    hash: Option<String>,
    /// File uuid, for the private link
    #[clap(long)]
    uuid: Option<String>,
    /// Log in first so the private link carries the user uuid
    #[clap(long)]
    login: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(env::var("TRACING").unwrap_or("info".to_string()))
        .init();

    let mut conn = Connection::from_env()?;
    if args.login {
        let session = conn.ensure_auth(false).await?;
        tracing::info!(user_uuid = %session.user_uuid(), "Logged in");
    }

    if let Some(hash) = &args.hash {
        println!("public:  {}", conn.files().public_url(hash));
    }
    if let Some(uuid) = &args.uuid {
        if conn.session().is_none() {
            tracing::warn!("Not logged in: the private link has no user segment (use --login)");
        }
        println!("private: {}", conn.files().private_url(uuid));
    }

    Ok(())
}
