use anyhow::Result;
use bpt_store_mock::{
    DEFAULT_LOGIN, DEFAULT_PASSWORD, DEFAULT_TOKEN, DEFAULT_USER_UUID, MockBptStore,
    sample_metadata,
};
use clap::Parser;

#[derive(Parser, Debug)]
struct Cli {
    /// Name reported for every accepted upload.
    #[clap(long, default_value = "Example_File.png")]
    upload_name: String,

    /// Contents served for the sample file (public and private links).
    #[clap(long, default_value = "hello from the mock store")]
    contents: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter("bpt_store_mock=debug,httpmock=info".to_string())
        .init();

    let store = MockBptStore::start().await;
    let metadata = sample_metadata(&args.upload_name, args.contents.len() as u64);

    let _login = store.mock_default_login().await;
    let _upload = store
        .mock_upload(DEFAULT_TOKEN, DEFAULT_USER_UUID, &metadata)
        .await;
    let _public = store
        .mock_public_file(&metadata.hash, args.contents.as_bytes())
        .await;
    let _private = store
        .mock_private_file(
            DEFAULT_TOKEN,
            DEFAULT_USER_UUID,
            &metadata.uuid,
            args.contents.as_bytes(),
        )
        .await;

    tracing::info!("Mock BPT Store running");
    tracing::info!("BPT_STORE_URL={}", store.base_url());
    tracing::info!("BPT_STORE_LOGIN={DEFAULT_LOGIN}");
    tracing::info!("BPT_STORE_PASSWORD={DEFAULT_PASSWORD}");
    tracing::info!(uuid = %metadata.uuid, hash = %metadata.hash, "Sample file");

    tokio::signal::ctrl_c().await?;

    Ok(())
}
