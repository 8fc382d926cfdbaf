//! Quickstart for the DM Cloud client.
//!
//! ```sh
//! DMCLOUD_API_KEY=... RUST_LOG=dmcloud=debug cargo run --example quickstart -- http://example.com/video.mov
//! ```

use dmcloud::{media, Client, Config, Dispatched, Fields, ListOptions};
use serde_json::{json, Map};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> dmcloud::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let source = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://example.com/video.mov".to_string());

    let client = Client::new(Config::from_env())?;

    // -----------------------------------------------------------------------
    // 1. Create a media and transcode it to one asset
    // -----------------------------------------------------------------------
    let mut meta = Map::new();
    meta.insert("title".into(), json!("Quickstart upload"));

    let created = client
        .media()
        .create(Some(&source), &["mp4_h264_aac".into()], &meta)
        .await?;
    let media_id = created["result"]["id"].as_str().unwrap_or_default().to_string();
    println!("Created media {media_id}");

    // -----------------------------------------------------------------------
    // 2. Inspect it
    // -----------------------------------------------------------------------
    let info = client
        .media()
        .info(
            &media_id,
            Some(&["source".to_string(), "mp4_h264_aac".to_string()][..]),
            &Fields::new().field("id").group("meta", ["title"]).assets(["status"]),
        )
        .await?;
    println!("Info: {info:#}");

    // -----------------------------------------------------------------------
    // 3. Resolve the final download link of the source
    // -----------------------------------------------------------------------
    match client.media().download_url(&media_id, "source").await {
        Ok(link) => println!("Download: {link}"),
        Err(e) => println!("No download link yet: {e}"),
    }

    // -----------------------------------------------------------------------
    // 4. List, honouring DMCLOUD_AUTO_CALL
    // -----------------------------------------------------------------------
    let call = media::list(&ListOptions {
        fields: Fields::new().field("id").group("meta", ["title"]),
        ..Default::default()
    })?;
    match client.dispatch(call).await? {
        Dispatched::Sent(page) => println!("Page: {page:#}"),
        Dispatched::Deferred(call) => {
            println!("Deferred: {}", serde_json::to_string(&call.params)?)
        }
    }

    Ok(())
}
