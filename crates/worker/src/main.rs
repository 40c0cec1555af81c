//! offcache worker entry point.
//!
//! Boots the cache manager over an in-memory store and the real HTTP
//! fetcher, runs install/activate, then reads one URL per line from stdin
//! and prints how each request was handled. Prefix a line with `nav ` to
//! treat it as a top-level navigation. Logging goes to stderr so stdout
//! stays machine-readable.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use offcache_core::http::Request;
use offcache_core::{MemoryStore, WorkerConfig};
use offcache_worker::{CacheManager, HttpFetcher, canonicalize};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = WorkerConfig::load()?;
    tracing::info!("starting offcache worker for {}", config.origin);

    let fetcher = HttpFetcher::new(&config)?;
    let mut manager = CacheManager::new(config, MemoryStore::new(), fetcher)?;
    manager.run().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (navigate, target) = match line.strip_prefix("nav ") {
            Some(rest) => (true, rest),
            None => (false, line),
        };

        let url = match canonicalize(target) {
            Ok(url) => url,
            Err(e) => {
                println!("error {target}: {e}");
                continue;
            }
        };

        let request = if navigate { Request::navigate(url) } else { Request::get(url) };
        match manager.handle(&request).await? {
            Some(response) => println!("{} {} {}", response.status.as_u16(), response.source, request.url),
            None => println!("pass {}", request.url),
        }
    }

    Ok(())
}
