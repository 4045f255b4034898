//! TTL Cache demo
//!
//! Exercises a bounded cache end to end: TTL expiry, overflow eviction and
//! concurrent writers. Capacity and TTL come from `CACHE_CAPACITY` and
//! `CACHE_TTL_MS`, defaulting to 5 entries and 10ms.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_cache::{BoundedCache, CacheConfig};

const DEMO_CAPACITY: usize = 5;
const DEMO_TTL: Duration = Duration::from_millis(10);
const WRITES_PER_TASK: usize = 1000;

fn key_name(i: usize) -> String {
    format!("key-{:02}", i)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig::from_env_or(CacheConfig::new(DEMO_CAPACITY, DEMO_TTL));
    info!(
        "Creating cache: capacity={}, ttl={}ms",
        config.capacity,
        config.ttl.as_millis()
    );
    let cache = Arc::new(BoundedCache::from_config(&config).context("can't create cache")?);

    check_ttl(&cache).await?;
    check_overflow(&cache).await?;
    check_concurrency(&cache).await?;

    info!("Final stats: {}", serde_json::to_string(&cache.stats().await)?);
    cache.shutdown().await;
    Ok(())
}

async fn check_ttl(cache: &BoundedCache<usize>) -> anyhow::Result<()> {
    info!("Checking TTL");
    let key = key_name(1);
    cache.set(key.clone(), 3).await;

    match cache.get(&key).await {
        Some(3) => {}
        other => bail!("{:?}: got {:?} right after set", key, other),
    }

    // Let key expire
    tokio::time::sleep(cache.ttl() * 2).await;
    if cache.get(&key).await.is_some() {
        bail!("{:?}: got value after TTL", key);
    }

    info!("TTL OK");
    Ok(())
}

async fn check_overflow(cache: &BoundedCache<usize>) -> anyhow::Result<()> {
    info!("Checking overflow");
    let n = cache.capacity() * 2;
    for i in 0..n {
        cache.set(key_name(i), i).await;
    }

    if cache.get(&key_name(1)).await.is_some() {
        bail!("{:?}: got value after overflow", key_name(1));
    }
    if cache.get(&key_name(n - 1)).await.is_none() {
        bail!("{:?}: not found", key_name(n - 1));
    }

    info!("Overflow OK");
    Ok(())
}

async fn check_concurrency(cache: &Arc<BoundedCache<usize>>) -> anyhow::Result<()> {
    let tasks = cache.capacity() * 3;
    info!(
        "Checking concurrency ({} tasks, {} writes each)",
        tasks, WRITES_PER_TASK
    );

    let handles: Vec<_> = (0..tasks)
        .map(|t| {
            let cache = Arc::clone(cache);
            tokio::spawn(async move {
                let key = key_name(t);
                for i in 0..WRITES_PER_TASK {
                    tokio::time::sleep(Duration::from_micros(1)).await;
                    cache.set(key.clone(), i).await;
                }
            })
        })
        .collect();

    for handle in handles {
        handle.await.context("writer task failed")?;
    }

    let len = cache.len().await;
    if len > cache.capacity() {
        bail!("cache holds {} entries, capacity is {}", len, cache.capacity());
    }

    info!("Concurrency OK");
    Ok(())
}
