//! Call Ledger - demo driver
//!
//! Stores a few values through an instrumented cache, reads them back and
//! replays the store history.
//!
//! # Environment
//! - `CACHE_BACKEND` - `redis` (default) or `memory`
//! - `REDIS_URL` - Redis connection URL
//! - `RUST_LOG` - log filter (default: `call_ledger=info`)

use anyhow::Context;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use call_ledger::{
    replay, Backend, BackendKind, Cache, CallHistory, Config, MemoryBackend, RedisBackend,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "call_ledger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!("Configuration loaded: backend={:?}", config.backend);

    match config.backend {
        BackendKind::Redis => {
            let backend = RedisBackend::connect(&config.redis_url)
                .await
                .with_context(|| format!("failed to connect to {}", config.redis_url))?;
            run(backend).await
        }
        BackendKind::Memory => run(MemoryBackend::new()).await,
    }
}

async fn run<B: Backend>(backend: B) -> anyhow::Result<()> {
    let cache = Cache::new(backend).await?;

    let text = cache.store("foo").await?;
    let raw = cache.store(b"bar".as_slice()).await?;
    let number = cache.store(42).await?;
    let ratio = cache.store(0.5).await?;

    println!("{} -> {:?}", text, cache.get_str(&text).await?);
    println!("{} -> {:?}", raw, cache.get(&raw).await?);
    println!("{} -> {:?}", number, cache.get_int(&number).await?);
    println!("{} -> {:?}", ratio, cache.get_str(&ratio).await?);
    println!();

    let store = cache.store_operation();
    replay(&store).await?;

    let history = CallHistory::load(&store).await?;
    debug!("store history: {}", serde_json::to_string(&history)?);

    Ok(())
}
