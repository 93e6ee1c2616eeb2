//! Patterned cache walkthrough CLI
//!
//! Runs get / set / get / delete / get for one key under the selected pattern
//! and logs what each store holds after every step.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use patterned_cache::{
    BackgroundListener, BackgroundOutcome, CacheSettings, KeyPrefix, MemoryCacher,
    MemoryCacherConfig, MemoryPersister, Pattern, PatternedCache, Persister, SetOption,
    SharedCacher,
};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "patterned-cache-demo")]
#[command(about = "Walk through a cache-consistency pattern")]
struct Args {
    /// Pattern (cache-aside, read-through, write-through, write-behind, write-around).
    /// Overrides CACHE_PATTERN.
    #[arg(short, long)]
    pattern: Option<Pattern>,

    /// Per-call TTL in seconds for the walkthrough write
    #[arg(long)]
    ttl_secs: Option<u64>,

    /// Key to walk through
    #[arg(short, long, default_value = "greeting")]
    key: String,

    /// Value to write
    #[arg(short, long, default_value = "hello")]
    value: String,

    /// Number of entries seeded into the store
    #[arg(long, default_value = "3")]
    seed: usize,

    /// Load the whole store into the cache before the walkthrough
    #[arg(long)]
    warm: bool,
}

/// Forwards write-behind completions so the walkthrough can wait for them
struct ChannelListener(mpsc::UnboundedSender<BackgroundOutcome>);

impl BackgroundListener for ChannelListener {
    fn on_complete(&self, outcome: BackgroundOutcome) {
        let _ = self.0.send(outcome);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let mut settings = CacheSettings::from_env();
    if let Some(pattern) = args.pattern {
        settings.pattern = pattern;
    }

    init_logging(&settings);

    info!(
        version = patterned_cache::VERSION,
        pattern = %settings.pattern,
        default_ttl = ?settings.default_ttl,
        "Starting patterned cache walkthrough"
    );

    let prefix = settings
        .namespace
        .as_deref()
        .map_or(KeyPrefix::None, KeyPrefix::named);

    let persister = Arc::new(MemoryPersister::<String>::with_prefix(prefix));
    for i in 0..args.seed {
        persister
            .save(&format!("seed:{i}"), &format!("stored value {i}"))
            .await?;
    }

    let (tx, mut outcomes) = mpsc::unbounded_channel();
    let cache = PatternedCache::<String>::builder()
        .cacher(build_cacher(&settings).await?)
        .persister(persister.clone())
        .with_settings(&settings)
        .background_listener(Arc::new(ChannelListener(tx)))
        .build()?;

    if args.warm {
        let loaded = cache.warm_up().await?;
        info!(loaded, "Cache warmed");
    }

    let pattern = cache.pattern();
    let options: Vec<SetOption> = args
        .ttl_secs
        .map(|secs| SetOption::with_ttl(Duration::from_secs(secs)))
        .into_iter()
        .collect();

    let before = cache.get(&args.key).await?;
    info!(key = %args.key, value = ?before, "get");

    cache.set(&args.key, args.value.clone(), &options).await?;
    if pattern == Pattern::WriteBehind {
        if let Some(outcome) = outcomes.recv().await {
            info!(?outcome, "Background save finished");
        }
    }
    info!(
        key = %args.key,
        stored = ?persister.select_one(&args.key).await?,
        "set"
    );

    let after = cache.get(&args.key).await?;
    info!(key = %args.key, value = ?after, "get");

    cache.delete(&args.key).await?;
    if pattern == Pattern::WriteBehind {
        if let Some(outcome) = outcomes.recv().await {
            info!(?outcome, "Background delete finished");
        }
    }
    info!(
        key = %args.key,
        stored = ?persister.select_one(&args.key).await?,
        "delete"
    );

    let gone = cache.get(&args.key).await?;
    info!(key = %args.key, value = ?gone, "get");

    cache.close().await?;
    info!("Walkthrough complete");
    Ok(())
}

fn init_logging(settings: &CacheSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    if settings.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[cfg(feature = "redis")]
async fn build_cacher(settings: &CacheSettings) -> Result<SharedCacher<String>> {
    use patterned_cache::{RedisCacher, RedisCacherConfig};

    let Some(url) = &settings.redis_url else {
        return Ok(memory_cacher(settings));
    };

    info!(url = %url, "Connecting to Redis");
    let mut config = RedisCacherConfig::new(url.clone());
    if let Some(name) = &settings.namespace {
        config = config.with_name(name);
    }
    let cacher = RedisCacher::<String>::new(config).await?;
    info!("Redis connected");

    Ok(Arc::new(cacher))
}

#[cfg(not(feature = "redis"))]
async fn build_cacher(settings: &CacheSettings) -> Result<SharedCacher<String>> {
    if settings.redis_url.is_some() {
        tracing::warn!("REDIS_URL set but the redis feature is disabled, using memory");
    }
    Ok(memory_cacher(settings))
}

fn memory_cacher(settings: &CacheSettings) -> SharedCacher<String> {
    let mut config = MemoryCacherConfig::default().with_max_capacity(settings.memory_capacity);
    if let Some(name) = &settings.namespace {
        config = config.with_name(name);
    }
    Arc::new(MemoryCacher::<String>::with_config(config))
}
