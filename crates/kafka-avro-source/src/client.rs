use crate::cache::SchemaCache;
use crate::consumer::{Consumer, ConsumerConfig, Received};
use crate::error::Result;
use crate::record::RecordDecoder;
use crate::registry::HttpSchemaRegistry;
use crate::resolver::SchemaResolver;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Schema registry connection settings
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Base URL of the registry (e.g., "http://localhost:8081")
    pub url: String,
    /// Bound on each registry request
    pub timeout: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8081".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Settings of the consumption loop
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// How long one poll waits for its first record
    pub poll_timeout: Duration,
    /// Upper bound on records returned by one poll
    pub max_records: usize,
    /// Stop after this many polls; `None` polls until cancelled
    pub max_polls: Option<u64>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_secs(1),
            max_records: 500,
            max_polls: None,
        }
    }
}

/// The records returned by one poll
#[derive(Debug)]
pub struct PollCycle {
    /// 1-based poll counter
    pub number: u64,
    pub records: Vec<Received>,
}

/// Kafka client wiring consumers to a shared schema resolver
pub struct Client {
    resolver: SchemaResolver,
    config: ConsumerConfig,
}

impl Client {
    /// Create a client that resolves schemas from an HTTP registry
    pub fn new(config: ConsumerConfig, registry: &RegistryConfig) -> Result<Self> {
        let registry = HttpSchemaRegistry::new(&registry.url, registry.timeout)?;
        let resolver = SchemaResolver::new(Arc::new(registry), SchemaCache::new());
        Ok(Self::with_resolver(config, resolver))
    }

    /// Create a client around an existing resolver
    pub fn with_resolver(config: ConsumerConfig, resolver: SchemaResolver) -> Self {
        Self { resolver, config }
    }

    /// Create a decoder sharing this client's schema cache
    pub fn create_decoder(&self) -> RecordDecoder {
        RecordDecoder::new(self.resolver.clone())
    }

    /// Create a single consumer
    pub fn create_consumer(&self) -> Result<Consumer> {
        Consumer::new(self.config.clone(), self.create_decoder())
    }

    /// Spawn a consumer task that polls until cancelled (or `max_polls` is reached)
    /// and hands every poll's records to `processor`.
    ///
    /// The task resolves to the number of polls performed. A processor error
    /// stops the loop and is returned from the task.
    pub fn spawn_consumer_task<F, Fut>(
        &self,
        options: PollOptions,
        cancel: CancellationToken,
        processor: F,
    ) -> anyhow::Result<JoinHandle<anyhow::Result<u64>>>
    where
        F: FnMut(PollCycle) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let consumer = self.create_consumer()?;
        info!(
            "Subscribed to topic {} as group {}",
            consumer.config().topic,
            consumer.config().group_id
        );

        let handle = tokio::spawn(async move {
            let (timeout, max_records) = (options.poll_timeout, options.max_records);
            let consumer = &consumer;
            let poll = move || consumer.poll(timeout, max_records);
            run_poll_loop(poll, options.max_polls, cancel, processor).await
        });

        Ok(handle)
    }

    pub fn resolver(&self) -> &SchemaResolver {
        &self.resolver
    }

    /// Get the config
    pub fn config(&self) -> &ConsumerConfig {
        &self.config
    }
}

/// Poll until cancelled or `max_polls` is reached.
///
/// Cancellation is checked between polls, so a poll already in flight
/// completes and its records reach `processor`.
async fn run_poll_loop<P, PFut, F, Fut>(
    mut poll: P,
    max_polls: Option<u64>,
    cancel: CancellationToken,
    mut processor: F,
) -> anyhow::Result<u64>
where
    P: FnMut() -> PFut,
    PFut: Future<Output = Result<Vec<Received>>>,
    F: FnMut(PollCycle) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    let mut polls = 0u64;

    loop {
        if cancel.is_cancelled() {
            debug!("Consumer cancelled after {polls} polls");
            break;
        }
        if max_polls.is_some_and(|max| polls >= max) {
            debug!("Reached max_polls ({polls}), stopping consumer");
            break;
        }

        let number = polls + 1;
        info!("Doing a poll for the {number} time");
        let records = poll().await?;
        polls = number;

        processor(PollCycle { number, records }).await?;
    }

    Ok(polls)
}
