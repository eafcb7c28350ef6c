//! Poll a topic and print every decoded record.
//!
//! Records go to stdout, one per line. Poll summaries and skipped records are
//! logged through `tracing`.

use anyhow::{Context, Result};
use avro_types::Message;
use clap::Parser;
use kafka_avro_source::{Client, ConsumerConfig, KeyFormat, PollCycle, PollOptions, RegistryConfig};
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::parse_duration;

/// How decoded records are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// `ConsumerRecord(topic = ..., value = ...)` lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Configuration for a peek run.
#[derive(Debug, Clone, Parser)]
pub struct Config {
    /// Kafka brokers (comma-separated or multiple --brokers)
    #[clap(
        long,
        env = "KAFKA_BROKERS",
        value_delimiter = ',',
        default_value = "localhost:9092"
    )]
    pub brokers: Vec<String>,
    /// Consumer group ID
    #[clap(long, env = "PEEK_GROUP_ID", default_value = "registry-peek")]
    pub group_id: String,
    /// Topic to consume from
    #[clap(long, env = "PEEK_TOPIC")]
    pub topic: String,
    /// Base URL of the schema registry
    #[clap(long, env = "SCHEMA_REGISTRY_URL", default_value = "http://localhost:8081")]
    pub schema_registry_url: String,
    /// Timeout of each schema registry request (e.g., "500ms", "10s")
    #[clap(long, default_value = "10s", value_parser = parse_duration)]
    pub registry_timeout: Duration,
    /// How long each poll waits for records (e.g., "1s", "500ms")
    #[clap(long, default_value = "1s", value_parser = parse_duration)]
    pub poll_timeout: Duration,
    /// Maximum number of records returned by one poll
    #[clap(long, default_value_t = 500)]
    pub max_records: usize,
    /// Stop after this many polls.
    /// When unset, polling continues until interrupted with Ctrl-C.
    #[clap(long)]
    pub max_polls: Option<u64>,
    /// Where to start when the group has no committed offsets
    #[clap(long, default_value = "earliest", value_parser = ["earliest", "latest"])]
    pub auto_offset_reset: String,
    /// Session timeout in milliseconds
    #[clap(long, default_value = "6000")]
    pub session_timeout_ms: String,
    /// How record keys are decoded
    #[clap(long, value_enum, default_value_t = KeyFormat::String)]
    pub key_format: KeyFormat,
    /// How records are printed
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

/// Totals of a finished peek run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeekSummary {
    pub polls: u64,
    pub records: u64,
    pub failures: u64,
}

#[derive(Debug, Default)]
struct RecordCounts {
    decoded: AtomicU64,
    failed: AtomicU64,
}

/// Run the peek loop until `cancel` fires or `max_polls` polls are done.
pub async fn run_peek(config: Config, cancel: CancellationToken) -> Result<PeekSummary> {
    info!(
        "Starting registry-peek on topic {} (registry {})",
        config.topic, config.schema_registry_url
    );

    let consumer_config = ConsumerConfig {
        brokers: config.brokers.join(","),
        group_id: config.group_id,
        topic: config.topic,
        auto_offset_reset: config.auto_offset_reset,
        session_timeout_ms: config.session_timeout_ms,
        key_format: config.key_format,
        ..Default::default()
    };
    let registry = RegistryConfig {
        url: config.schema_registry_url,
        timeout: config.registry_timeout,
    };

    let client =
        Client::new(consumer_config, &registry).context("Failed to create Kafka client")?;

    let options = PollOptions {
        poll_timeout: config.poll_timeout,
        max_records: config.max_records,
        max_polls: config.max_polls,
    };
    if let Some(max) = options.max_polls {
        info!("Will exit after {max} polls");
    }

    let counts = Arc::new(RecordCounts::default());
    let output = config.output;
    let processor = {
        let counts = Arc::clone(&counts);
        move |cycle: PollCycle| {
            let counts = Arc::clone(&counts);
            async move { print_cycle(&mut std::io::stdout().lock(), cycle, output, &counts) }
        }
    };

    let handle = client
        .spawn_consumer_task(options, cancel, processor)
        .context("Failed to start consumer")?;
    let polls = handle.await.context("Consumer task panicked")??;

    let summary = PeekSummary {
        polls,
        records: counts.decoded.load(Ordering::SeqCst),
        failures: counts.failed.load(Ordering::SeqCst),
    };
    info!(
        "registry-peek finished: {} polls, {} records printed, {} records skipped",
        summary.polls, summary.records, summary.failures
    );

    Ok(summary)
}

/// Render one record in the chosen output format.
pub fn render_record(message: &Message, output: OutputFormat) -> String {
    match output {
        OutputFormat::Text => message.to_string(),
        OutputFormat::Json => message.to_json().to_string(),
    }
}

fn print_cycle<W: Write>(
    out: &mut W,
    cycle: PollCycle,
    output: OutputFormat,
    counts: &RecordCounts,
) -> Result<()> {
    info!("Found {} records", cycle.records.len());

    for received in cycle.records {
        match received {
            Ok(message) => {
                writeln!(out, "{}", render_record(&message, output))
                    .context("Failed to write record")?;
                counts.decoded.fetch_add(1, Ordering::SeqCst);
            }
            Err(e) => {
                error!(
                    topic = %e.topic,
                    partition = e.partition,
                    offset = e.offset,
                    "Skipping record: {e}"
                );
                counts.failed.fetch_add(1, Ordering::SeqCst);
            }
        }
    }
    out.flush().context("Failed to flush output")?;

    Ok(())
}
