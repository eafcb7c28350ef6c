//! registry-peek library
//!
//! Harness glue for the `registry-peek` CLI: command-line configuration and
//! the poll-and-print loop built on `kafka-avro-source`.
//!
//! # CLI Usage
//!
//! ```bash
//! # Print ten polls worth of records, like a one-off console consumer
//! registry-peek --brokers localhost:9092 --topic TEST1 \
//!   --schema-registry-url http://localhost:8081 --max-polls 10
//!
//! # Follow a topic until Ctrl-C, one JSON object per record
//! registry-peek --topic TEST1 --output json --key-format avro
//! ```

pub mod config;
pub mod peek;

pub use peek::{run_peek, Config, OutputFormat, PeekSummary};
