//! Puppet run report pipeline for the runbeacon notifier.
//!
//! Given the outcome of one Puppet run, this crate queries PuppetDB for a
//! small set of node facts, renders a status headline plus a markdown fact
//! table, and posts the result to a Slack incoming webhook.
//!
//! The pipeline is linear and runs once per invocation:
//!
//! ```text
//! RunContext ──► enrich (FactSource) ──► compose_message ──► SlackNotifier
//! ```
//!
//! # Example
//!
//! ```no_run
//! use runbeacon_report::{
//!     notify_run, PuppetDbClient, RunContext, RunStatus, SlackNotifier, DEFAULT_FACTS,
//! };
//!
//! # async fn example(config: runbeacon_config::DeliveryConfig) -> runbeacon_report::Result<()> {
//! let ctx = RunContext {
//!     host: "node1.example.com".to_string(),
//!     environment: "production".to_string(),
//!     runmode: "agent".to_string(),
//!     noop: false,
//!     status: RunStatus::Changed,
//! };
//! let source = PuppetDbClient::new("http://localhost:8080")?;
//! let facts: Vec<String> = DEFAULT_FACTS.iter().map(|s| s.to_string()).collect();
//! notify_run(&ctx, &config, &facts, &source, &SlackNotifier::new()).await?;
//! # Ok(())
//! # }
//! ```

pub mod compose;
pub mod context;
pub mod error;
pub mod facts;
pub mod notify;
pub mod pipeline;
pub mod puppetdb;

pub use compose::{SlackPayload, compose_message};
pub use context::{RunContext, RunStatus};
pub use error::{ReportError, Result};
pub use facts::{AttributeSet, DEFAULT_FACTS, Fact, FactError, FactSource, UNKNOWN, enrich};
pub use notify::{DeliveryError, SlackNotifier};
pub use pipeline::notify_run;
pub use puppetdb::PuppetDbClient;
