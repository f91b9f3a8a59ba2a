//! Per-run inputs supplied by the invoking host framework.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Terminal status of one Puppet run, as the agent reports it.
///
/// The agent's own vocabulary is `changed`, `failed` and `unchanged`;
/// anything else is carried through verbatim as [`RunStatus::Other`] and
/// rendered without a status glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Changed,
    Failed,
    Unchanged,
    Other(String),
}

impl RunStatus {
    /// Slack emoji token for this status, or the empty string for statuses
    /// outside the known set.
    pub fn glyph(&self) -> &str {
        match self {
            RunStatus::Changed => ":sparkles:",
            RunStatus::Failed => ":no_entry:",
            RunStatus::Unchanged => ":white_check_mark:",
            RunStatus::Other(_) => "",
        }
    }
}

impl FromStr for RunStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "changed" => RunStatus::Changed,
            "failed" => RunStatus::Failed,
            "unchanged" => RunStatus::Unchanged,
            other => RunStatus::Other(other.to_string()),
        })
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Changed => f.write_str("changed"),
            RunStatus::Failed => f.write_str("failed"),
            RunStatus::Unchanged => f.write_str("unchanged"),
            RunStatus::Other(s) => f.write_str(s),
        }
    }
}

/// Everything the pipeline needs to know about one completed run.
///
/// The host framework exposes these as ambient accessors; the adapter is
/// expected to collect them into this struct so the pipeline itself carries
/// no process-wide state.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Certified name of the node the run executed on.
    pub host: String,
    /// Puppet environment the run used.
    pub environment: String,
    /// Run mode (`agent`, `apply`, ...).
    pub runmode: String,
    /// Whether the run was a no-op (dry) run.
    pub noop: bool,
    /// Terminal status of the run.
    pub status: RunStatus,
}
