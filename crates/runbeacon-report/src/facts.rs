//! Fact enrichment: merging run metadata with fact-store results.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::context::RunContext;

/// Facts requested when the caller does not name its own set.
pub const DEFAULT_FACTS: [&str; 3] = ["tier", "role", "subrole"];

/// Sentinel rendered for a requested fact the store does not have.
pub const UNKNOWN: &str = "*unknown*";

/// One fact as returned by the fact store, already rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    pub name: String,
    pub value: String,
}

impl Fact {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Errors from the fact store.
#[derive(Debug, thiserror::Error)]
pub enum FactError {
    /// Transport-level failure (connect, timeout, decode).
    #[error("fact query failed: {0}")]
    Query(#[from] reqwest::Error),

    /// Fact store answered with a non-success status.
    #[error("fact store returned HTTP {status}")]
    Api { status: u16 },

    /// Fact store endpoint URL could not be parsed.
    #[error("invalid fact store URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// A queryable store of per-node facts.
///
/// One implementation talks to PuppetDB; tests substitute their own. The
/// contract is a single query for the named facts of one certname, returning
/// them in no particular order.
#[async_trait]
pub trait FactSource: Send + Sync {
    async fn node_facts(&self, certname: &str, names: &[String]) -> Result<Vec<Fact>, FactError>;
}

/// Insertion-ordered name/value pairs.
///
/// Order matters: it fixes the column order of the rendered table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    entries: Vec<(String, String)>,
}

impl AttributeSet {
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Query the fact store and merge the results with run metadata.
///
/// The attribute order is fixed: `environment`, `runmode`, `noop`, then each
/// requested fact in the order given. A fact the store did not return maps to
/// the [`UNKNOWN`] sentinel; duplicate names in the response resolve
/// last-write-wins.
pub async fn enrich(
    ctx: &RunContext,
    fact_names: &[String],
    source: &dyn FactSource,
) -> Result<AttributeSet, FactError> {
    let results = source.node_facts(&ctx.host, fact_names).await?;

    let mut lookup: HashMap<String, String> = HashMap::new();
    for fact in results {
        lookup.insert(fact.name, fact.value);
    }

    let mut attrs = AttributeSet::default();
    attrs.push("environment", ctx.environment.clone());
    attrs.push("runmode", ctx.runmode.clone());
    attrs.push("noop", ctx.noop.to_string());
    for name in fact_names {
        let value = lookup
            .get(name)
            .cloned()
            .unwrap_or_else(|| UNKNOWN.to_string());
        attrs.push(name.clone(), value);
    }
    Ok(attrs)
}
