//! PuppetDB-backed fact source.
//!
//! Issues a single PQL query against the v4 query endpoint:
//!
//! ```text
//! facts { certname = "node1.example.com" and (name = "tier" or name = "role") }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::facts::{Fact, FactError, FactSource};

/// Default timeout for fact queries.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Query endpoint path, relative to the PuppetDB root URL.
const QUERY_PATH: &str = "pdb/query/v4";

/// HTTP client for the PuppetDB query API.
#[derive(Debug, Clone)]
pub struct PuppetDbClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

/// One row of a `facts` query response.
#[derive(Debug, Deserialize)]
struct FactRow {
    name: String,
    value: serde_json::Value,
}

impl PuppetDbClient {
    /// Create a client for the given PuppetDB root URL.
    pub fn new(base_url: &str) -> Result<Self, FactError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Set the query timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the PQL predicate for one certname and a set of fact names.
    fn pql(certname: &str, names: &[String]) -> String {
        let clauses = names
            .iter()
            .map(|name| format!("name = \"{name}\""))
            .collect::<Vec<_>>()
            .join(" or ");
        format!("facts {{ certname = \"{certname}\" and ({clauses}) }}")
    }
}

/// Render a fact value for display: bare strings stay unquoted, everything
/// else keeps its JSON form.
fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl FactSource for PuppetDbClient {
    async fn node_facts(&self, certname: &str, names: &[String]) -> Result<Vec<Fact>, FactError> {
        // An empty name set would produce an empty PQL disjunction; there is
        // nothing to ask for anyway.
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.base_url.join(QUERY_PATH)?;
        let query = Self::pql(certname, names);
        tracing::debug!(%certname, %query, "querying puppetdb");

        let response = self
            .http
            .get(url)
            .query(&[("query", query.as_str())])
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FactError::Api {
                status: response.status().as_u16(),
            });
        }

        let rows: Vec<FactRow> = response.json().await?;
        Ok(rows
            .into_iter()
            .map(|row| Fact {
                value: display_value(&row.value),
                name: row.name,
            })
            .collect())
    }
}
