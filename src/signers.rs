//! Signer operations.
//!
//! This module provides the SignersClient for reminding signers, issuing
//! fresh signing links and reading the values a signer filled in.

use crate::client::Client;
use crate::error::{LegalesignError, Result};
use crate::types::sanitize_id;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Client for signer operations.
///
/// Access via `client.signers()`. Signer ids come from
/// [`Signer::id`](crate::types::Signer::id) on a loaded document.
pub struct SignersClient {
    client: Client,
}

impl SignersClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Send the signer a reminder email, optionally with custom text.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use legalesign::{Client, Credentials};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::new(Credentials::new("user-id", "secret"))?;
    ///     let document = client.documents().find("doc-id").await?;
    ///
    ///     for signer in &document.signers {
    ///         if let Some(id) = &signer.id {
    ///             client.signers().remind(id, Some("Friendly nudge")).await?;
    ///         }
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn remind(&self, signer_id: &str, text: Option<&str>) -> Result<()> {
        let id = sanitize_id(signer_id);
        let mut body = Map::new();
        if let Some(text) = text {
            body.insert("text".to_string(), Value::String(text.to_string()));
        }
        self.client
            .execute(
                "POST",
                &format!("signer/{id}/send-reminder/"),
                Some(&Value::Object(body)),
            )
            .await?;
        Ok(())
    }

    /// Issue a new signing link for the signer.
    pub async fn signing_link(&self, signer_id: &str) -> Result<String> {
        let id = sanitize_id(signer_id);
        let response = self
            .client
            .execute("GET", &format!("signer/{id}/new-link/"), None)
            .await?;
        response
            .location()
            .map(str::to_string)
            .ok_or_else(|| LegalesignError::Decode("new-link response has no Location header".into()))
    }

    /// Field values the signer filled in, keyed by field label.
    ///
    /// Fields without a label are skipped.
    pub async fn fields(&self, signer_id: &str) -> Result<BTreeMap<String, String>> {
        let id = sanitize_id(signer_id);
        let fields: Vec<SignerField> = self
            .client
            .execute_json("GET", &format!("signer/{id}/fields/"), None)
            .await?;
        Ok(collect_fields(fields))
    }
}

#[derive(Debug, Deserialize)]
struct SignerField {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    value: Value,
}

fn collect_fields(fields: Vec<SignerField>) -> BTreeMap<String, String> {
    fields
        .into_iter()
        .filter_map(|field| {
            let label = field.label.filter(|l| !l.trim().is_empty())?;
            let value = match field.value {
                Value::Null => String::new(),
                Value::String(s) => s,
                other => other.to_string(),
            };
            Some((label, value))
        })
        .collect()
}
