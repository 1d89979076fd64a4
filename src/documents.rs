//! Document operations.
//!
//! This module provides the DocumentsClient for finding, archiving and
//! deleting documents, and the [`Document`] resource model.

use crate::client::Client;
use crate::error::Result;
use crate::signing_request::SigningRequest;
use crate::types::{
    DocumentStatus, Signer, SignerStatus, id_from_resource_url, parse_timestamp, sanitize_id,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};

/// Client for document operations.
///
/// Access via `client.documents()`.
pub struct DocumentsClient {
    client: Client,
}

impl DocumentsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Load an existing document.
    ///
    /// The id is stripped of anything but ASCII alphanumerics, hyphens and
    /// spaces before the request is made.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use legalesign::{Client, Credentials};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::new(Credentials::new("user-id", "secret"))?;
    ///
    ///     let document = client.documents().find("0a1b2c3d-0000-4000-8000-000000000000").await?;
    ///     for signer in &document.signers {
    ///         println!("{}: {}", signer.full_name(), signer.status);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn find(&self, id: &str) -> Result<Document> {
        let id = sanitize_id(id);
        let info: DocumentInfo = self
            .client
            .execute_json("GET", &format!("document/{id}/"), None)
            .await?;
        Document::hydrate(self.client.clone(), id, info)
    }

    /// Start a new signing request. Sending it creates the document.
    pub fn create(&self) -> SigningRequest {
        SigningRequest::new(self.client.clone())
    }

    /// Archive a document by id.
    pub async fn archive(&self, id: &str) -> Result<()> {
        self.set_archived(id, true).await
    }

    /// Unarchive a document by id.
    pub async fn unarchive(&self, id: &str) -> Result<()> {
        self.set_archived(id, false).await
    }

    /// Delete a document by id.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = sanitize_id(id);
        self.client
            .execute("DELETE", &format!("document/{id}/"), None)
            .await?;
        Ok(())
    }

    async fn set_archived(&self, id: &str, archived: bool) -> Result<()> {
        let id = sanitize_id(id);
        self.client
            .execute(
                "PATCH",
                &format!("document/{id}/"),
                Some(&json!({ "archived": archived })),
            )
            .await?;
        Ok(())
    }
}

/// A document in the signing workflow.
///
/// A snapshot of the remote resource: archiving or deleting changes the
/// remote state only, the local fields are not refreshed.
#[derive(Debug, Clone)]
pub struct Document {
    client: Client,
    /// Document id.
    pub id: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update, or the creation time if never updated.
    pub updated_at: DateTime<Utc>,
    /// When the final signature was applied.
    pub signed_at: Option<DateTime<Utc>>,
    /// Lifecycle state.
    pub status: DocumentStatus,
    /// Whether the signed PDF can be downloaded.
    pub download_ready: bool,
    /// Hash of the final PDF.
    pub download_hash: Option<String>,
    /// Signers, in the order the API lists them.
    pub signers: Vec<Signer>,
}

impl Document {
    fn hydrate(client: Client, id: String, info: DocumentInfo) -> Result<Self> {
        let created_at = parse_timestamp(&info.created)?;
        let updated_at = optional_timestamp(info.updated.as_deref())?.unwrap_or(created_at);
        let signed_at = optional_timestamp(info.sign_time.as_deref())?;

        Ok(Self {
            client,
            id,
            created_at,
            updated_at,
            signed_at,
            status: info
                .status
                .as_ref()
                .and_then(numeric_code)
                .map(DocumentStatus::from_code)
                .unwrap_or(DocumentStatus::Unknown),
            download_ready: info.download_final.unwrap_or(false),
            download_hash: info.hash_value,
            signers: info
                .signers
                .unwrap_or_default()
                .iter()
                .map(|entry| signer_from_tuple(entry))
                .collect(),
        })
    }

    /// Archive this document.
    pub async fn archive(&self) -> Result<()> {
        self.client.documents().archive(&self.id).await
    }

    /// Unarchive this document.
    pub async fn unarchive(&self) -> Result<()> {
        self.client.documents().unarchive(&self.id).await
    }

    /// Delete this document.
    pub async fn delete(self) -> Result<()> {
        self.client.documents().delete(&self.id).await
    }

    /// Where the signed PDF can be fetched from.
    ///
    /// Returns `None`, without contacting the API, while the document is not
    /// ready for download. Otherwise returns the `Location` the API points
    /// to, falling back to the response body.
    pub async fn pdf_url(&self) -> Result<Option<String>> {
        if !self.download_ready {
            return Ok(None);
        }
        let response = self
            .client
            .execute("GET", &format!("pdf/{}/", self.id), None)
            .await?;
        Ok(Some(match response.location() {
            Some(location) => location.to_string(),
            None => response.text(),
        }))
    }
}

#[derive(Debug, Deserialize)]
struct DocumentInfo {
    created: String,
    #[serde(default)]
    updated: Option<String>,
    #[serde(default)]
    sign_time: Option<String>,
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    download_final: Option<bool>,
    #[serde(default)]
    hash_value: Option<String>,
    #[serde(default)]
    signers: Option<Vec<Vec<Value>>>,
}

// Blank timestamps count as absent.
fn optional_timestamp(value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(parse_timestamp)
        .transpose()
}

// Status codes arrive as numbers or numeric strings.
fn numeric_code(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// Signer entries are positional:
// [url, first name, last name, email, behalf of, _, status, order]
fn signer_from_tuple(entry: &[Value]) -> Signer {
    let text = |index: usize| -> String {
        match entry.get(index) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    };
    let number = |index: usize| entry.get(index).and_then(numeric_code);

    let behalf_of = text(4);
    Signer {
        id: id_from_resource_url(&text(0)),
        first_name: text(1),
        last_name: text(2),
        email: text(3),
        behalf_of: (!behalf_of.is_empty()).then_some(behalf_of),
        message: None,
        extra_message: None,
        status: number(6)
            .map(SignerStatus::from_code)
            .unwrap_or(SignerStatus::Unknown),
        order: number(7)
            .and_then(|order| u32::try_from(order).ok())
            .unwrap_or(0),
    }
}
