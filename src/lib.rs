//! # Legalesign Rust SDK
//!
//! Client for the Legalesign document e-signature REST API.
//!
//! Create a [`Client`] with your API credentials, build a signing request,
//! and work with the resulting [`Document`] and its signers.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use legalesign::{Client, Credentials, Signer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new(Credentials::new("api-user-id", "api-secret"))?;
//!
//!     // Send a document for signing
//!     let document = client
//!         .documents()
//!         .create()
//!         .group("my-group")
//!         .name("Employment contract")
//!         .add_signer(Signer::new("Ada", "Lovelace", "ada@example.com"))
//!         .send_with_template_html("template-id")
//!         .await?;
//!
//!     println!("Document {} is {}", document.id, document.status);
//!
//!     // Later: fetch the signed PDF once it is ready
//!     let document = client.documents().find(&document.id).await?;
//!     if let Some(url) = document.pdf_url().await? {
//!         println!("Download from {}", url);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, LegalesignError>`:
//!
//! ```rust,no_run
//! use legalesign::{Client, Credentials, LegalesignError};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Client::new(Credentials::new("api-user-id", "api-secret")).unwrap();
//!
//!     match client.documents().find("doc-id").await {
//!         Ok(doc) => println!("Status: {}", doc.status),
//!         Err(LegalesignError::Authentication) => println!("Invalid credentials"),
//!         Err(LegalesignError::Throttled) => println!("Quota exceeded, back off"),
//!         Err(LegalesignError::Retrieving) => println!("Still processing, retry later"),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

pub mod client;
pub mod documents;
pub mod error;
pub mod signers;
pub mod signing_request;
pub mod types;

// Re-export main types at the crate root
pub use client::{Client, ClientConfig, Credentials, RawResponse};
pub use documents::{Document, DocumentsClient};
pub use error::{LegalesignError, Result, error_for_status};
pub use signers::SignersClient;
pub use signing_request::{DocumentSource, SigningRequest};
pub use types::{DocumentStatus, Signer, SignerStatus, id_from_resource_url, sanitize_id};
