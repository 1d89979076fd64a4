//! Signing requests.
//!
//! A [`SigningRequest`] collects everything needed to create a document:
//! the group it belongs to, its name, the signers, delivery options and,
//! when sent, the document source. Validation and payload generation are
//! pure; only the `send_*` methods touch the network.
//!
//! ```rust,no_run
//! use legalesign::{Client, Credentials, Signer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new(Credentials::new("user-id", "secret"))?;
//!
//!     let document = client
//!         .documents()
//!         .create()
//!         .group("acme")
//!         .name("NDA")
//!         .add_signer(Signer::new("Ada", "Lovelace", "ada@example.com"))
//!         .add_signer(Signer::new("Charles", "Babbage", "charles@example.com"))
//!         .add_cc("legal@example.com")
//!         .signatures_on_all_pages(true)
//!         .send_with_template_pdf("template-id")
//!         .await?;
//!
//!     println!("{}", document.id);
//!     Ok(())
//! }
//! ```

use crate::client::Client;
use crate::documents::Document;
use crate::error::{LegalesignError, Result};
use crate::types::{Signer, id_from_resource_url};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

const SIGNATURE_PLACEMENT_ALL_PAGES: u8 = 1;
const SIGNATURE_PLACEMENT_DEFAULT: u8 = 2;
const SIGNATURE_TYPE_CERTIFIED: u8 = 4;
const SIGNATURE_TYPE_SIMPLE: u8 = 1;
const PDF_PASSWORD_STORED: u8 = 1;
const PDF_PASSWORD_NOT_STORED: u8 = 2;

/// What the document is made from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Inline HTML content.
    Html(String),
    /// Id of a stored HTML template.
    HtmlTemplate(String),
    /// Id of a stored PDF template.
    PdfTemplate(String),
}

/// Builder for a new document.
///
/// Obtain one with `client.documents().create()`. Each setter consumes and
/// returns the builder; the request is consumed when sent.
#[derive(Clone)]
pub struct SigningRequest {
    client: Client,
    group_id: Option<String>,
    name: Option<String>,
    user_id: Option<String>,

    append_validation_info: bool,
    auto_archive: bool,
    send_notification_emails: bool,
    request_signer_links: bool,
    signatures_on_all_pages: bool,
    certify: bool,
    sign_in_order: bool,

    password: Option<String>,
    store_password: bool,

    header: Option<String>,
    header_height: Option<u32>,
    footer: Option<String>,
    footer_height: Option<u32>,

    signers: Vec<Signer>,
    cc: Vec<String>,
}

impl SigningRequest {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            group_id: None,
            name: None,
            user_id: None,
            append_validation_info: true,
            auto_archive: true,
            send_notification_emails: true,
            request_signer_links: false,
            signatures_on_all_pages: false,
            certify: true,
            sign_in_order: true,
            password: None,
            store_password: false,
            header: None,
            header_height: None,
            footer: None,
            footer_height: None,
            signers: Vec::new(),
            cc: Vec::new(),
        }
    }

    /// Group the document is created under. Required.
    #[must_use]
    pub fn group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Document name. Required.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Send on behalf of another user in the group.
    #[must_use]
    pub fn user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Append Legalesign validation info to the final PDF (default: true).
    #[must_use]
    pub fn append_validation_info(mut self, append: bool) -> Self {
        self.append_validation_info = append;
        self
    }

    /// Archive the document once signed (default: true).
    #[must_use]
    pub fn auto_archive(mut self, auto_archive: bool) -> Self {
        self.auto_archive = auto_archive;
        self
    }

    /// Email signers about the request (default: true).
    #[must_use]
    pub fn send_notification_emails(mut self, send: bool) -> Self {
        self.send_notification_emails = send;
        self
    }

    /// Place signatures on every page (default: false).
    #[must_use]
    pub fn signatures_on_all_pages(mut self, all_pages: bool) -> Self {
        self.signatures_on_all_pages = all_pages;
        self
    }

    /// Certify the document (default: true).
    #[must_use]
    pub fn certify(mut self, certify: bool) -> Self {
        self.certify = certify;
        self
    }

    /// Require signers to sign in the order they were added (default: true).
    #[must_use]
    pub fn sign_in_order(mut self, in_order: bool) -> Self {
        self.sign_in_order = in_order;
        self
    }

    /// Ask the API to return signer links (default: false).
    #[must_use]
    pub fn request_signer_links(mut self, request: bool) -> Self {
        self.request_signer_links = request;
        self
    }

    /// Password-protect the final PDF. `store` keeps the password on the
    /// Legalesign side.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>, store: bool) -> Self {
        self.password = Some(password.into());
        self.store_password = store;
        self
    }

    /// Page header template and its height.
    #[must_use]
    pub fn header(mut self, template: impl Into<String>, height: u32) -> Self {
        self.header = Some(template.into());
        self.header_height = Some(height);
        self
    }

    /// Page footer template and its height.
    #[must_use]
    pub fn footer(mut self, template: impl Into<String>, height: u32) -> Self {
        self.footer = Some(template.into());
        self.footer_height = Some(height);
        self
    }

    /// Add a signer. Signers are numbered in the order they are added.
    #[must_use]
    pub fn add_signer(mut self, signer: Signer) -> Self {
        self.signers.push(signer);
        self
    }

    /// Copy an address on all communication about this request.
    #[must_use]
    pub fn add_cc(mut self, email: impl Into<String>) -> Self {
        self.cc.push(email.into());
        self
    }

    /// Send with inline HTML content.
    pub async fn send_with_html(self, html: impl Into<String>) -> Result<Document> {
        self.send(DocumentSource::Html(html.into())).await
    }

    /// Send using a stored HTML template.
    pub async fn send_with_template_html(self, template_id: impl Into<String>) -> Result<Document> {
        self.send(DocumentSource::HtmlTemplate(template_id.into()))
            .await
    }

    /// Send using a stored PDF template.
    pub async fn send_with_template_pdf(self, template_id: impl Into<String>) -> Result<Document> {
        self.send(DocumentSource::PdfTemplate(template_id.into()))
            .await
    }

    /// Create the document and load it.
    ///
    /// The API answers with the new document's URL in `Location`; the id is
    /// read from there and the document fetched.
    pub async fn send(self, source: DocumentSource) -> Result<Document> {
        let payload = self.payload(&source)?;
        let response = self.client.execute("POST", "document/", Some(&payload)).await?;

        let location = response.location().ok_or_else(|| {
            LegalesignError::Decode("document creation response has no Location header".into())
        })?;
        let id = id_from_resource_url(location).ok_or_else(|| {
            LegalesignError::Decode(format!("no document id in Location {location:?}"))
        })?;
        tracing::info!(document_id = %id, signers = self.signers.len(), "created document");

        self.client.documents().find(&id).await
    }

    /// Check that the group, name and signers are all present.
    pub fn validate(&self) -> Result<()> {
        require_text("group_id", self.group_id.as_deref())?;
        require_text("name", self.name.as_deref())?;
        if self.signers.is_empty() {
            return Err(LegalesignError::Validation {
                field: "signers",
                reason: "is required",
            });
        }
        Ok(())
    }

    /// The JSON body sent to the API for the given source.
    pub fn payload(&self, source: &DocumentSource) -> Result<Value> {
        self.validate()?;

        let (text, template, templatepdf) = match source {
            DocumentSource::Html(html) => (Some(html.clone()), None, None),
            DocumentSource::HtmlTemplate(id) => {
                (None, Some(format!("/api/v1/template/{id}/")), None)
            }
            DocumentSource::PdfTemplate(id) => {
                (None, None, Some(format!("/api/v1/templatepdf/{id}/")))
            }
        };

        let payload = Payload {
            group: format!("/api/v1/group/{}/", self.group_id.as_deref().unwrap_or_default()),
            name: self.name.as_deref().unwrap_or_default(),
            append_pdf: self.append_validation_info,
            auto_archive: self.auto_archive,
            do_email: self.send_notification_emails,
            return_signer_links: self.request_signer_links,
            signature_placement: if self.signatures_on_all_pages {
                SIGNATURE_PLACEMENT_ALL_PAGES
            } else {
                SIGNATURE_PLACEMENT_DEFAULT
            },
            signature_type: if self.certify {
                SIGNATURE_TYPE_CERTIFIED
            } else {
                SIGNATURE_TYPE_SIMPLE
            },
            signers_in_order: self.sign_in_order,
            signers: self
                .signers
                .iter()
                .enumerate()
                .map(|(order, signer)| SignerPayload {
                    firstname: &signer.first_name,
                    lastname: &signer.last_name,
                    email: &signer.email,
                    order,
                    behalfof: signer.behalf_of.as_deref(),
                    message: signer.message.as_deref(),
                    extramessage: signer.extra_message.as_deref(),
                })
                .collect(),
            header: self.header.as_deref(),
            header_height: self.header_height,
            footer: self.footer.as_deref(),
            footer_height: self.footer_height,
            cc_emails: (!self.cc.is_empty()).then(|| self.cc.join(",")),
            user: self
                .user_id
                .as_ref()
                .map(|user| format!("/api/v1/user/{user}/")),
            pdf_password: self.password.as_deref(),
            pdf_password_type: self.password.as_ref().map(|_| {
                if self.store_password {
                    PDF_PASSWORD_STORED
                } else {
                    PDF_PASSWORD_NOT_STORED
                }
            }),
            text,
            template,
            templatepdf,
        };

        serde_json::to_value(&payload)
            .map_err(|e| LegalesignError::Decode(format!("failed to encode signing request: {e}")))
    }
}

impl fmt::Debug for SigningRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningRequest")
            .field("group_id", &self.group_id)
            .field("name", &self.name)
            .field("user_id", &self.user_id)
            .field("append_validation_info", &self.append_validation_info)
            .field("auto_archive", &self.auto_archive)
            .field("send_notification_emails", &self.send_notification_emails)
            .field("request_signer_links", &self.request_signer_links)
            .field("signatures_on_all_pages", &self.signatures_on_all_pages)
            .field("certify", &self.certify)
            .field("sign_in_order", &self.sign_in_order)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("store_password", &self.store_password)
            .field("header", &self.header)
            .field("header_height", &self.header_height)
            .field("footer", &self.footer)
            .field("footer_height", &self.footer_height)
            .field("signers", &self.signers)
            .field("cc", &self.cc)
            .finish()
    }
}

fn require_text(field: &'static str, value: Option<&str>) -> Result<()> {
    match value {
        None => Err(LegalesignError::Validation {
            field,
            reason: "is required",
        }),
        Some(v) if v.trim().is_empty() => Err(LegalesignError::Validation {
            field,
            reason: "must not be empty",
        }),
        Some(_) => Ok(()),
    }
}

#[derive(Debug, Serialize)]
struct Payload<'a> {
    group: String,
    name: &'a str,
    append_pdf: bool,
    auto_archive: bool,
    do_email: bool,
    return_signer_links: bool,
    signature_placement: u8,
    signature_type: u8,
    signers_in_order: bool,
    signers: Vec<SignerPayload<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    header_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    footer: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    footer_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cc_emails: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pdf_password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pdf_password_type: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    templatepdf: Option<String>,
}

#[derive(Debug, Serialize)]
struct SignerPayload<'a> {
    firstname: &'a str,
    lastname: &'a str,
    email: &'a str,
    order: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    behalfof: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extramessage: Option<&'a str>,
}
