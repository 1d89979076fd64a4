//! Basic usage example for the Legalesign SDK.
//!
//! This example demonstrates:
//! - Creating a client from environment credentials
//! - Sending a document for signing from an HTML template
//! - Inspecting signer progress
//! - Fetching the signed PDF location
//!
//! Run with:
//! ```bash
//! LEGALESIGN_USER_ID=... LEGALESIGN_SECRET=... GROUP_ID=... TEMPLATE_ID=... \
//!     RUST_LOG=legalesign=debug cargo run --example basic
//! ```

use legalesign::{Client, LegalesignError, Signer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let group_id = std::env::var("GROUP_ID").expect("GROUP_ID environment variable required");
    let template_id =
        std::env::var("TEMPLATE_ID").expect("TEMPLATE_ID environment variable required");

    println!("Creating Legalesign client...");
    let client = Client::from_env()?;

    println!("\nSending signing request...");
    let document = client
        .documents()
        .create()
        .group(group_id)
        .name("Example agreement")
        .add_signer(Signer::new("Ada", "Lovelace", "ada@example.com"))
        .add_signer(
            Signer::new("Charles", "Babbage", "charles@example.com")
                .with_behalf_of("Analytical Engines Ltd"),
        )
        .sign_in_order(true)
        .send_with_template_html(template_id)
        .await?;

    println!("Created document:");
    println!("  ID:      {}", document.id);
    println!("  Status:  {}", document.status);
    println!("  Created: {}", document.created_at);

    println!("\nSigners:");
    for signer in &document.signers {
        println!(
            "  #{} {} <{}>: {}",
            signer.order,
            signer.full_name(),
            signer.email,
            signer.status
        );
    }

    match document.pdf_url().await {
        Ok(Some(url)) => println!("\nSigned PDF: {}", url),
        Ok(None) => println!("\nSigned PDF not ready yet"),
        Err(LegalesignError::Retrieving) => println!("\nPDF is still being generated"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
