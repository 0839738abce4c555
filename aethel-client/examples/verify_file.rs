//! Verify Example
//!
//! Verifies an Aethel source file, then compiles it if it was proved.
//! Without a file argument it lists the backend's sample programs.
//!
//! To run this example:
//! ```
//! AETHEL_API_URL=http://localhost:8000 cargo run --example verify_file -- transfer.ae
//! ```

use std::env;
use std::fs;

use aethel_client::{aethel_client, ServiceClient, VerificationStatus};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let client = aethel_client()?;
    println!("Aethel backend: {}", client.base_url());

    if !client.health_check().await? {
        eprintln!("Backend does not report healthy, continuing anyway");
    }

    let Some(path) = env::args().nth(1) else {
        let examples = client.examples().await;
        if examples.is_empty() {
            println!("No examples available");
        }
        for example in examples {
            println!("\n{} - {}", example.name, example.description);
            println!("{}", example.code);
        }
        return Ok(());
    };

    let code = fs::read_to_string(&path)?;
    let outcome = client.verify(&code).await;

    println!("[{}] {}", outcome.status, outcome.message);
    for (i, step) in outcome.audit_steps().iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }

    if outcome.status == VerificationStatus::Proved {
        let compiled = client.compile(&code).await?;
        println!("\nCompile result:\n{}", serde_json::to_string_pretty(compiled.as_value())?);
    }

    Ok(())
}
