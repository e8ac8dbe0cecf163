//! cipherpane - Encrypted Message Renderer
//!
//! Renders a page snapshot's encrypted placeholders through its scripted agent
//! and prints the resulting page view.

use anyhow::Result;
use clap::{Arg, Command};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging for diagnostics
    env_logger::init();

    // Parse command-line arguments
    let matches = Command::new("cipherpane")
        .version(cipherpane::VERSION)
        .about("Render encrypted message placeholders through a decryption agent")
        .long_about(
            "cipherpane loads a page snapshot, asks the snapshot's decryption agent \
             (if one is present) for a display surface per encrypted message, and prints \
             the resulting page view. Messages that cannot be rendered stay on their \
             fallback content; this is never a fatal condition.",
        )
        .arg(
            Arg::new("snapshot")
                .help("Path to the page snapshot (JSON)")
                .required(true)
                .index(1),
        )
        .get_matches();

    // Get the snapshot path argument
    let snapshot_path = PathBuf::from(
        matches
            .get_one::<String>("snapshot")
            .expect("snapshot argument is required"),
    );

    // Validate snapshot exists
    if !snapshot_path.exists() {
        anyhow::bail!("Snapshot does not exist: {}", snapshot_path.display());
    }

    if !snapshot_path.is_file() {
        anyhow::bail!("Path is not a regular file: {}", snapshot_path.display());
    }

    // Initialize the Application and run a single render pass
    use cipherpane::Application;

    let mut app = Application::new(&snapshot_path)?;
    let report = app.run().await?;

    for message in app.page().rendered_view() {
        let marker = if message.decrypted { "decrypted" } else { "fallback" };
        println!("[{marker}] {}: {}", message.message_id, message.body);
    }
    println!(
        "{} rendered, {} skipped, {} failed",
        report.rendered_count(),
        report.skipped_count(),
        report.failed_count()
    );

    Ok(())
}
