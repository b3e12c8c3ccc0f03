//! # Facetwork - Metamodel Inspector
//!
//! The command-line front end for the Facetwork metamodel.
//!
//! ## Usage
//!
//! ```bash
//! # Resolved names and descriptions, translated into the configured locale
//! facetwork --config facetwork.toml describe
//!
//! # Gettext template of every translatable string
//! facetwork extract -o messages.pot
//!
//! # Process clock, fixture time if configured
//! facetwork clock --json-mode
//!
//! # Act as another user
//! facetwork whoami --user sven --role admin --role clerk
//! ```

use clap::Parser;
use facetwork::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // FACETWORK_LOG_FORMAT=json enables machine-parseable output.
    let log_format =
        std::env::var("FACETWORK_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "facetwork=info".into());

    // Logs go to stderr so reports on stdout stay parseable.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Facetwork startup banner.
fn print_banner() {
    println!(
        r#"
  Facetwork v{}
  Named • Described • Translated
"#,
        env!("CARGO_PKG_VERSION")
    );
}
