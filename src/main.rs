//! timestamp-voice: speaks or exports a timestamp assembled from snippets.
//!
//! Fields not given on the command line come from the local clock.

use std::time::Instant;

use anyhow::Context;
use timestamp_voice::assets::AnySource;
use timestamp_voice::cli::Cli;
use timestamp_voice::config::StampConfig;
use timestamp_voice::error::StampError;
use timestamp_voice::types::{Field, Resolved};
use timestamp_voice::{logging, Assembler};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let mut config = StampConfig::from_env();
    cli.apply_to(&mut config);
    if let Some(reason) = config.validate() {
        return Err(StampError::invalid_config(reason).into());
    }

    logging::init(&config.log_level);

    let now = chrono::Local::now().naive_local();
    let resolved = cli
        .timestamp_input()
        .resolve(&now)
        .context("Invalid timestamp")?;
    print_resolved(&resolved, &config);

    let source = AnySource::from_base(&config.asset_base, &config.asset_extension)
        .context("Failed to set up snippet source")?;
    let mut assembler = Assembler::new(source, config);
    let parts = resolved.parts;

    let start_time = Instant::now();

    if cli.play {
        eprintln!("Playing...");
        assembler.play(&parts).await.context("Playback failed")?;
    }

    if cli.should_export() {
        let path = assembler
            .export_default(&parts)
            .await
            .context("Export failed")?;
        eprintln!("Saved to: {}", path.display());
    }

    eprintln!("Done in {:.2}s", start_time.elapsed().as_secs_f32());
    Ok(())
}

fn print_resolved(resolved: &Resolved, config: &StampConfig) {
    let parts = &resolved.parts;

    eprintln!("=== timestamp-voice ===");
    eprintln!("Timestamp: {}", parts);
    eprintln!("Snippets: {}", config.asset_base);
    if !resolved.defaulted.is_empty() {
        eprintln!("From clock: {}", defaulted_summary(resolved));
    }
    eprintln!();
}

fn defaulted_summary(resolved: &Resolved) -> String {
    let parts = &resolved.parts;
    resolved
        .defaulted
        .iter()
        .map(|field| {
            let value = match field {
                Field::Hour => parts.hour().to_string(),
                Field::Minute => parts.minute().to_string(),
                Field::AmPm => parts.ampm().to_string(),
                Field::Day => parts.day().to_string(),
                Field::Month => parts.month().to_string(),
                Field::Date => parts.date().to_string(),
                Field::Prefix | Field::On | Field::Suffix => return field.to_string(),
            };
            format!("{}={}", field, value)
        })
        .collect::<Vec<_>>()
        .join(", ")
}
