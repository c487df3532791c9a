//! `convert` command implementation.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::info;

use dispatcher::{create_dispatcher, ConversionReport, DispatcherConfig};

use crate::cli::ConvertArgs;
use crate::error::CliError;

/// Execute the `convert` command
pub async fn run_convert(args: &ConvertArgs) -> Result<()> {
    let start = Instant::now();

    let config = build_config(args)?;

    info!(
        input = %config.input.display(),
        layout = %config.layout,
        output_dir = %config.output_dir.display(),
        "Starting conversion"
    );

    let dispatcher = create_dispatcher(config)
        .await
        .context("Failed to start conversion pipeline")?;

    let report = dispatcher.run().await.map_err(CliError::from)?;
    let duration = start.elapsed();

    info!(
        lines = report.lines_read,
        routed = report.records_routed,
        duration_secs = duration.as_secs_f64(),
        "Conversion complete"
    );

    print_summary(&report, duration);
    Ok(())
}

/// Validate the input path and derive the dispatcher configuration from it.
fn build_config(args: &ConvertArgs) -> Result<DispatcherConfig, CliError> {
    let input = &args.input;

    if !input.exists() {
        return Err(CliError::input_not_found(input.display().to_string()));
    }

    match input.extension().and_then(|e| e.to_str()) {
        Some("ver") => {}
        _ => return Err(CliError::invalid_extension(input.display().to_string())),
    }

    let base_name = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CliError::no_base_name(input.display().to_string()))?
        .to_string();

    let output_dir = args.output_dir.clone().unwrap_or_else(|| {
        match input.parent() {
            Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
            Some(parent) => parent.to_path_buf(),
            None => PathBuf::from("."),
        }
    });

    Ok(DispatcherConfig {
        input: input.clone(),
        output_dir,
        base_name,
        layout: args.layout.into(),
        queue_capacity: args.queue_capacity,
    })
}

fn print_summary(report: &ConversionReport, duration: Duration) {
    println!("\n  Conversion summary");
    println!("   ├─ Lines read: {}", report.lines_read);
    println!("   ├─ Records routed: {}", report.records_routed);
    println!("   ├─ Singleton markers dropped: {}", report.singletons_dropped);
    if report.headers_dropped > 0 {
        println!("   ├─ Header lines dropped: {}", report.headers_dropped);
    }
    for sink in &report.sinks {
        println!("   ├─ {}: {} rows", sink.name, sink.rows_written);
    }
    println!("   └─ Duration: {:.3}s", duration.as_secs_f64());
}
