//! `inspect` command implementation.
//!
//! Classifies every input line without creating any destination, so a
//! malformed file can be diagnosed before a conversion run.

use std::fs::File;
use std::io::{BufRead, BufReader};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use classifier::LineClassifier;
use contracts::{ClassifiedRecord, OutputLayout};

use crate::cli::InspectArgs;
use crate::error::CliError;

/// Inspection result for JSON output
#[derive(Serialize)]
struct InspectReport {
    valid: bool,
    input: String,
    layout: OutputLayout,
    lines: u64,
    coordinates: u64,
    indices: u64,
    headers: u64,
    singletons: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    unrecognized: Option<UnrecognizedLine>,
}

#[derive(Serialize)]
struct UnrecognizedLine {
    line_no: u64,
    text: String,
}

/// Execute the `inspect` command
pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    info!(input = %args.input.display(), "Inspecting input");

    if !args.input.exists() {
        return Err(CliError::input_not_found(args.input.display().to_string()).into());
    }

    let report = inspect_file(args)?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&report).context("Failed to serialize inspect report")?;
        println!("{}", json);
    } else {
        print_report(&report);
    }

    if report.valid {
        Ok(())
    } else {
        anyhow::bail!("Input contains unrecognized lines")
    }
}

fn inspect_file(args: &InspectArgs) -> Result<InspectReport, CliError> {
    let layout: OutputLayout = args.layout.into();
    let classifier = LineClassifier::new(layout.singleton_anchor());

    let mut report = InspectReport {
        valid: true,
        input: args.input.display().to_string(),
        layout,
        lines: 0,
        coordinates: 0,
        indices: 0,
        headers: 0,
        singletons: 0,
        unrecognized: None,
    };

    let reader = BufReader::new(File::open(&args.input)?);
    for line in reader.lines() {
        let line = line?;
        report.lines += 1;

        match classifier.classify(line.trim_end()) {
            ClassifiedRecord::Coordinate { .. } => report.coordinates += 1,
            ClassifiedRecord::Header { .. } => report.headers += 1,
            ClassifiedRecord::IndexTriple { .. } => report.indices += 1,
            ClassifiedRecord::Singleton => report.singletons += 1,
            ClassifiedRecord::Unrecognized => {
                // First offender only; it would abort a conversion run anyway.
                if report.unrecognized.is_none() {
                    report.valid = false;
                    report.unrecognized = Some(UnrecognizedLine {
                        line_no: report.lines,
                        text: line.trim_end().to_string(),
                    });
                }
            }
        }
    }

    Ok(report)
}

fn print_report(report: &InspectReport) {
    if report.valid {
        println!("✓ Input is well-formed: {}", report.input);
    } else {
        println!("✗ Input contains unrecognized lines: {}", report.input);
    }

    println!("\n  Layout: {}", report.layout);
    println!("  Lines: {}", report.lines);
    println!("  Coordinates: {}", report.coordinates);
    println!("  Index triples: {}", report.indices);
    println!("  Headers: {}", report.headers);
    println!("  Singleton markers: {}", report.singletons);

    if let Some(ref bad) = report.unrecognized {
        println!("\n  First unrecognized line {}: '{}'", bad.line_no, bad.text);
    }
}
