//! actagen – command-line acta → PDF renderer.
//!
//! Usage:
//!   actagen <report.json> [output.pdf] [--assets DIR]
//!
//! The input is a fully resolved report model in JSON (the shape the record
//! service exports). If `output.pdf` is omitted the PDF is written next to
//! the input file with the same stem.

use std::{env, fs, path::PathBuf, process};

use acta_forge::assets::{cached_logo, FileAssetReader};
use acta_forge::{render_report, RenderConfig, ReportModel};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut assets_dir = PathBuf::from("assets");
    let mut positional = 0usize;

    let mut iter = args.iter().skip(1).peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--assets" | "-a" => match iter.next() {
                Some(v) => assets_dir = PathBuf::from(v),
                None => {
                    eprintln!("--assets requires a directory");
                    process::exit(1);
                }
            },
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            path => {
                if positional == 0 {
                    input_path = Some(PathBuf::from(path));
                } else if positional == 1 {
                    output_path = Some(PathBuf::from(path));
                } else {
                    eprintln!("Unexpected argument: {path}");
                    print_usage(&args[0]);
                    process::exit(1);
                }
                positional += 1;
            }
        }
    }

    let input = match input_path {
        Some(p) => p,
        None => {
            eprintln!("Error: no input file specified.");
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    let output = output_path.unwrap_or_else(|| {
        let mut o = input.clone();
        o.set_extension("pdf");
        o
    });

    let json = match fs::read_to_string(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading '{}': {e}", input.display());
            process::exit(1);
        }
    };

    let model: ReportModel = match serde_json::from_str(&json) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error parsing report model: {e}");
            process::exit(1);
        }
    };

    let reader = FileAssetReader::new(&assets_dir);
    let logo = cached_logo(&reader);

    match render_report(&model, &RenderConfig::default(), logo) {
        Ok(report) => {
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() {
                    if let Err(e) = fs::create_dir_all(parent) {
                        eprintln!("Error creating output directory: {e}");
                        process::exit(1);
                    }
                }
            }
            if let Err(e) = fs::write(&output, &report.bytes) {
                eprintln!("Error writing '{}': {e}", output.display());
                process::exit(1);
            }
            for warning in &report.warnings {
                eprintln!("warning: {warning}");
            }
            eprintln!(
                "Wrote '{}' ({} bytes, {} page{})",
                output.display(),
                report.bytes.len(),
                report.page_count,
                if report.page_count == 1 { "" } else { "s" }
            );
        }
        Err(e) => {
            eprintln!("Error rendering report: {e}");
            process::exit(1);
        }
    }
}

fn print_usage(prog: &str) {
    eprintln!("actagen – acta report to PDF renderer (acta-forge)");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <report.json> [output.pdf] [--assets DIR]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <report.json>  Fully resolved report model in JSON");
    eprintln!("  [output.pdf]   Output path (default: same stem as input with .pdf)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --assets, -a   Directory holding static assets like logo.png (default: assets)");
    eprintln!("  --help         Print this message");
}
