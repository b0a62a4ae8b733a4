use std::path::{Path, PathBuf};

use campaign_map_shared::models::MapDescriptor;
use campaign_map_shared::validate::{self, Severity};
use serde::Serialize;

const USAGE: &str = "Usage: map-lint [--root <assets-dir>] [--json] <descriptor.json>...";

/// Directory served under `/static`; sub-map paths are resolved against it.
const DEFAULT_ROOT: &str = "assets";

#[derive(Debug, PartialEq)]
struct Args {
    root: PathBuf,
    json: bool,
    files: Vec<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut root = PathBuf::from(DEFAULT_ROOT);
    let mut json = false;
    let mut files = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--root" => {
                let dir = iter
                    .next()
                    .ok_or_else(|| "--root needs a directory".to_string())?;
                root = PathBuf::from(dir);
            }
            "--json" => json = true,
            flag if flag.starts_with("--") => return Err(format!("Unknown flag: {flag}")),
            file => files.push(PathBuf::from(file)),
        }
    }
    if files.is_empty() {
        return Err("at least one descriptor file is required".to_string());
    }
    Ok(Args { root, json, files })
}

/// Map a path from descriptor data onto the assets directory.
///
/// `/static/img/x.webp`, `static/img/x.webp` and `img/x.webp` all land on `<root>/img/x.webp`.
fn resolve_site_path(root: &Path, path: &str) -> PathBuf {
    let relative = path.trim().trim_start_matches('/');
    let relative = relative.strip_prefix("static/").unwrap_or(relative);
    root.join(relative)
}

#[derive(Debug, Default, Serialize)]
struct FileReport {
    path: String,
    pois: usize,
    unplaced: Vec<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn check_file(root: &Path, path: &Path) -> FileReport {
    let mut report = FileReport {
        path: path.display().to_string(),
        ..FileReport::default()
    };

    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) => {
            report.errors.push(format!("cannot read file: {e}"));
            return report;
        }
    };
    let descriptor = match MapDescriptor::from_json(&report.path, &data) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            report.errors.push(e.to_string());
            return report;
        }
    };

    report.pois = descriptor.points_of_interest.len();
    report.unplaced = descriptor
        .points_of_interest
        .iter()
        .filter(|p| !p.is_placed())
        .map(|p| p.id.clone())
        .collect();

    for issue in validate::validate_descriptor(&descriptor) {
        match issue.severity {
            Severity::Error => report.errors.push(issue.to_string()),
            Severity::Warning => report.warnings.push(issue.to_string()),
        }
    }
    for (id, linked) in validate::linked_paths(&descriptor) {
        let resolved = resolve_site_path(root, linked);
        if !resolved.exists() {
            report
                .errors
                .push(format!("error: [{id}] {linked} not found at {}", resolved.display()));
        }
    }
    report
}

fn format_report(report: &FileReport) -> String {
    let mut out = format!(
        "=== {} ===\n  Points of interest: {}\n  Unplaced: {}\n",
        report.path,
        report.pois,
        report.unplaced.len()
    );
    for line in report.errors.iter().chain(&report.warnings) {
        out.push_str(&format!("  {line}\n"));
    }
    out
}

fn main() {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&raw).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("{USAGE}");
        std::process::exit(2);
    });

    let reports: Vec<FileReport> = args
        .files
        .iter()
        .map(|file| check_file(&args.root, file))
        .collect();

    if args.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize report: {e}");
                std::process::exit(2);
            }
        }
    } else {
        for report in &reports {
            print!("{}", format_report(report));
        }
    }

    let errors: usize = reports.iter().map(|r| r.errors.len()).sum();
    if errors > 0 {
        eprintln!("{errors} error(s) in {} file(s)", reports.len());
        std::process::exit(1);
    }
}
