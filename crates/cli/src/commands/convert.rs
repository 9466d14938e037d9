//! `skillport convert`: reads artifacts from disk, converts them and writes
//! the results under the output directory.

use crate::cli::ConvertArgs;
use crate::report::{ConvertReport, ConvertedItem, Failure, SkipReason};
use anyhow::{anyhow, bail, Context, Result};
use skillport_convert::{
    convert_mcp_with_info, convert_with_fallback_name, detect, detect_mcp_format,
    detect_mcp_format_from_content, is_mcp_config_path, merge_mcp_configs, name_from_path,
    parse_mcp_config, Artifact, Dialect, McpConfig,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Hidden directories that hold dialect artifacts and are walked anyway.
const DIALECT_DIRS: &[&str] = &[".claude", ".github", ".cursor", ".opencode", ".vscode"];

/// A file found under the source, with the path used for detection.
#[derive(Debug, Clone)]
struct SourceFile {
    path: PathBuf,
    detect_path: PathBuf,
}

/// Converted output waiting to be written.
struct Planned {
    source: PathBuf,
    destination: PathBuf,
    content: String,
    warnings: Vec<String>,
}

/// Destinations produced so far in one run, each with the source that
/// produced it.
type Claimed = BTreeMap<PathBuf, PathBuf>;

/// Runs the convert command and prints its summary.
pub fn run(args: &ConvertArgs) -> Result<()> {
    let report = execute(args)?;
    if args.format.is_json() {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.format_summary(args.to.display_name()));
    }
    info!(
        target: "skillport::convert",
        converted = report.converted.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        dry_run = report.dry_run,
        "Conversion finished"
    );
    if report.all_failed() {
        bail!("every source file failed to convert");
    }
    Ok(())
}

/// Converts everything under `args.source` and returns what happened.
pub fn execute(args: &ConvertArgs) -> Result<ConvertReport> {
    let root = resolve_source(&args.source)?;
    let files = collect_sources(&root)?;
    if files.is_empty() {
        bail!(
            "no skill, command, instructions or MCP config files found at {}",
            root.display()
        );
    }

    let mut report = ConvertReport::new(args.dry_run);
    let mut claimed = Claimed::new();
    let mut mcp_configs = Vec::new();
    let mut mcp_sources = Vec::new();

    for file in &files {
        debug!(target: "skillport::convert", path = %file.path.display(), "Converting");

        if is_mcp_config_path(&file.detect_path) {
            match read_mcp_config(file, args.from) {
                Ok(config) => {
                    mcp_configs.push(config);
                    mcp_sources.push(file.path.clone());
                }
                Err(err) => record_failure(&mut report, &file.path, err),
            }
            continue;
        }

        let result = plan_artifact(file, args).and_then(|planned| {
            claim(&mut claimed, &planned)?;
            emit(planned, args, &mut report)
        });
        if let Err(err) = result {
            record_failure(&mut report, &file.path, err);
        }
    }

    if !mcp_configs.is_empty() {
        let source = match mcp_sources.as_slice() {
            [single] => single.clone(),
            _ => root.clone(),
        };
        let result = plan_mcp(merge_mcp_configs(mcp_configs), &source, args).and_then(|planned| {
            claim(&mut claimed, &planned)?;
            emit(planned, args, &mut report)
        });
        if let Err(err) = result {
            record_failure(&mut report, &source, err);
        }
    }

    Ok(report)
}

/// Returns the local path for `source`, rejecting remote sources.
fn resolve_source(source: &str) -> Result<PathBuf> {
    let path = PathBuf::from(source);
    if path.exists() {
        return Ok(path);
    }
    if is_remote_source(source) {
        bail!(
            "remote source '{source}' is not supported; clone or download it and pass the local path"
        );
    }
    bail!("source path does not exist: {source}")
}

/// Recognises URLs, scp-style git remotes and `owner/repo[:path][@ref]`.
fn is_remote_source(source: &str) -> bool {
    if ["http://", "https://", "git@"]
        .iter()
        .any(|prefix| source.starts_with(prefix))
    {
        return true;
    }
    let repo = source.split([':', '@']).next().unwrap_or(source);
    let mut parts = repo.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(name), None) => is_repo_segment(owner) && is_repo_segment(name),
        _ => false,
    }
}

fn is_repo_segment(segment: &str) -> bool {
    !segment.is_empty()
        && !segment.starts_with('.')
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Lists the files to convert: the file itself, or every detectable file
/// under a directory in path order.
fn collect_sources(root: &Path) -> Result<Vec<SourceFile>> {
    if root.is_file() {
        let file = SourceFile {
            path: root.to_path_buf(),
            detect_path: root.to_path_buf(),
        };
        return Ok(if is_candidate(&file.detect_path) {
            vec![file]
        } else {
            Vec::new()
        });
    }

    // The root's own name carries signal (`.claude`, `skills`), its parents do not.
    let base = root.file_name().map(PathBuf::from).unwrap_or_default();
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry));
    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let detect_path = base.join(relative);
        if is_candidate(&detect_path) {
            files.push(SourceFile {
                path: entry.path().to_path_buf(),
                detect_path,
            });
        }
    }
    Ok(files)
}

fn is_skipped_dir(entry: &walkdir::DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') && !DIALECT_DIRS.iter().any(|dir| *dir == name)
}

fn is_candidate(path: &Path) -> bool {
    is_mcp_config_path(path) || detect(path).is_some()
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn plan_artifact(file: &SourceFile, args: &ConvertArgs) -> Result<Planned> {
    let detection = detect(&file.detect_path)
        .ok_or_else(|| anyhow!("cannot determine artifact kind for {}", file.path.display()))?;
    if detection.ambiguous {
        warn!(
            target: "skillport::convert",
            path = %file.path.display(),
            kind = %detection.kind,
            "Path matches more than one artifact kind; using the first match"
        );
    }
    let dialect = args.from.unwrap_or(detection.dialect);
    let content = read_source(&file.path)?;
    let artifact = Artifact::parse(detection.kind, dialect, &content).with_context(|| {
        format!(
            "Failed to parse {} as {dialect} {}",
            file.path.display(),
            detection.kind
        )
    })?;
    let conversion =
        convert_with_fallback_name(&artifact, args.to, &name_from_path(&file.detect_path))
            .with_context(|| format!("Failed to convert {}", file.path.display()))?;

    Ok(Planned {
        source: file.path.clone(),
        destination: args
            .output
            .join(&conversion.directory)
            .join(&conversion.filename),
        content: conversion.content,
        warnings: conversion.warnings,
    })
}

fn read_mcp_config(file: &SourceFile, from: Option<Dialect>) -> Result<McpConfig> {
    let content = read_source(&file.path)?;
    let dialect = from
        .or_else(|| detect_mcp_format(&file.detect_path))
        .or_else(|| detect_mcp_format_from_content(&content))
        .unwrap_or(Dialect::Claude);
    parse_mcp_config(&content, dialect)
        .with_context(|| format!("Failed to parse MCP config {}", file.path.display()))
}

fn plan_mcp(config: McpConfig, source: &Path, args: &ConvertArgs) -> Result<Planned> {
    let conversion = convert_mcp_with_info(&config, args.to)
        .with_context(|| format!("Failed to convert MCP config from {}", source.display()))?;
    Ok(Planned {
        source: source.to_path_buf(),
        destination: args.output.join(&conversion.filename),
        content: conversion.content,
        warnings: conversion.warnings,
    })
}

/// Reserves `planned.destination` for its source. A later source converting
/// to an already claimed file is an error.
fn claim(claimed: &mut Claimed, planned: &Planned) -> Result<()> {
    if let Some(first) = claimed.get(&planned.destination) {
        bail!(
            "{} would also be written from {}; convert one of them separately",
            planned.destination.display(),
            first.display()
        );
    }
    claimed.insert(planned.destination.clone(), planned.source.clone());
    Ok(())
}

/// Prints warnings, then writes `planned` unless the destination is current,
/// would be overwritten without `--force`, or this is a dry run.
fn emit(planned: Planned, args: &ConvertArgs, report: &mut ConvertReport) -> Result<()> {
    for warning in &planned.warnings {
        eprintln!("warning: {}: {}", planned.source.display(), warning);
    }

    let skip = match fs::read_to_string(&planned.destination) {
        Ok(existing) if existing == planned.content => Some(SkipReason::Unchanged {
            path: planned.destination.clone(),
        }),
        Ok(_) if !args.force => Some(SkipReason::WouldOverwrite {
            path: planned.destination.clone(),
        }),
        _ => None,
    };

    match &skip {
        Some(reason) => warn!(
            target: "skillport::convert",
            source = %planned.source.display(),
            "{}",
            reason.description()
        ),
        None if args.dry_run => {
            if !args.format.is_json() {
                println!(
                    "would write {} -> {}",
                    planned.source.display(),
                    planned.destination.display()
                );
            }
        }
        None => write_file(&planned.destination, &planned.content)?,
    }

    report.converted.push(ConvertedItem {
        source: planned.source,
        destination: planned.destination,
        warnings: planned.warnings,
    });
    report.skipped.extend(skip);
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!(target: "skillport::convert", path = %path.display(), "Wrote converted file");
    Ok(())
}

fn record_failure(report: &mut ConvertReport, source: &Path, err: anyhow::Error) {
    warn!(
        target: "skillport::convert",
        path = %source.display(),
        error = %format!("{err:#}"),
        "Skipping file that failed to convert"
    );
    report.failed.push(Failure {
        source: source.to_path_buf(),
        error: format!("{err:#}"),
    });
}
