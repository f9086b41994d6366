#![deny(missing_docs)]

//! # Rewrite Command
//!
//! Collects unit documents (`.json`, `.yaml`, `.yml`) under the given paths,
//! runs one processing round over all of them and writes the results back.

use auto_swagger_core::{
    process_documents, AppError, AppResult, DocumentFormat, EngineConfig, RoundCoordinator,
    Toggle, UnitDocument,
};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Arguments for the rewrite command.
#[derive(clap::Args, Debug, Clone)]
pub struct RewriteArgs {
    /// Unit document files or directories to scan.
    #[clap(required = true)]
    pub paths: Vec<PathBuf>,

    /// Engine config file (YAML or JSON).
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Toggle value; `true` rewrites markers, anything else strips them.
    /// Falls back to `AUTO_SWAGGER_ANNOTATION_ENABLED` when omitted.
    #[clap(long)]
    pub enabled: Option<String>,

    /// Print rewritten documents to stdout instead of writing them.
    #[clap(long)]
    pub dry_run: bool,
}

impl RewriteArgs {
    /// The toggle for this run: `--enabled` if given, else the environment.
    pub fn toggle(&self) -> Toggle {
        match &self.enabled {
            Some(value) => Toggle::from_value(Some(value)),
            None => Toggle::from_env(),
        }
    }
}

/// Executes one round over every collected document.
pub fn execute(args: &RewriteArgs) -> AppResult<()> {
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let toggle = args.toggle();

    let files = collect_files(&args.paths)?;
    tracing::debug!(count = files.len(), %toggle, "collected unit documents");
    if files.is_empty() {
        println!("No unit documents found.");
        return Ok(());
    }

    let docs = files
        .iter()
        .map(|path| UnitDocument::read(path))
        .collect::<AppResult<Vec<_>>>()?;

    let coordinator = RoundCoordinator::from_config(&config);
    let (rewritten, report) = process_documents(&docs, &coordinator, toggle)?;

    let mut changed_files = 0;
    for ((path, before), after) in files.iter().zip(&docs).zip(&rewritten) {
        if before == after {
            continue;
        }
        changed_files += 1;
        if args.dry_run {
            let format = DocumentFormat::from_path(path).unwrap_or(DocumentFormat::Yaml);
            println!("--- {}", path.display());
            print!("{}", after.render(format)?);
        } else {
            after.write(path)?;
            println!("Updated {}", path.display());
        }
    }

    println!(
        "Round {}: {} applied, {} reverted, {} skipped, {} of {} file(s) changed.",
        toggle,
        report.applied,
        report.reverted,
        report.skipped,
        changed_files,
        files.len()
    );
    Ok(())
}

fn is_unit_document(path: &Path) -> bool {
    DocumentFormat::from_path(path).is_some()
}

/// Expands directories, keeps explicit files and sorts the result.
fn collect_files(paths: &[PathBuf]) -> AppResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in paths {
        if !root.exists() {
            return Err(AppError::General(format!("Path not found: {:?}", root)));
        }
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if entry.file_type().is_file() && is_unit_document(path) {
                files.push(path.to_path_buf());
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}
