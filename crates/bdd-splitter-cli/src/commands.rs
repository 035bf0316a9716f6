//! The `split` and `concretize` commands.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bdd_splitter::format::Formatter;
use bdd_splitter::model::IdGenerator;
use bdd_splitter::parser::{DocumentParser, GherkinParser};
use bdd_splitter::pipeline::{
    Concretized, FEATURE_EXTENSION, SplitOptions, concretize_document, source_stem, split_document,
};
use bdd_splitter::tags::{AcceptAll, TagExpression, TagPredicate};
use eyre::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cli::{ConcretizeArgs, SplitArgs};
use crate::config::Config;
use crate::discovery::collect_feature_files;
use crate::error::CliError;

/// One file written by `split`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFile {
    /// Feature file the scenario came from.
    pub source: String,
    /// Output identifier, `<stem>_<n>`.
    pub id: String,
    /// Path of the written file.
    pub path: String,
}

/// Split every feature file under `args.source` into `args.out_dir`.
///
/// Documents that cannot be read, parsed or written are logged and skipped.
/// Sources sharing a file name map to the same outputs; a later source
/// overwrites an earlier one with a warning.
///
/// # Errors
///
/// Returns an error for an invalid tag expression, when the source location
/// cannot be listed, when the output directory cannot be created, or when
/// the JSON report cannot be written.
pub fn split(config: &Config, args: &SplitArgs) -> Result<Vec<WrittenFile>> {
    let expression = args
        .tags
        .as_deref()
        .map(TagExpression::parse)
        .transpose()
        .map_err(CliError::from)?;
    let predicate = expression
        .as_ref()
        .map_or(&AcceptAll as &dyn TagPredicate, |expr| expr as &dyn TagPredicate);
    let options = SplitOptions {
        predicate,
        substitute: args.substitute,
        language: config.language.as_deref(),
    };

    let files = collect_feature_files(&args.source).map_err(|source| CliError::Discovery {
        path: args.source.clone(),
        source,
    })?;
    let mut written = Vec::new();
    if files.is_empty() {
        warn!(source = %args.source.display(), "no feature files found");
    } else {
        fs::create_dir_all(&args.out_dir).wrap_err_with(|| {
            format!("failed to create output directory {}", args.out_dir.display())
        })?;
    }

    let formatter = config.formatter();
    let mut claimed = HashMap::new();
    for path in &files {
        match split_file(path, &args.out_dir, config, &options, formatter, &mut claimed) {
            Ok(mut records) => written.append(&mut records),
            Err(err) => {
                warn!(path = %path.display(), error = %format!("{err:#}"), "skipping feature file");
            }
        }
    }
    info!(files = files.len(), written = written.len(), "split finished");

    if args.json {
        write_report_json(&mut io::stdout(), &written)?;
    }
    Ok(written)
}

fn split_file(
    path: &Path,
    out_dir: &Path,
    config: &Config,
    options: &SplitOptions<'_>,
    formatter: &dyn Formatter,
    claimed: &mut HashMap<PathBuf, PathBuf>,
) -> Result<Vec<WrittenFile>> {
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    let name = path.to_string_lossy();
    let stem = source_stem(&name);
    let mut ids = IdGenerator::new(stem);
    let document = GherkinParser::with_language(config.language.clone())
        .parse(&text, &mut ids)
        .wrap_err_with(|| format!("failed to parse {}", path.display()))?;

    let outcome = split_document(&document, stem, options, &mut ids);
    if outcome.candidates == 0 {
        debug!(path = %path.display(), "no scenarios found");
    } else if outcome.rejected_all() {
        info!(
            path = %path.display(),
            candidates = outcome.candidates,
            "tag filter rejected every scenario"
        );
    }

    let mut records = Vec::with_capacity(outcome.outputs.len());
    for output in outcome.outputs {
        let target = out_dir.join(format!("{}.{FEATURE_EXTENSION}", output.id));
        if let Some(earlier) = claimed.insert(target.clone(), path.to_path_buf()) {
            warn!(
                source = %path.display(),
                earlier = %earlier.display(),
                path = %target.display(),
                "output overwrites one written earlier in this run"
            );
        }
        fs::write(&target, formatter.format(&output.text))
            .wrap_err_with(|| format!("failed to write {}", target.display()))?;
        info!(source = %path.display(), path = %target.display(), "wrote scenario");
        records.push(WrittenFile {
            source: path.display().to_string(),
            id: output.id,
            path: target.display().to_string(),
        });
    }
    Ok(records)
}

fn write_report_json(writer: &mut dyn Write, records: &[WrittenFile]) -> Result<()> {
    serde_json::to_writer(&mut *writer, records).wrap_err("failed to serialise split report")?;
    writer
        .write_all(b"\n")
        .wrap_err("failed to terminate JSON output with newline")?;
    writer.flush().wrap_err("failed to flush JSON output")
}

/// Rewrite `args.file` in place when its first scenario is a one-row
/// outline. Returns whether the file changed.
///
/// # Errors
///
/// Returns an error when the file cannot be read, parsed or written.
pub fn concretize(config: &Config, args: &ConcretizeArgs) -> Result<bool> {
    let path = &args.file;
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    let name = path.to_string_lossy();
    let mut ids = IdGenerator::new(source_stem(&name));
    let document = GherkinParser::with_language(config.language.clone())
        .parse(&text, &mut ids)
        .wrap_err_with(|| format!("failed to parse {}", path.display()))?;

    match concretize_document(&document, config.language.as_deref(), &mut ids) {
        Concretized::Rewritten(rewritten) => {
            fs::write(path, config.formatter().format(&rewritten))
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "concretized scenario outline");
            Ok(true)
        }
        Concretized::Unchanged(reason) => {
            info!(path = %path.display(), %reason, "left unchanged");
            Ok(false)
        }
    }
}
