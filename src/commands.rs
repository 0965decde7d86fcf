//! CLI commands for lolspan: classify, names, legend.

use std::path::{Path, PathBuf};

use lolspan::config::Config;
use lolspan::document::{LineIndex, Position};
use lolspan::error::Error;
use lolspan::legend::LEGEND;
use lolspan::references;
use lolspan::{Classifier, HighlightSpan};
use serde::Serialize;

use crate::scanner;

/// How classified spans are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One JSON array with a `{path, spans}` object per file.
    Json,
    /// One line per span: `path:line:col-line:col function[declaration] name`.
    #[default]
    Text,
}

/// Spans for one file, as printed in JSON output.
#[derive(Debug, Serialize)]
struct FileSpans {
    /// The classified file.
    path: PathBuf,
    /// Spans with host-side positions attached.
    spans: Vec<SpanRecord>,
}

/// A highlight span plus the positions and text a host would render.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpanRecord {
    /// One past the last character.
    end_position: Position,
    /// The highlighted identifier.
    name: String,
    /// The span as emitted by the classifier.
    #[serde(flatten)]
    span: HighlightSpan,
    /// First character.
    start_position: Position,
}

/// Load the config from `--config` if given, else from the working directory.
///
/// # Errors
///
/// Returns config loading errors.
pub fn load_config(config_path: Option<&Path>) -> Result<Config, Error> {
    return match config_path {
        Some(path) => Config::load_from(path),
        None => Config::load(Path::new(".")),
    };
}

/// Classify every source file under `paths` and print the spans.
///
/// # Errors
///
/// Returns errors from config loading, file discovery, reading, or JSON output.
pub fn classify(paths: &[PathBuf], format: OutputFormat, config: &Config) -> Result<(), Error> {
    let sources = scanner::collect_sources(paths, config)?;
    let classifier = Classifier::new(config.options());

    let mut files = Vec::with_capacity(sources.len());
    for path in &sources {
        files.push(classify_file(&classifier, path)?);
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&files)?),
        OutputFormat::Text => print_text(&files),
    }

    let total: usize = files.iter().map(|f| return f.spans.len()).sum();
    tracing::info!(files = files.len(), spans = total, "classification finished");
    return Ok(());
}

/// Read and classify one file.
///
/// # Errors
///
/// Returns `Error::FileNotFound` or `Error::Io` if the file cannot be read.
fn classify_file(classifier: &Classifier, path: &Path) -> Result<FileSpans, Error> {
    let text = read_source(path)?;
    let index = LineIndex::new(&text);

    let spans = classifier
        .classify(&text)
        .into_iter()
        .map(|span| {
            return SpanRecord {
                end_position: index.position(span.end),
                name: span.text(&text).unwrap_or_default().to_string(),
                start_position: index.position(span.start),
                span,
            };
        })
        .collect();

    tracing::debug!(path = %path.display(), "classified file");
    return Ok(FileSpans { path: path.to_path_buf(), spans });
}

/// Print the fixed category/modifier legend.
///
/// # Errors
///
/// Returns `Error::Json` if JSON serialization fails.
pub fn legend(json: bool) -> Result<(), Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(&LEGEND)?);
        return Ok(());
    }

    println!("token types:");
    for (idx, t) in LEGEND.token_types.iter().enumerate() {
        println!("  {idx:>2}  {}", t.as_str());
    }
    println!("token modifiers:");
    for (idx, m) in LEGEND.token_modifiers.iter().enumerate() {
        println!("  {idx:>2}  {}", m.as_str());
    }
    return Ok(());
}

/// List the function names declared in a file, in declaration order.
///
/// # Errors
///
/// Returns `Error::FileNotFound` or `Error::Io` if the file cannot be read.
pub fn names(file: &Path) -> Result<(), Error> {
    let text = read_source(file)?;
    for name in references::declared_names(&text) {
        println!("{name}");
    }
    return Ok(());
}

/// Print spans one per line, with 1-based positions for human readers.
fn print_text(files: &[FileSpans]) {
    for file in files {
        for record in &file.spans {
            let modifiers: Vec<&str> = record.span.modifiers.iter().map(|m| return m.as_str()).collect();
            println!(
                "{}:{}:{}-{}:{} {}[{}] {}",
                file.path.display(),
                record.start_position.line.saturating_add(1),
                record.start_position.column.saturating_add(1),
                record.end_position.line.saturating_add(1),
                record.end_position.column.saturating_add(1),
                record.span.token_type.as_str(),
                modifiers.join(","),
                record.name,
            );
        }
    }
    return;
}

/// Read a source file, mapping not-found to a diagnostic-friendly error.
///
/// # Errors
///
/// Returns `Error::FileNotFound` if the file is missing, `Error::Io` otherwise.
fn read_source(path: &Path) -> Result<String, Error> {
    return match std::fs::read_to_string(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(Error::FileNotFound { path: path.to_path_buf() })
        },
        Err(e) => Err(Error::Io(e)),
        Ok(text) => Ok(text),
    };
}
