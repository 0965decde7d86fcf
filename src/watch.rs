//! File watcher: classifies on startup, then re-classifies on source changes.

use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use lolspan::config::Config;
use lolspan::error::Error;
use notify::{RecursiveMode, Watcher as _};

use crate::commands::{self, OutputFormat};
use crate::diagnostics;

/// Debounce delay between filesystem events and re-classification.
const DEBOUNCE_MS: u64 = 100;

/// Directories to watch: directory arguments recursively, file arguments via their parent.
fn collect_watch_targets(paths: &[PathBuf]) -> HashSet<(PathBuf, bool)> {
    let mut targets = HashSet::new();
    for path in paths {
        if path.is_dir() {
            targets.insert((path.clone(), true));
        } else if let Some(parent) = path.parent() {
            let parent = if parent.as_os_str().is_empty() { PathBuf::from(".") } else { parent.to_path_buf() };
            targets.insert((parent, false));
        }
    }
    return targets;
}

/// Create a filesystem watcher that sends events on the given channel.
///
/// # Errors
///
/// Returns `Error::WatchFailed` if the watcher cannot be created.
fn create_watcher(
    tx: crossbeam_channel::Sender<()>,
) -> Result<notify::RecommendedWatcher, Error> {
    return notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res
            && matches!(
                event.kind,
                notify::EventKind::Create(_)
                    | notify::EventKind::Modify(_)
                    | notify::EventKind::Remove(_)
            )
        {
            let _ = tx.send(());
        }
    })
    .map_err(|e| {
        return Error::WatchFailed { reason: e.to_string() };
    });
}

/// Entry point for the watch command.
///
/// Classifies once, then watches the given paths and re-classifies the whole
/// set on every debounced change.
///
/// # Errors
///
/// Returns errors from watcher setup.
pub fn run(paths: &[PathBuf], format: OutputFormat, config: &Config) -> Result<ExitCode, Error> {
    eprintln!("watch: initial classification");
    let mut last_code = run_classify(paths, format, config);

    let targets = collect_watch_targets(paths);
    let (tx, rx) = crossbeam_channel::unbounded();
    let mut watcher = create_watcher(tx)?;

    for (dir, recursive) in &targets {
        let mode = if *recursive { RecursiveMode::Recursive } else { RecursiveMode::NonRecursive };
        if let Err(e) = watcher.watch(dir, mode) {
            tracing::warn!(dir = %dir.display(), error = %e, "could not watch directory");
        }
    }

    let dir_count = targets.len();
    eprintln!("watch: monitoring {dir_count} directories, press Ctrl+C to stop");

    while rx.recv().is_ok() {
        let debounce = Duration::from_millis(DEBOUNCE_MS);
        while rx.recv_timeout(debounce).is_ok() {}
        eprintln!("watch: change detected, re-classifying...");
        last_code = run_classify(paths, format, config);
    }

    return Ok(last_code);
}

/// Run classify once and print the result. Errors are reported, not fatal.
fn run_classify(paths: &[PathBuf], format: OutputFormat, config: &Config) -> ExitCode {
    return match commands::classify(paths, format, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        },
    };
}
