use std::path::{Path, PathBuf};

use lolspan::config::Config;
use lolspan::error::Error;
use walkdir::WalkDir;

/// Expand command-line paths into the LOLCODE files to classify.
/// Files named explicitly must carry a source extension; directories are
/// walked and filtered by extension and the config's include/exclude prefixes.
/// Returns sorted, deduplicated paths.
///
/// # Errors
///
/// Returns `Error::FileNotFound` for a path that doesn't exist, or
/// `Error::UnsupportedFile` for an explicit file without a source extension.
pub fn collect_sources(paths: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>, Error> {
    let mut sources = Vec::new();

    for path in paths {
        if path.is_dir() {
            collect_from_directory(path, config, &mut sources);
        } else if path.is_file() {
            if !config.is_source_file(path) {
                let ext = path.extension().map(|e| return e.to_string_lossy().to_string()).unwrap_or_default();
                return Err(Error::UnsupportedFile { ext, path: path.clone() });
            }
            sources.push(path.clone());
        } else {
            return Err(Error::FileNotFound { path: path.clone() });
        }
    }

    sources.sort();
    sources.dedup();
    return Ok(sources);
}

/// Walk `root` and push every source file the config lets through.
fn collect_from_directory(root: &Path, config: &Config, sources: &mut Vec<PathBuf>) {
    for entry in WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| return e.file_type().is_file() && config.is_source_file(e.path()))
    {
        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        if !config.should_classify(&relative.to_string_lossy()) {
            tracing::debug!(path = %path.display(), "skipped by include/exclude");
            continue;
        }
        sources.push(path.to_path_buf());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "HAI 1.2\nKTHXBYE\n").unwrap();
    }

    #[test]
    fn walks_directories_for_source_extensions() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.lol");
        touch(dir.path(), "nested/b.lols");
        touch(dir.path(), "notes.md");

        let found = collect_sources(&[dir.path().to_path_buf()], &Config::default()).unwrap();
        let names: Vec<_> = found.iter().map(|p| return p.strip_prefix(dir.path()).unwrap().to_path_buf()).collect();
        assert_eq!(names, [PathBuf::from("a.lol"), PathBuf::from("nested/b.lols")]);
    }

    #[test]
    fn config_prefixes_filter_walked_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "src/a.lol");
        touch(dir.path(), "src/vendor/b.lol");
        touch(dir.path(), "scratch/c.lol");

        let config = Config::parse("include = [\"src\"]\nexclude = [\"src/vendor\"]").unwrap();
        let found = collect_sources(&[dir.path().to_path_buf()], &config).unwrap();
        assert_eq!(found, [dir.path().join("src/a.lol")]);
    }

    #[test]
    fn explicit_file_with_wrong_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "notes.md");
        let result = collect_sources(&[dir.path().join("notes.md")], &Config::default());
        assert!(matches!(result, Err(Error::UnsupportedFile { ext, .. }) if ext == "md"));
    }

    #[test]
    fn missing_path_is_file_not_found() {
        let result = collect_sources(&[PathBuf::from("does/not/exist.lol")], &Config::default());
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }
}
