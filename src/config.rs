use std::path::Path;

use crate::classifier::Options;
use crate::document::LineOffsets;
use crate::error::Error;
use crate::exclusions::StringExclusion;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE: &str = ".lolspan.toml";

/// Project configuration loaded from `.lolspan.toml`.
/// Include/exclude patterns are path prefixes applied to discovered source files.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path prefixes that must not be classified.
    exclude: Vec<String>,
    /// Source extensions, without the leading dot.
    extensions: Vec<String>,
    /// Path prefixes to classify; empty means everything.
    include: Vec<String>,
    /// Scan options handed to the classifier.
    options: Options,
}

/// Raw TOML structure for `.lolspan.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct LolspanTomlConfig {
    #[serde(default)]
    exclude: Vec<String>,
    #[serde(default = "default_extensions")]
    extensions: Vec<String>,
    #[serde(default)]
    include: Vec<String>,
    #[serde(default)]
    line_offsets: LineOffsets,
    #[serde(default)]
    string_exclusion: StringExclusion,
}

/// `lol` and `lols`.
fn default_extensions() -> Vec<String> {
    return vec!["lol".to_string(), "lols".to_string()];
}

impl Default for Config {
    fn default() -> Self {
        return Self::classify_everything_by_default();
    }
}

impl Config {
    /// Load config from `.lolspan.toml` in the given root directory.
    /// Returns a default that classifies everything if the file doesn't exist.
    /// Returns an error if the file exists but is malformed; a config file the
    /// user wrote is never silently replaced by defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::classify_everything_by_default());
            },
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };
        return Self::parse(&content);
    }

    /// Load config from an explicit path. Unlike [`Config::load`], a missing file is an error.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigNotFound` if the file doesn't exist,
    /// `Error::Io` for other read failures, or `Error::TomlDe` if the TOML is malformed.
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let content = match std::fs::read_to_string(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ConfigNotFound { path: path.to_path_buf() });
            },
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };
        return Self::parse(&content);
    }

    /// Parse config from TOML content.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the content is not valid config TOML.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: LolspanTomlConfig = toml::from_str(content)?;
        return Ok(Self {
            exclude: raw.exclude,
            extensions: raw.extensions,
            include: raw.include,
            options: Options {
                line_offsets: raw.line_offsets,
                string_exclusion: raw.string_exclusion,
            },
        });
    }

    /// Default config that includes everything and excludes nothing.
    fn classify_everything_by_default() -> Self {
        return Self {
            exclude: Vec::new(),
            extensions: default_extensions(),
            include: Vec::new(),
            options: Options::default(),
        };
    }

    /// Check whether a file's extension marks it as LOLCODE source.
    pub fn is_source_file(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| return e.to_str()) else {
            return false;
        };
        return self.extensions.iter().any(|e| return e.eq_ignore_ascii_case(ext));
    }

    /// Scan options for the classifier.
    pub const fn options(&self) -> Options {
        return self.options;
    }

    /// Check whether a discovered source path should be classified.
    ///
    /// A path is included if no include patterns are set (classify everything),
    /// or if the path starts with at least one include pattern.
    /// An included path is then excluded if it starts with any exclude pattern.
    pub fn should_classify(&self, relative_path: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|p| return relative_path.starts_with(p.as_str()));

        if !included {
            return false;
        }

        return !self.exclude.iter().any(|p| return relative_path.starts_with(p.as_str()));
    }
}
