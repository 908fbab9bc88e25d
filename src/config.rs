//! # Configuration
//!
//! The console is described by a JSON file naming the splash assets and up
//! to four folder entries:
//!
//! ```json
//! {
//!   "splash": {
//!     "filename": "splash.txt",
//!     "tagline": "BUILDING BETTER WORLDS",
//!     "copyright": "(c) 2137 Weyland-Yutani Corp.",
//!     "progress_seconds": 5.0
//!   },
//!   "entries": [
//!     { "folder": "LOGS", "title": "Station logs", "content_file": "logs.txt" }
//!   ]
//! }
//! ```
//!
//! ## File Location
//!
//! An explicit path from the command line wins. Otherwise the first of these
//! that exists is used:
//!
//! ```text
//! ~/.config/alien-console/config.json
//! /etc/alien-console/config.json
//! ```
//!
//! Relative file names inside the config resolve against the directory the
//! config file lives in. Every referenced file is read fully into memory up
//! front; nothing is read after the terminal switches to raw mode.

use crate::error::{Error, ErrorKind, Result, ResultExt};
use crate::ui::splash::{SplashParams, DEFAULT_BUDGET, SPLASH_CAPACITY};
use crate::ui::state::{FolderEntry, MAX_ENTRIES};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Largest content file accepted, in bytes.
pub const CONTENT_CAPACITY: usize = 64 * 1024;

const CONFIG_FILE_NAME: &str = "config.json";
const SYSTEM_CONFIG_DIR: &str = "/etc/alien-console";

/// Parsed configuration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub splash: SplashConfig,
    pub entries: Vec<EntryConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplashConfig {
    /// ASCII art file.
    pub filename: PathBuf,
    pub tagline: String,
    pub copyright: String,
    /// Duration of the whole progress sweep.
    #[serde(default = "default_progress_seconds")]
    pub progress_seconds: f64,
}

fn default_progress_seconds() -> f64 {
    DEFAULT_BUDGET.as_secs_f64()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntryConfig {
    pub folder: String,
    pub title: String,
    pub content_file: PathBuf,
}

/// Everything the screens need, loaded into memory.
#[derive(Debug, Clone)]
pub struct Params {
    pub splash: SplashParams,
    pub entries: Vec<FolderEntry>,
}

impl Config {
    /// Parse the configuration file at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| {
            Error::new(ErrorKind::ConfigRead {
                path: path.to_path_buf(),
                source,
            })
        })?;
        serde_json::from_str(&contents).map_err(|source| {
            Error::new(ErrorKind::ConfigParse {
                path: path.to_path_buf(),
                source,
            })
        })
    }

    /// Check everything that can be checked without touching other files.
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(Error::config_invalid(
                "at least one folder entry is required",
            ));
        }
        if self.entries.len() > MAX_ENTRIES {
            return Err(Error::new(ErrorKind::TooManyEntries {
                count: self.entries.len(),
                max: MAX_ENTRIES,
            }));
        }
        for (i, entry) in self.entries.iter().enumerate() {
            check_label(&entry.folder, &format!("entries[{i}].folder"))?;
            check_label(&entry.title, &format!("entries[{i}].title"))?;
        }
        if !self.splash.progress_seconds.is_finite() || self.splash.progress_seconds < 0.0 {
            return Err(Error::config_invalid(format!(
                "splash.progress_seconds must be a non-negative number, got {}",
                self.splash.progress_seconds
            )));
        }
        Ok(())
    }

    /// Validate, then read the splash art and every content file.
    ///
    /// Relative file names resolve against `base_dir`.
    pub fn into_params(self, base_dir: &Path) -> Result<Params> {
        self.validate()?;

        let budget = Duration::try_from_secs_f64(self.splash.progress_seconds).map_err(|err| {
            Error::config_invalid(format!("splash.progress_seconds is out of range: {err}"))
        })?;
        let art_path = base_dir.join(&self.splash.filename);
        let art = read_bounded(&art_path, SPLASH_CAPACITY - 1).mark("reading splash art")?;

        let mut entries = Vec::with_capacity(self.entries.len());
        for entry in self.entries {
            let path = base_dir.join(&entry.content_file);
            let text = read_bounded(&path, CONTENT_CAPACITY)
                .mark(format!("reading content of folder {:?}", entry.folder))?;
            entries.push(FolderEntry::new(entry.folder, entry.title, text));
        }

        tracing::info!(
            art = %art_path.display(),
            entries = entries.len(),
            "configuration loaded"
        );
        Ok(Params {
            splash: SplashParams {
                art,
                tagline: self.splash.tagline,
                copyright: self.splash.copyright,
                budget,
            },
            entries,
        })
    }
}

fn check_label(value: &str, field: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::config_invalid(format!("{field} must not be empty")));
    }
    if value.chars().any(char::is_control) {
        return Err(Error::config_invalid(format!(
            "{field} must not contain control characters"
        )));
    }
    Ok(())
}

/// Read a UTF-8 file of at most `max_bytes` bytes.
///
/// Size is checked on the raw bytes before decoding, so a cut through a
/// multi-byte character still reports the file as too large.
fn read_bounded(path: &Path, max_bytes: usize) -> Result<String> {
    let read_error = |source| {
        Error::new(ErrorKind::ConfigRead {
            path: path.to_path_buf(),
            source,
        })
    };
    let file = File::open(path).map_err(read_error)?;

    // One byte past the limit is enough to tell an oversized file apart.
    let mut bytes = Vec::new();
    file.take(max_bytes as u64 + 1)
        .read_to_end(&mut bytes)
        .map_err(read_error)?;
    if bytes.len() > max_bytes {
        return Err(Error::new(ErrorKind::ContentTooLarge {
            path: path.to_path_buf(),
            limit: max_bytes,
        }));
    }
    String::from_utf8(bytes)
        .map_err(|err| read_error(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))
}

/// The per-user config file path, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "alien-console")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Default locations, most specific first.
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    paths.extend(user_config_path());
    paths.push(Path::new(SYSTEM_CONFIG_DIR).join(CONFIG_FILE_NAME));
    paths
}

/// Pick the config file: `explicit` if given, else the first default
/// location that exists.
pub fn resolve(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let searched = search_paths();
    match searched.iter().find(|path| path.is_file()) {
        Some(path) => Ok(path.clone()),
        None => Err(Error::new(ErrorKind::ConfigNotFound { searched })),
    }
}

/// Resolve, parse and load the configuration in one step.
pub fn load(explicit: Option<PathBuf>) -> Result<Params> {
    let path = resolve(explicit).mark("locating configuration")?;
    tracing::debug!(path = %path.display(), "using configuration file");
    let config = Config::load_from(&path).mark("parsing configuration")?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    config
        .into_params(base_dir)
        .mark(format!("loading {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const VALID: &str = r#"{
        "splash": {
            "filename": "splash.txt",
            "tagline": "BUILDING BETTER WORLDS",
            "copyright": "(c) 2137"
        },
        "entries": [
            { "folder": "LOGS", "title": "Station logs", "content_file": "logs.txt" },
            { "folder": "MAIL", "title": "Inbox", "content_file": "mail/inbox.txt" }
        ]
    }"#;

    fn fixture(config: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("splash.txt"), "/\\\n\\/\n").expect("write art");
        fs::write(dir.path().join("logs.txt"), "all quiet").expect("write logs");
        fs::create_dir(dir.path().join("mail")).expect("mkdir");
        fs::write(dir.path().join("mail/inbox.txt"), "").expect("write inbox");
        let path = dir.path().join("config.json");
        fs::write(&path, config).expect("write config");
        (dir, path)
    }

    fn entry_json(n: usize) -> String {
        let entries: Vec<String> = (0..n)
            .map(|i| {
                format!(r#"{{ "folder": "F{i}", "title": "T{i}", "content_file": "logs.txt" }}"#)
            })
            .collect();
        format!(
            r#"{{ "splash": {{ "filename": "splash.txt", "tagline": "t", "copyright": "c" }},
                 "entries": [{}] }}"#,
            entries.join(",")
        )
    }

    #[test]
    fn test_load_valid_config() {
        let (_dir, path) = fixture(VALID);
        let params = load(Some(path)).expect("valid config");
        assert_eq!(params.splash.art, "/\\\n\\/\n");
        assert_eq!(params.splash.tagline, "BUILDING BETTER WORLDS");
        assert_eq!(params.splash.budget, Duration::from_secs(5));
        assert_eq!(params.entries.len(), 2);
        assert_eq!(params.entries[0].folder, "LOGS");
        assert_eq!(params.entries[0].text(), "all quiet");
        assert_eq!(params.entries[1].text(), "");
    }

    #[test]
    fn test_progress_seconds_is_read() {
        let config = VALID.replace(
            r#""copyright": "(c) 2137""#,
            r#""copyright": "(c) 2137", "progress_seconds": 0.5"#,
        );
        let (_dir, path) = fixture(&config);
        let params = load(Some(path)).expect("valid config");
        assert_eq!(params.splash.budget, Duration::from_millis(500));
    }

    #[test]
    fn test_negative_progress_seconds_rejected() {
        let config = VALID.replace(
            r#""copyright": "(c) 2137""#,
            r#""copyright": "(c) 2137", "progress_seconds": -1.0"#,
        );
        let (_dir, path) = fixture(&config);
        let err = load(Some(path)).expect_err("negative budget");
        assert!(matches!(err.kind(), ErrorKind::ConfigInvalid { .. }));
    }

    #[test]
    fn test_missing_explicit_file_is_read_error() {
        let dir = TempDir::new().expect("tempdir");
        let err = load(Some(dir.path().join("nope.json"))).expect_err("missing");
        assert!(matches!(err.kind(), ErrorKind::ConfigRead { .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let (_dir, path) = fixture("{ not json");
        let err = load(Some(path)).expect_err("malformed");
        assert!(matches!(err.kind(), ErrorKind::ConfigParse { .. }));
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        let config = VALID.replace(r#""entries""#, r#""theme": "green", "entries""#);
        let (_dir, path) = fixture(&config);
        let err = load(Some(path)).expect_err("unknown field");
        assert!(matches!(err.kind(), ErrorKind::ConfigParse { .. }));
    }

    #[test]
    fn test_entry_count_limits() {
        let (_dir, path) = fixture(&entry_json(4));
        assert_eq!(load(Some(path)).expect("four entries").entries.len(), 4);

        let (_dir, path) = fixture(&entry_json(5));
        let err = load(Some(path)).expect_err("five entries");
        assert!(matches!(
            err.kind(),
            ErrorKind::TooManyEntries { count: 5, max: 4 }
        ));

        let (_dir, path) = fixture(&entry_json(0));
        let err = load(Some(path)).expect_err("no entries");
        assert!(matches!(err.kind(), ErrorKind::ConfigInvalid { .. }));
    }

    #[test]
    fn test_labels_must_be_printable() {
        let config = VALID.replace(r#""folder": "LOGS""#, r#""folder": """#);
        let (_dir, path) = fixture(&config);
        let err = load(Some(path)).expect_err("empty label");
        assert!(err.to_string().contains("entries[0].folder"));

        let config = VALID.replace(r#""title": "Inbox""#, r#""title": "In\tbox""#);
        let (_dir, path) = fixture(&config);
        let err = load(Some(path)).expect_err("control character");
        assert!(err.to_string().contains("entries[1].title"));
    }

    #[test]
    fn test_missing_content_file_names_folder() {
        let config = VALID.replace("logs.txt", "missing.txt");
        let (_dir, path) = fixture(&config);
        let err = load(Some(path)).expect_err("missing content");
        assert!(matches!(err.kind(), ErrorKind::ConfigRead { .. }));
        assert!(err.report().to_string().contains("reading content of folder \"LOGS\""));
    }

    #[test]
    fn test_art_must_be_below_capacity() {
        let (dir, path) = fixture(VALID);
        fs::write(dir.path().join("splash.txt"), "#".repeat(SPLASH_CAPACITY - 1))
            .expect("write art");
        assert!(load(Some(path.clone())).is_ok());

        fs::write(dir.path().join("splash.txt"), "#".repeat(SPLASH_CAPACITY)).expect("write art");
        let err = load(Some(path)).expect_err("art too large");
        assert!(matches!(err.kind(), ErrorKind::ContentTooLarge { .. }));
    }

    #[test]
    fn test_content_capacity() {
        let (dir, path) = fixture(VALID);
        fs::write(dir.path().join("logs.txt"), "x".repeat(CONTENT_CAPACITY)).expect("write");
        assert!(load(Some(path.clone())).is_ok());

        fs::write(dir.path().join("logs.txt"), "x".repeat(CONTENT_CAPACITY + 1)).expect("write");
        let err = load(Some(path)).expect_err("content too large");
        assert!(matches!(
            err.kind(),
            ErrorKind::ContentTooLarge {
                limit: CONTENT_CAPACITY,
                ..
            }
        ));
    }

    #[test]
    fn test_oversized_multibyte_content_is_too_large() {
        let (dir, path) = fixture(VALID);
        // 2-byte characters put the size cut inside a character
        fs::write(dir.path().join("logs.txt"), "é".repeat(CONTENT_CAPACITY)).expect("write");
        let err = load(Some(path)).expect_err("content too large");
        assert!(matches!(
            err.kind(),
            ErrorKind::ContentTooLarge {
                limit: CONTENT_CAPACITY,
                ..
            }
        ));
    }

    #[test]
    fn test_oversized_multibyte_art_is_too_large() {
        let (dir, path) = fixture(VALID);
        fs::write(dir.path().join("splash.txt"), "é".repeat(SPLASH_CAPACITY)).expect("write");
        let err = load(Some(path)).expect_err("art too large");
        assert!(matches!(err.kind(), ErrorKind::ContentTooLarge { .. }));
    }

    #[test]
    fn test_invalid_utf8_content_is_read_error() {
        let (dir, path) = fixture(VALID);
        fs::write(dir.path().join("logs.txt"), [b'o', b'k', 0xff, 0xfe]).expect("write");
        let err = load(Some(path)).expect_err("not utf-8");
        let ErrorKind::ConfigRead { source, .. } = err.kind() else {
            panic!("expected a read error, got {:?}", err.kind());
        };
        assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_absolute_content_path() {
        let other = TempDir::new().expect("tempdir");
        let absolute = other.path().join("elsewhere.txt");
        fs::write(&absolute, "far away").expect("write");
        let config = VALID.replace("logs.txt", &absolute.display().to_string());
        let (_dir, path) = fixture(&config);
        let params = load(Some(path)).expect("absolute path");
        assert_eq!(params.entries[0].text(), "far away");
    }

    #[test]
    fn test_resolve_prefers_explicit_path() {
        let explicit = PathBuf::from("/some/where/config.json");
        assert_eq!(resolve(Some(explicit.clone())).expect("explicit"), explicit);
    }

    #[test]
    fn test_search_paths_end_with_system_config() {
        let paths = search_paths();
        assert_eq!(
            paths.last(),
            Some(&PathBuf::from("/etc/alien-console/config.json"))
        );
    }
}
