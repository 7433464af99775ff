use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("root directory cannot be empty")]
    EmptyRootDir,

    #[error("invalid filter pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("unknown template name {0:?}; supported values are [default, func-util]")]
    UnknownTemplate(String),

    #[error("format {format:?} has {found} `%s` placeholder(s), expected {expected}")]
    FormatArity {
        format: String,
        expected: usize,
        found: usize,
    },

    // ── Project inputs ──
    #[error("failed to read project metadata file {path}")]
    MetadataRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse project metadata file {path}")]
    MetadataParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("failed to read go mod file {path}")]
    GoModRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("go mod file {path} has no `{directive}` directive")]
    GoModMissingDirective {
        path: PathBuf,
        directive: &'static str,
    },

    // ── Discovery ──
    #[error("failed to walk source tree at {root}")]
    Walk {
        root: PathBuf,
        source: walkdir::Error,
    },

    #[error("path {0} is not valid UTF-8")]
    NonUtf8Path(PathBuf),

    #[error("failed to read source file {path}")]
    ReadSource {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse package clause of {path}: {reason}")]
    ParsePackage { path: PathBuf, reason: &'static str },

    // ── Version rules ──
    #[error("invalid version {version:?}: {reason}")]
    InvalidVersion {
        version: String,
        reason: &'static str,
    },

    #[error("no RHEL release is known for product version {version}")]
    UnknownRhelMapping { version: String },
}
