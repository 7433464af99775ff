//! Entry-point discovery.
//!
//! Walks a Go source tree and collects every directory that holds a `main`
//! package. Only the package clause of each file is read.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::PathFilter;
use crate::naming::EntryPointNames;

/// Package name that marks an executable Go program.
const MAIN_PACKAGE: &str = "main";
const GO_SOURCE_SUFFIX: &str = ".go";

/// A directory holding a program's `main` package.
///
/// The path is relative to the scan root, `/`-separated, and `.` for the
/// root itself. Ordering is lexicographic on the path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryPoint {
    path: String,
}

impl EntryPoint {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn names(&self) -> EntryPointNames {
        EntryPointNames::derive(&self.path)
    }

    /// Test images and tools build in the test context.
    pub fn context(&self) -> BuildContext {
        if self.path.contains("test") {
            BuildContext::Test
        } else {
            BuildContext::Production
        }
    }
}

impl std::fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}

/// Output routing class of an entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildContext {
    Production,
    Test,
}

impl BuildContext {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

/// Discover every entry point under `root` whose directory passes `filter`.
///
/// # Errors
///
/// Any walk, read, or parse failure aborts discovery; a partial set is
/// never returned.
pub fn discover(root: &Path, filter: &PathFilter) -> crate::Result<BTreeSet<EntryPoint>> {
    let mut entry_points = BTreeSet::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| crate::Error::Walk {
            root: root.to_path_buf(),
            source: e,
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        let is_go_source = entry
            .file_name()
            .to_str()
            .is_some_and(|n| n.ends_with(GO_SOURCE_SUFFIX));
        if !is_go_source {
            continue;
        }

        let dir = relative_dir(root, entry.path())?;
        if !filter.classify(&dir) {
            tracing::trace!(dir = %dir, "directory filtered out");
            continue;
        }

        let content =
            std::fs::read_to_string(entry.path()).map_err(|e| crate::Error::ReadSource {
                path: entry.path().to_path_buf(),
                source: e,
            })?;
        let package = package_name(&content).map_err(|reason| crate::Error::ParsePackage {
            path: entry.path().to_path_buf(),
            reason,
        })?;

        if package == MAIN_PACKAGE && entry_points.insert(EntryPoint::new(dir.clone())) {
            tracing::info!(dir = %dir, "main package found");
        }
    }

    Ok(entry_points)
}

/// Containing directory of `file`, relative to `root` and `/`-separated.
fn relative_dir(root: &Path, file: &Path) -> crate::Result<String> {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let dir = relative.parent().unwrap_or_else(|| Path::new(""));

    let mut segments = Vec::new();
    for component in dir.components() {
        match component {
            Component::Normal(s) => segments.push(
                s.to_str()
                    .ok_or_else(|| crate::Error::NonUtf8Path(PathBuf::from(file)))?,
            ),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            Component::ParentDir => segments.push(".."),
        }
    }

    if segments.is_empty() {
        Ok(".".to_owned())
    } else {
        Ok(segments.join("/"))
    }
}

/// Name declared by the package clause of a Go source file.
///
/// Skips leading whitespace and comments (build constraints, license
/// headers) and stops right after the package identifier.
pub(crate) fn package_name(source: &str) -> Result<&str, &'static str> {
    let rest = skip_trivia(source.strip_prefix('\u{feff}').unwrap_or(source))?;
    let rest = rest
        .strip_prefix("package")
        .ok_or("expected `package` clause")?;

    let after_keyword = skip_trivia(rest)?;
    if after_keyword.len() == rest.len() {
        return Err("expected whitespace after `package`");
    }

    let end = after_keyword
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(after_keyword.len());
    let name = &after_keyword[..end];

    match name.chars().next() {
        None => Err("missing package name"),
        Some(c) if c.is_numeric() => Err("package name starts with a digit"),
        Some(_) => Ok(name),
    }
}

fn skip_trivia(mut s: &str) -> Result<&str, &'static str> {
    loop {
        s = s.trim_start();
        if let Some(rest) = s.strip_prefix("//") {
            s = rest.split_once('\n').map_or("", |(_, tail)| tail);
        } else if let Some(rest) = s.strip_prefix("/*") {
            s = rest
                .split_once("*/")
                .map(|(_, tail)| tail)
                .ok_or("unterminated block comment")?;
        } else {
            return Ok(s);
        }
    }
}
