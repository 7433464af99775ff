//! Minimal `go.mod` reader.
//!
//! Only the `module` and `go` directives are needed: the module path
//! qualifies program identities and the toolchain version selects the
//! builder image. Everything else in the file is ignored.

use std::path::Path;

pub const GO_MOD_FILE_NAME: &str = "go.mod";

/// Module path and toolchain pin declared in `go.mod`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoModule {
    /// Declared module path, e.g. `knative.dev/serving`
    pub path: String,
    /// Value of the `go` directive, e.g. `1.22.3`
    pub go_version: String,
}

impl GoModule {
    /// Read `go.mod` from `root_dir`.
    ///
    /// # Errors
    ///
    /// - [`Error::GoModRead`](crate::Error::GoModRead) if the file cannot be read
    /// - [`Error::GoModMissingDirective`](crate::Error::GoModMissingDirective) if
    ///   either directive is absent
    pub fn read(root_dir: &Path) -> crate::Result<Self> {
        let path = root_dir.join(GO_MOD_FILE_NAME);
        let content = std::fs::read_to_string(&path).map_err(|e| crate::Error::GoModRead {
            path: path.clone(),
            source: e,
        })?;
        Self::parse(&path, &content)
    }

    pub fn parse(path: &Path, content: &str) -> crate::Result<Self> {
        let mut module = None;
        let mut go_version = None;

        for line in content.lines() {
            let line = strip_comment(line).trim();
            if let Some(rest) = directive(line, "module") {
                module = Some(unquote(rest).to_owned());
            } else if let Some(rest) = directive(line, "go") {
                go_version = Some(rest.to_owned());
            }
        }

        let path_str = module.ok_or_else(|| crate::Error::GoModMissingDirective {
            path: path.to_path_buf(),
            directive: "module",
        })?;
        let go_version = go_version.ok_or_else(|| crate::Error::GoModMissingDirective {
            path: path.to_path_buf(),
            directive: "go",
        })?;

        tracing::debug!(module = %path_str, go = %go_version, "go module read");
        Ok(Self {
            path: path_str,
            go_version,
        })
    }
}

fn strip_comment(line: &str) -> &str {
    line.split_once("//").map_or(line, |(code, _)| code)
}

/// Argument of `keyword` when `line` is that directive.
fn directive<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim();
    (!rest.is_empty()).then_some(rest)
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| s.strip_prefix('`').and_then(|s| s.strip_suffix('`')))
        .unwrap_or(s)
}
