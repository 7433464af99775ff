//! Names derived from an entry-point path.
//!
//! All functions here are pure string transforms over `/`-separated paths.

/// Binary name used when the path has no usable last segment.
pub const DEFAULT_BINARY_NAME: &str = "main";

/// Folder under which programs conventionally live.
const COMMANDS_ROOT: &str = "cmd/";

/// The naming set handed to descriptor templates.
///
/// # Examples
///
/// ```
/// use dockergen_core::EntryPointNames;
///
/// let names = EntryPointNames::derive("cmd/foo/bar");
/// assert_eq!(names.display, "Foo Bar");
/// assert_eq!(names.dashcase, "foo-bar");
/// assert_eq!(names.binary_filename, "bar");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPointNames {
    /// Human-readable name, e.g. `Foo Bar`
    pub display: String,
    /// Lower-case identifier, e.g. `foo-bar`
    pub dashcase: String,
    /// File name of the built binary, e.g. `bar`
    pub binary_filename: String,
}

impl EntryPointNames {
    pub fn derive(path: &str) -> Self {
        Self {
            display: display_name(path),
            dashcase: dashcase(path),
            binary_filename: binary_filename(path),
        }
    }

    /// Install path of the binary, from a format such as `/usr/bin/%s`.
    pub fn binary_install_path(&self, app_file_fmt: &str) -> crate::Result<String> {
        crate::format::fill(app_file_fmt, &[&self.binary_filename])
    }
}

/// Last path segment, or [`DEFAULT_BINARY_NAME`] when there is none.
pub fn binary_filename(path: &str) -> String {
    match last_segment(path) {
        "" | "." | "/" => DEFAULT_BINARY_NAME.to_owned(),
        base => base.to_owned(),
    }
}

/// Path below the commands root, or the full path if there is no such root.
pub fn sub_path(path: &str) -> &str {
    path.split_once(COMMANDS_ROOT).map_or(path, |(_, rest)| rest)
}

pub fn dashcase(path: &str) -> String {
    sub_path(path).replace(['/', '_'], "-").to_lowercase()
}

pub fn display_name(path: &str) -> String {
    let spaced = sub_path(path).replace(['/', '_', '-'], " ").to_lowercase();
    title_case(&spaced)
}

/// Capitalize the first letter of every word.
///
/// A word starts after any character that is not a letter, digit, or `_`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }
    out
}

fn last_segment(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.is_empty() { "" } else { "/" };
    }
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
