use regex::Regex;

/// Ordered include/exclude rules applied to candidate directory paths.
///
/// Patterns are unanchored: a pattern selects a path when it matches any
/// fragment of it. Exclude rules always win over include rules.
///
/// # Examples
///
/// ```
/// use dockergen_core::PathFilter;
///
/// let filter = PathFilter::new(["cmd.*"], [r".*k8s\.io.*"]).unwrap();
/// assert!(filter.classify("cmd/controller"));
/// assert!(!filter.classify("vendor/k8s.io/code-generator/cmd/deepcopy-gen"));
/// assert!(!filter.classify("pkg/reconciler"));
/// ```
#[derive(Debug, Clone)]
pub struct PathFilter {
    includes: Vec<Regex>,
    excludes: Vec<Regex>,
}

impl PathFilter {
    /// Compile both rule lists.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPattern`](crate::Error::InvalidPattern) for the first
    /// pattern that fails to compile. No path is classified before every
    /// pattern has compiled.
    pub fn new<I, E>(includes: I, excludes: E) -> crate::Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Ok(Self {
            includes: compile(includes)?,
            excludes: compile(excludes)?,
        })
    }

    /// Whether `path` is selected.
    pub fn classify(&self, path: &str) -> bool {
        let included =
            self.includes.is_empty() || self.includes.iter().any(|r| r.is_match(path));
        included && !self.excludes.iter().any(|r| r.is_match(path))
    }
}

fn compile<P>(patterns: P) -> crate::Result<Vec<Regex>>
where
    P: IntoIterator,
    P::Item: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|p| {
            let p = p.as_ref();
            Regex::new(p).map_err(|e| crate::Error::InvalidPattern {
                pattern: p.to_owned(),
                source: e,
            })
        })
        .collect()
}
