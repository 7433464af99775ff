//! Template storage.
//!
//! Renderers look templates up by key through [`TemplateSource`], so where the
//! text lives (compiled in, on disk, in a test fixture) never leaks into the
//! rendering or resolution logic.

use std::collections::HashMap;

use dockergen_core::TemplateName;

/// Project image template (`--template-name default`).
pub const DEFAULT: &str = "default";
/// Project image template for the func CLI utilities image.
pub const FUNC_UTIL: &str = "func-util";
/// Builder image used by CI to build and test the repository.
pub const BUILD_IMAGE: &str = "build-image";
/// Source image layered on top of the checked-out repository.
pub const SOURCE_IMAGE: &str = "source-image";
/// Must-gather image.
pub const MUST_GATHER: &str = "must-gather";
/// Package lock document for hermetic RPM installs.
pub const RPMS_LOCK: &str = "rpms-lock";

/// Key of the project image template selected in configuration.
pub fn project_template(name: TemplateName) -> &'static str {
    match name {
        TemplateName::Default => DEFAULT,
        TemplateName::FuncUtil => FUNC_UTIL,
    }
}

/// Lookup of template text by key.
pub trait TemplateSource {
    fn template(&self, name: &str) -> Option<&str>;
}

/// Templates compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl TemplateSource for EmbeddedTemplates {
    fn template(&self, name: &str) -> Option<&str> {
        let text = match name {
            DEFAULT => include_str!("../templates/default.Dockerfile.j2"),
            FUNC_UTIL => include_str!("../templates/func-util.Dockerfile.j2"),
            BUILD_IMAGE => include_str!("../templates/build-image.Dockerfile.j2"),
            SOURCE_IMAGE => include_str!("../templates/source-image.Dockerfile.j2"),
            MUST_GATHER => include_str!("../templates/must-gather.Dockerfile.j2"),
            RPMS_LOCK => include_str!("../templates/rpms.lock.yaml.j2"),
            _ => return None,
        };
        Some(text)
    }
}

/// In-memory templates, keyed by name.
impl TemplateSource for HashMap<String, String> {
    fn template(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<T: TemplateSource + ?Sized> TemplateSource for &T {
    fn template(&self, name: &str) -> Option<&str> {
        (**self).template(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_key_is_embedded() {
        for key in [DEFAULT, FUNC_UTIL, BUILD_IMAGE, SOURCE_IMAGE, MUST_GATHER, RPMS_LOCK] {
            let text = EmbeddedTemplates.template(key);
            assert!(text.is_some_and(|t| !t.is_empty()), "missing template {key}");
        }
    }

    #[test]
    fn unknown_key_is_absent() {
        assert!(EmbeddedTemplates.template("distroless").is_none());
    }

    #[test]
    fn project_template_keys() {
        assert_eq!(project_template(TemplateName::Default), DEFAULT);
        assert_eq!(project_template(TemplateName::FuncUtil), FUNC_UTIL);
    }
}
