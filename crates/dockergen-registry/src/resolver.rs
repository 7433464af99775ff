use std::path::Path;

use dockergen_core::{BuildContext, EntryPoint};

use crate::env::{EnvError, EnvLookup, override_var_name};

/// Directory prefix of vendored dependencies.
const VENDOR_PREFIX: &str = "vendor/";

/// The image an entry point resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    /// Key in the image mapping: module-qualified or vendor-stripped path
    pub identity: String,
    /// Image name, e.g. `knative-serving-controller`
    pub name: String,
    /// Final registry reference
    pub reference: String,
    /// Whether `reference` came from an override variable
    pub overridden: bool,
}

/// Computes registry image references for rendered descriptors.
pub struct ImageResolver<'a, L> {
    registry_image_fmt: &'a str,
    tag: &'a str,
    image_prefix: &'a str,
    module_path: &'a str,
    env: L,
}

impl<'a, L: EnvLookup> ImageResolver<'a, L> {
    pub fn new(
        registry_image_fmt: &'a str,
        tag: &'a str,
        image_prefix: &'a str,
        module_path: &'a str,
        env: L,
    ) -> Self {
        Self {
            registry_image_fmt,
            tag,
            image_prefix,
            module_path,
            env,
        }
    }

    /// Resolve the image of `entry_point`, whose descriptor was written to
    /// `descriptor_path`.
    ///
    /// An environment variable named after the image (see
    /// [`override_var_name`]) replaces the computed reference verbatim.
    pub fn resolve(
        &self,
        entry_point: &EntryPoint,
        descriptor_path: &Path,
    ) -> Result<ResolvedImage, ResolveError> {
        let name = image_name(self.image_prefix, entry_point.context(), descriptor_path)?;

        let var = override_var_name(&name);
        let (reference, overridden) = match self.env.var(&var)? {
            Some(value) => {
                tracing::info!(image = %name, variable = %var, reference = %value, "image overridden from environment");
                (value, true)
            }
            None => {
                let reference =
                    dockergen_core::format::fill(self.registry_image_fmt, &[&name, self.tag])?;
                (reference, false)
            }
        };

        Ok(ResolvedImage {
            identity: program_identity(self.module_path, entry_point.path()),
            name,
            reference,
            overridden,
        })
    }
}

/// Image name for a descriptor: prefix, `test` for test builds, then the
/// descriptor's directory name, joined by `-`.
///
/// Empty parts are skipped, so without a prefix `cmd/controller` is simply
/// `controller`.
pub fn image_name(
    image_prefix: &str,
    context: BuildContext,
    descriptor_path: &Path,
) -> Result<String, ResolveError> {
    let folder = descriptor_path
        .parent()
        .and_then(Path::file_name)
        .and_then(|n| n.to_str())
        .ok_or_else(|| ResolveError::DescriptorDir(descriptor_path.to_path_buf()))?;

    let test = match context {
        BuildContext::Test => "test",
        BuildContext::Production => "",
    };
    Ok([image_prefix, test, folder]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-"))
}

/// Key of an entry point in the image mapping.
///
/// Vendored programs are keyed by their own import path; local programs by
/// the module path joined with the entry-point path.
pub fn program_identity(module_path: &str, entry_point_path: &str) -> String {
    if let Some(vendored) = entry_point_path.strip_prefix(VENDOR_PREFIX) {
        return vendored.to_owned();
    }
    match (module_path, entry_point_path) {
        (module, ".") => module.to_owned(),
        ("", path) => path.to_owned(),
        (module, path) => format!("{}/{path}", module.trim_end_matches('/')),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("cannot derive an image name from descriptor path {0}")]
    DescriptorDir(std::path::PathBuf),

    #[error(transparent)]
    Format(#[from] dockergen_core::Error),

    #[error(transparent)]
    Env(#[from] EnvError),
}
