//! Template contexts for the descriptors dockergen writes.

use dockergen_core::naming::display_name;
use dockergen_core::{EntryPoint, ProjectMetadata};

use crate::context::TemplateContext;

/// Package that needs a reinstall rather than an install on UBI minimal.
const TZDATA: &str = "tzdata";

/// Base image holding the `oc` client binaries for an OCP release.
const OC_CLI_ARTIFACTS_FMT: &str = "registry.ci.openshift.org/ocp/%s:cli-artifacts";

/// Name used for the must-gather image and its descriptor directory.
pub const MUST_GATHER_NAME: &str = "must-gather";

/// Extra `RUN` instructions derived from the additional package list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageInstructions {
    pub instructions: Vec<String>,
    /// Whether the packages need an RPM lock file to install hermetically.
    pub requires_lock_file: bool,
}

impl PackageInstructions {
    /// `tzdata` is preinstalled in UBI minimal but stripped of its zone files,
    /// so it is reinstalled instead of installed, and pins the lock file.
    pub fn from_packages(packages: &[String]) -> Self {
        let mut out = Self::default();

        let mut remaining: Vec<&str> = packages.iter().map(String::as_str).collect();
        if let Some(idx) = remaining.iter().position(|p| p.trim() == TZDATA) {
            remaining.remove(idx);
            out.requires_lock_file = true;
            out.instructions
                .push("RUN microdnf update tzdata -y && microdnf reinstall tzdata -y".to_owned());
        }
        if !remaining.is_empty() {
            out.instructions
                .push(format!("RUN microdnf install {}", remaining.join(" ")));
        }
        out
    }
}

/// Context for the builder and source image descriptors.
pub fn builder_context(builder_image: &str) -> TemplateContext {
    TemplateContext::new().with("builder", builder_image)
}

/// Builds the per-entry-point context of a project image descriptor.
pub struct ProjectDescriptor<'a> {
    builder_image: &'a str,
    app_file_fmt: &'a str,
    metadata: &'a ProjectMetadata,
    additional_instructions: &'a [String],
}

impl<'a> ProjectDescriptor<'a> {
    pub fn new(
        builder_image: &'a str,
        app_file_fmt: &'a str,
        metadata: &'a ProjectMetadata,
        additional_instructions: &'a [String],
    ) -> Self {
        Self {
            builder_image,
            app_file_fmt,
            metadata,
            additional_instructions,
        }
    }

    pub fn context(&self, entry_point: &EntryPoint) -> dockergen_core::Result<TemplateContext> {
        let names = entry_point.names();
        let app_file = names.binary_install_path(self.app_file_fmt)?;

        let project_name = self.metadata.project_name();
        let (project, project_dashcase) = if project_name.is_empty() {
            (String::new(), String::new())
        } else {
            (
                format!("{} ", display_name(project_name)),
                format!("{project_name}-"),
            )
        };

        Ok(TemplateContext::new()
            .with("main", entry_point.path())
            .with("app_file", app_file)
            .with("builder", self.builder_image)
            .with("version", self.metadata.project.tag.as_str())
            .with("project", project)
            .with("project_dashcase", project_dashcase)
            .with("component", names.display)
            .with("component_dashcase", names.dashcase)
            .with(
                "additional_instructions",
                self.additional_instructions.to_vec(),
            ))
    }
}

/// Context for the must-gather descriptor.
///
/// # Errors
///
/// Fails when the minimum OCP version or the product version cannot be
/// parsed, since the `oc` binary name depends on both.
pub fn must_gather_context(metadata: &ProjectMetadata) -> dockergen_core::Result<TemplateContext> {
    let ocp_min = metadata.requirements.ocp_version.min.as_str();
    let oc_cli_artifacts = dockergen_core::format::fill(OC_CLI_ARTIFACTS_FMT, &[ocp_min])?;
    let oc_binary_name =
        dockergen_core::version::oc_binary_name(ocp_min, &metadata.project.version)?;

    Ok(TemplateContext::new()
        .with("main", MUST_GATHER_NAME)
        .with("oc_cli_artifacts", oc_cli_artifacts)
        .with("oc_binary_name", oc_binary_name)
        .with("version", metadata.project.version.as_str())
        .with("project", display_name(MUST_GATHER_NAME))
        .with("project_dashcase", format!("{MUST_GATHER_NAME}-")))
}
