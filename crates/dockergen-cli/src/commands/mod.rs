mod discover;
mod dockerfile;
mod must_gather;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use dockergen_core::{GeneratorConfig, PathFilter, TemplateName, format};

pub use discover::discover;
pub use dockerfile::dockerfile;
pub use must_gather::must_gather;

/// Flags shared by every generator. Each flag, when given, overrides the
/// value from `dockergen.toml` in the root directory.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Root of the Go repository
    #[arg(long, default_value = ".")]
    root_dir: PathBuf,

    /// Directory regexes to scan; none given scans everything
    #[arg(long, num_args = 0..)]
    includes: Option<Vec<String>>,

    /// Directory regexes to skip, even when included
    #[arg(long, num_args = 0..)]
    excludes: Option<Vec<String>>,

    /// Output root, relative to the root directory
    #[arg(long)]
    output: Option<PathBuf>,

    /// Project image Dockerfiles, relative to the output root
    #[arg(long)]
    dockerfile_dir: Option<PathBuf>,

    /// Test image Dockerfiles, relative to the output root
    #[arg(long)]
    dockerfile_test_dir: Option<PathBuf>,

    /// Builder image Dockerfile, relative to the output root
    #[arg(long)]
    dockerfile_build_dir: Option<PathBuf>,

    /// Source image Dockerfile, relative to the output root
    #[arg(long)]
    dockerfile_source_dir: Option<PathBuf>,

    /// Project metadata file, relative to the root directory
    #[arg(long)]
    project_file: Option<PathBuf>,

    /// Builder image format; `%s` receives the Go version
    #[arg(long)]
    dockerfile_image_builder_fmt: Option<String>,

    /// Binary install path format; `%s` receives the binary name
    #[arg(long)]
    app_file_fmt: Option<String>,

    /// Image reference format; `%s` receive image name and tag
    #[arg(long)]
    registry_image_fmt: Option<String>,

    /// Repositories whose image mappings are merged in
    #[arg(long, num_args = 0..)]
    images_from: Option<Vec<String>>,

    /// Image mapping URL format; `%s` receive repository and branch
    #[arg(long)]
    images_from_url_format: Option<String>,

    /// System packages installed in every project image
    #[arg(long, num_args = 0..)]
    additional_packages: Option<Vec<String>>,

    /// Project image template (default, func-util)
    #[arg(long)]
    template_name: Option<TemplateName>,

    /// Write rpms.lock.yaml to the root directory
    #[arg(long)]
    generate_rpms_lock_file: bool,
}

/// A validated run: canonical root, merged configuration and compiled filter.
pub(crate) struct Run {
    pub root: PathBuf,
    pub config: GeneratorConfig,
    pub filter: PathFilter,
}

impl Run {
    /// Output root of the run.
    pub fn output(&self) -> PathBuf {
        self.config.output.root(&self.root)
    }

    /// Resolve `dir` under the output root.
    pub fn output_dir(&self, dir: &Path) -> PathBuf {
        self.output().join(dir)
    }
}

impl GenerateArgs {
    /// Validate the root, load and override the configuration, compile the
    /// filters and check every format's placeholders. Nothing is written
    /// before this succeeds.
    pub(crate) fn into_run(self) -> anyhow::Result<Run> {
        if self.root_dir.as_os_str().is_empty() {
            return Err(dockergen_core::Error::EmptyRootDir.into());
        }
        let root = std::fs::canonicalize(&self.root_dir)
            .with_context(|| format!("root directory {} not found", self.root_dir.display()))?;

        let mut config = GeneratorConfig::load(&root)?;
        self.apply(&mut config);

        let filter = PathFilter::new(&config.filters.includes, &config.filters.excludes)?;
        format::check_arity(&config.images.app_file_fmt, 1)?;
        format::check_arity(&config.images.registry_image_fmt, 2)?;
        format::check_arity(&config.images.images_from_url_fmt, 2)?;
        tracing::debug!(root = %root.display(), "configuration loaded");

        Ok(Run {
            root,
            config,
            filter,
        })
    }

    fn apply(self, config: &mut GeneratorConfig) {
        if let Some(includes) = self.includes {
            config.filters.includes = includes;
        }
        if let Some(excludes) = self.excludes {
            config.filters.excludes = excludes;
        }

        let output = &mut config.output;
        if let Some(dir) = self.output {
            output.dir = dir;
        }
        if let Some(dir) = self.dockerfile_dir {
            output.dockerfile_dir = dir;
        }
        if let Some(dir) = self.dockerfile_test_dir {
            output.dockerfile_test_dir = dir;
        }
        if let Some(dir) = self.dockerfile_build_dir {
            output.dockerfile_build_dir = dir;
        }
        if let Some(dir) = self.dockerfile_source_dir {
            output.dockerfile_source_dir = dir;
        }
        if let Some(file) = self.project_file {
            output.project_file = file;
        }

        let images = &mut config.images;
        if let Some(fmt) = self.dockerfile_image_builder_fmt {
            images.builder_image_fmt = fmt;
        }
        if let Some(fmt) = self.app_file_fmt {
            images.app_file_fmt = fmt;
        }
        if let Some(fmt) = self.registry_image_fmt {
            images.registry_image_fmt = fmt;
        }
        if let Some(repositories) = self.images_from {
            images.images_from = repositories;
        }
        if let Some(fmt) = self.images_from_url_format {
            images.images_from_url_fmt = fmt;
        }

        let dockerfile = &mut config.dockerfile;
        if let Some(packages) = self.additional_packages {
            dockerfile.additional_packages = packages;
        }
        if let Some(template) = self.template_name {
            dockerfile.template = template;
        }
        dockerfile.rpms_lock_file |= self.generate_rpms_lock_file;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_flags_keep_config_values() {
        let mut config = GeneratorConfig::default();
        config.images.images_from = vec!["eventing".to_owned()];
        config.dockerfile.rpms_lock_file = true;

        GenerateArgs::default().apply(&mut config);

        assert_eq!(config.images.images_from, vec!["eventing"]);
        assert!(config.dockerfile.rpms_lock_file);
        assert_eq!(config.filters.includes, GeneratorConfig::default().filters.includes);
    }

    #[test]
    fn flags_override_config_values() {
        let mut config = GeneratorConfig::default();
        let args = GenerateArgs {
            includes: Some(Vec::new()),
            output: Some(PathBuf::from("out")),
            template_name: Some(TemplateName::FuncUtil),
            generate_rpms_lock_file: true,
            ..GenerateArgs::default()
        };

        args.apply(&mut config);

        assert!(config.filters.includes.is_empty());
        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert_eq!(config.dockerfile.template, TemplateName::FuncUtil);
        assert!(config.dockerfile.rpms_lock_file);
    }

    #[test]
    fn empty_root_dir_is_rejected() {
        let args = GenerateArgs {
            root_dir: PathBuf::new(),
            ..GenerateArgs::default()
        };
        let err = args.into_run().err().unwrap();
        assert!(err.to_string().contains("root"), "got: {err}");
    }
}
