use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// File name of the optional per-repository configuration.
pub const CONFIG_FILE_NAME: &str = "dockergen.toml";

/// dockergen.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub filters: FilterConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub images: ImageConfig,
    #[serde(default)]
    pub dockerfile: DockerfileConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Regexes a directory must match (any of) to be scanned.
    /// An empty list lets every directory through.
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    /// Regexes that reject a directory even if an include matched.
    #[serde(default = "default_excludes")]
    pub excludes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output root, relative to the root directory unless absolute
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// Project image descriptors, relative to `dir`
    #[serde(default = "default_dockerfile_dir")]
    pub dockerfile_dir: PathBuf,
    /// Test image descriptors, relative to `dir`
    #[serde(default = "default_dockerfile_test_dir")]
    pub dockerfile_test_dir: PathBuf,
    /// Builder image descriptor, relative to `dir`
    #[serde(default = "default_dockerfile_build_dir")]
    pub dockerfile_build_dir: PathBuf,
    /// Source image descriptor, relative to `dir`
    #[serde(default = "default_dockerfile_source_dir")]
    pub dockerfile_source_dir: PathBuf,
    /// Project metadata document, relative to the root directory unless absolute
    #[serde(default = "default_project_file")]
    pub project_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Builder image; a single `%s` receives the Go major.minor version
    #[serde(default = "default_builder_image_fmt")]
    pub builder_image_fmt: String,
    /// Install path of the binary inside the image
    #[serde(default = "default_app_file_fmt")]
    pub app_file_fmt: String,
    /// Final image reference, filled with image name and project tag
    #[serde(default = "default_registry_image_fmt")]
    pub registry_image_fmt: String,
    /// Sibling repositories whose published image mappings are merged in
    #[serde(default)]
    pub images_from: Vec<String>,
    /// Mapping URL, filled with repository name and branch
    #[serde(default = "default_images_from_url_fmt")]
    pub images_from_url_fmt: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockerfileConfig {
    #[serde(default)]
    pub template: TemplateName,
    /// Additional system packages installed in every project image
    #[serde(default)]
    pub additional_packages: Vec<String>,
    /// Always write `rpms.lock.yaml`
    #[serde(default)]
    pub rpms_lock_file: bool,
}

/// Project image template selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateName {
    #[default]
    Default,
    FuncUtil,
}

impl TemplateName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::FuncUtil => "func-util",
        }
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateName {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "func-util" => Ok(Self::FuncUtil),
            other => Err(crate::Error::UnknownTemplate(other.to_owned())),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            includes: default_includes(),
            excludes: default_excludes(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            dockerfile_dir: default_dockerfile_dir(),
            dockerfile_test_dir: default_dockerfile_test_dir(),
            dockerfile_build_dir: default_dockerfile_build_dir(),
            dockerfile_source_dir: default_dockerfile_source_dir(),
            project_file: default_project_file(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            builder_image_fmt: default_builder_image_fmt(),
            app_file_fmt: default_app_file_fmt(),
            registry_image_fmt: default_registry_image_fmt(),
            images_from: Vec::new(),
            images_from_url_fmt: default_images_from_url_fmt(),
        }
    }
}

impl GeneratorConfig {
    /// Load from dockergen.toml in the given directory, or return defaults if not found.
    pub fn load(root_dir: &Path) -> crate::Result<Self> {
        let config_path = root_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }
}

impl OutputConfig {
    /// Absolute output root for a run rooted at `root_dir`.
    pub fn root(&self, root_dir: &Path) -> PathBuf {
        root_dir.join(&self.dir)
    }

    /// Absolute project metadata path for a run rooted at `root_dir`.
    pub fn project_file(&self, root_dir: &Path) -> PathBuf {
        root_dir.join(&self.project_file)
    }
}

fn default_includes() -> Vec<String> {
    vec!["test/test_images.*".to_owned(), "cmd.*".to_owned()]
}

fn default_excludes() -> Vec<String> {
    vec![
        r".*k8s\.io.*".to_owned(),
        ".*knative.dev/pkg/codegen.*".to_owned(),
    ]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("openshift")
}

fn default_dockerfile_dir() -> PathBuf {
    PathBuf::from("ci-operator/knative-images")
}

fn default_dockerfile_test_dir() -> PathBuf {
    PathBuf::from("ci-operator/knative-test-images")
}

fn default_dockerfile_build_dir() -> PathBuf {
    PathBuf::from("ci-operator/build-image")
}

fn default_dockerfile_source_dir() -> PathBuf {
    PathBuf::from("ci-operator/source-image")
}

fn default_project_file() -> PathBuf {
    PathBuf::from("openshift/project.yaml")
}

fn default_builder_image_fmt() -> String {
    "registry.ci.openshift.org/openshift/release:rhel-8-release-golang-%s-openshift-4.17".to_owned()
}

fn default_app_file_fmt() -> String {
    "/usr/bin/%s".to_owned()
}

fn default_registry_image_fmt() -> String {
    "registry.ci.openshift.org/openshift/%s:%s".to_owned()
}

fn default_images_from_url_fmt() -> String {
    "https://raw.githubusercontent.com/openshift-knative/%s/%s/openshift/images.yaml".to_owned()
}
