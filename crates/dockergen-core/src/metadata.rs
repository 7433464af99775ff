use serde::Deserialize;
use std::path::Path;

/// Project metadata document (`openshift/project.yaml`).
///
/// Every field is optional so that a partially filled document, or no
/// document at all, still yields a usable value for descriptor generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProjectMetadata {
    #[serde(default)]
    pub project: ProjectSection,
    #[serde(default)]
    pub requirements: Requirements,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSection {
    /// Release tag, e.g. `knative-v1.8`
    #[serde(default)]
    pub tag: String,
    /// Prefix shared by every image name, e.g. `knative-serving`
    #[serde(default)]
    pub image_prefix: String,
    /// Product version, e.g. `1.35.0`
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    #[serde(default)]
    pub ocp_version: OcpVersion,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OcpVersion {
    /// Minimum supported platform version, e.g. `4.14`
    #[serde(default)]
    pub min: String,
}

impl ProjectMetadata {
    /// Read the metadata document at `path`.
    pub fn read(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| crate::Error::MetadataRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(path, &content)
    }

    /// Read the metadata document at `path`, returning `None` if it does not exist.
    pub fn read_optional(path: &Path) -> crate::Result<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(path, &content).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "project metadata file not found");
                Ok(None)
            }
            Err(e) => Err(crate::Error::MetadataRead {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    fn parse(path: &Path, content: &str) -> crate::Result<Self> {
        // An empty document deserializes as unit, not as an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| crate::Error::MetadataParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Image prefix with the shared `knative-` prefix removed.
    ///
    /// `knative-serving` becomes `serving`; an empty prefix stays empty.
    pub fn project_name(&self) -> &str {
        let prefix = self.project.image_prefix.as_str();
        prefix.strip_prefix("knative-").unwrap_or(prefix)
    }

    /// Branch that sibling repositories publish their image mappings on.
    ///
    /// Derived from the release tag: `knative-v1.8` → `release-v1.8`,
    /// `knative-nightly` → `release-next`.
    pub fn release_branch(&self) -> String {
        self.project
            .tag
            .replacen("knative", "release", 1)
            .replacen("nightly", "next", 1)
    }
}
