use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name of the image mapping manifest.
pub const MAPPING_FILE_NAME: &str = "images.yaml";

/// Program identity → registry image reference.
///
/// Keys are kept sorted so the serialized manifest is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageMapping {
    entries: BTreeMap<String, String>,
}

impl ImageMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a locally built image.
    ///
    /// Two local entry points resolving to the same identity is an error:
    /// the second would silently replace the first image.
    pub fn insert_local(
        &mut self,
        identity: impl Into<String>,
        reference: impl Into<String>,
    ) -> Result<(), MappingError> {
        let identity = identity.into();
        let reference = reference.into();
        if let Some(existing) = self.entries.get(&identity) {
            return Err(MappingError::IdentityCollision {
                identity,
                existing: existing.clone(),
                new: reference,
            });
        }
        tracing::debug!(identity = %identity, reference = %reference, "local image");
        self.entries.insert(identity, reference);
        Ok(())
    }

    /// Add entries from an external mapping.
    ///
    /// Only identities not yet present are added; existing entries always
    /// win. Returns the number of entries added.
    pub fn merge_external(
        &mut self,
        repository: &str,
        external: BTreeMap<String, String>,
    ) -> usize {
        let mut added = 0;
        for (identity, reference) in external {
            if self.entries.contains_key(&identity) {
                continue;
            }
            tracing::info!(repository, identity = %identity, reference = %reference, "additional image");
            self.entries.insert(identity, reference);
            added += 1;
        }
        added
    }

    pub fn get(&self, identity: &str) -> Option<&str> {
        self.entries.get(identity).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn to_yaml(&self) -> Result<String, MappingError> {
        serde_yaml::to_string(&self.entries).map_err(MappingError::Serialize)
    }

    /// Serialize to `path`, creating parent directories as needed.
    pub fn write(&self, path: &Path) -> Result<(), MappingError> {
        let yaml = self.to_yaml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| MappingError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        std::fs::write(path, yaml).map_err(|e| MappingError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::info!(path = %path.display(), images = self.len(), "wrote image mapping");
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("image identity {identity} is produced twice: {existing} and {new}")]
    IdentityCollision {
        identity: String,
        existing: String,
        new: String,
    },

    #[error("failed to serialize image mapping")]
    Serialize(#[source] serde_yaml::Error),

    #[error("failed to write image mapping to {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
