use std::path::{Path, PathBuf};

use crate::context::TemplateContext;
use crate::render::{DescriptorRenderer, RenderError};
use crate::template::{self, TemplateSource};

/// Lock file name expected by the hermetic RPM prefetcher.
pub const RPMS_LOCK_FILE_NAME: &str = "rpms.lock.yaml";

/// Write `rpms.lock.yaml` into `root_dir`, replacing any previous copy.
pub fn write_rpms_lock_file<S: TemplateSource>(
    renderer: &DescriptorRenderer<S>,
    root_dir: &Path,
) -> Result<PathBuf, RenderError> {
    let content = renderer.render_to_string(template::RPMS_LOCK, &TemplateContext::new())?;

    let path = root_dir.join(RPMS_LOCK_FILE_NAME);
    std::fs::write(&path, content).map_err(|e| RenderError::Write {
        path: path.clone(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), "rpm lock file written");
    Ok(path)
}
