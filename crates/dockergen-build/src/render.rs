use std::path::{Path, PathBuf};

use minijinja::{AutoEscape, Environment, UndefinedBehavior};

use crate::context::TemplateContext;
use crate::template::TemplateSource;

/// File written inside every descriptor directory.
pub const DESCRIPTOR_FILE_NAME: &str = "Dockerfile";

/// Renders templates from a [`TemplateSource`] and writes descriptors.
///
/// Rendering is strict: a variable the context does not define is an error,
/// never an empty string.
pub struct DescriptorRenderer<S> {
    templates: S,
}

impl<S: TemplateSource> DescriptorRenderer<S> {
    pub fn new(templates: S) -> Self {
        Self { templates }
    }

    /// Render template `name` with `context`.
    pub fn render_to_string(
        &self,
        name: &str,
        context: &TemplateContext,
    ) -> Result<String, RenderError> {
        let source = self
            .templates
            .template(name)
            .ok_or_else(|| RenderError::UnknownTemplate(name.to_owned()))?;

        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);

        let template =
            env.template_from_named_str(name, source)
                .map_err(|e| RenderError::Template {
                    name: name.to_owned(),
                    source: e,
                })?;
        template.render(context).map_err(|e| RenderError::Template {
            name: name.to_owned(),
            source: e,
        })
    }

    /// Render template `name` into `destination_dir/Dockerfile`.
    ///
    /// The destination directory is removed and recreated first, so nothing
    /// from a previous run survives. The template is rendered before anything
    /// is touched on disk. Returns the absolute path of the written file.
    pub fn render(
        &self,
        name: &str,
        context: &TemplateContext,
        destination_dir: &Path,
    ) -> Result<PathBuf, RenderError> {
        let content = self.render_to_string(name, context)?;
        let path = write_replacing_dir(destination_dir, DESCRIPTOR_FILE_NAME, &content)?;
        tracing::info!(template = name, path = %path.display(), "descriptor written");
        Ok(path)
    }
}

/// Replace `dir` with a fresh directory holding only `file_name`.
fn write_replacing_dir(dir: &Path, file_name: &str, content: &str) -> Result<PathBuf, RenderError> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %dir.display(), "no previous descriptor directory");
        }
        Err(e) => {
            return Err(RenderError::Cleanup {
                path: dir.to_path_buf(),
                source: e,
            });
        }
    }
    std::fs::create_dir_all(dir).map_err(|e| RenderError::CreateDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let path = dir.join(file_name);
    std::fs::write(&path, content).map_err(|e| RenderError::Write {
        path: path.clone(),
        source: e,
    })?;

    std::path::absolute(&path).map_err(|e| RenderError::Resolve { path, source: e })
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("unknown template {0:?}")]
    UnknownTemplate(String),
    #[error("failed to render template {name}")]
    Template {
        name: String,
        source: minijinja::Error,
    },
    #[error("failed to clean up descriptor directory {path}")]
    Cleanup {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to resolve absolute path of {path}")]
    Resolve {
        path: PathBuf,
        source: std::io::Error,
    },
}
