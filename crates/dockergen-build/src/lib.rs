//! Descriptor rendering for dockergen.
//!
//! # Generated files
//!
//! ```text
//! <output>/<dockerfile-build-dir>/Dockerfile    builder image   (build-image)
//! <output>/<dockerfile-source-dir>/Dockerfile   source image    (source-image)
//! <output>/<dockerfile-dir>/<bin>/Dockerfile    program image   (default | func-util)
//! <output>/<dockerfile-test-dir>/<bin>/Dockerfile  test image   (default | func-util)
//! <output>/<dockerfile-dir>/must-gather/Dockerfile              (must-gather)
//! <root>/rpms.lock.yaml                          RPM lock file   (rpms-lock)
//! ```
//!
//! Every descriptor directory is wiped before it is written, so a rerun
//! against the same tree reproduces the same files byte for byte.

pub mod context;
pub mod dockerfile;
pub mod render;
pub mod rpms_lock;
pub mod template;

pub use context::{ContextValue, TemplateContext};
pub use dockerfile::{PackageInstructions, ProjectDescriptor};
pub use render::{DESCRIPTOR_FILE_NAME, DescriptorRenderer, RenderError};
pub use template::{EmbeddedTemplates, TemplateSource};
