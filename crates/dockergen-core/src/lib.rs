//! Core types and rules for dockergen.
//!
//! This crate owns everything that happens before a descriptor is rendered:
//! the `dockergen.toml` schema ([`GeneratorConfig`]), the project metadata
//! document ([`ProjectMetadata`]), `go.mod` reading ([`GoModule`]), the
//! include/exclude [`PathFilter`], entry-point discovery ([`discover`]), and the
//! naming rules applied to each [`EntryPoint`].

pub mod config;
pub mod discover;
pub mod error;
pub mod filter;
pub mod format;
pub mod gomod;
pub mod metadata;
pub mod naming;
pub mod version;

pub use config::{
    DockerfileConfig, FilterConfig, GeneratorConfig, ImageConfig, OutputConfig, TemplateName,
};
pub use discover::{BuildContext, EntryPoint, discover};
pub use error::{Error, Result};
pub use filter::PathFilter;
pub use gomod::GoModule;
pub use metadata::ProjectMetadata;
pub use naming::EntryPointNames;
