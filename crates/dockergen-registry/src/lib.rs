//! Image references for generated descriptors.
//!
//! Each rendered entry point is resolved to a registry reference keyed by
//! its program identity, collected into an [`ImageMapping`], optionally
//! extended with the mappings sibling repositories publish, and written as
//! `images.yaml`.

pub mod env;
pub mod fetch;
pub mod mapping;
pub mod merge;
pub mod resolver;

pub use env::{EnvError, EnvLookup, ProcessEnv};
pub use fetch::{FetchError, FetchedDocument, HttpFetcher, MappingFetcher};
pub use mapping::{ImageMapping, MAPPING_FILE_NAME, MappingError};
pub use merge::{ExternalMerger, MergeError};
pub use resolver::{ImageResolver, ResolveError, ResolvedImage};
