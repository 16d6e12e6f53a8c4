//! Core data model definitions shared across Maildeck crates.
#![allow(missing_docs)]

pub mod catalog;
pub mod error;
pub mod filter;
pub mod metadata;
pub mod slug;
pub mod view;

// Intentionally curated re-exports for downstream consumers.
pub use catalog::{ArtifactItem, Catalog};
pub use error::{ModelError, Result as ModelResult};
pub use filter::{FilterCriteria, ProjectFilter, SortKey, StatusFilter};
pub use metadata::{
    ArtifactMetadata, ArtifactStatus, RawMetadata, UNASSIGNED_PROJECT,
};
pub use slug::ArtifactSlug;
pub use view::{RouteClass, ViewMode};
