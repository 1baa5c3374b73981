//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod build_events;
pub mod index_repository;
pub mod package_repository;

pub use build_events::{BuildEvent, BuildEventSink, NoopEventSink, Stage};
pub use index_repository::IndexRepository;
pub use package_repository::{
    InstallTarget, InstalledPackage, PackageRepository, RepoError, RepoResult,
};
