//! Domain types - versions, release metadata and build context

pub mod context;
pub mod descriptor;
pub mod tag;
pub mod version;
pub mod version_set;

pub use context::BuildContext;
pub use descriptor::ReleaseDescriptor;
pub use tag::{is_release_tag, latest_release_tag};
pub use version::Version;
pub use version_set::VersionSet;
