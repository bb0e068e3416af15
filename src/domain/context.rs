use std::path::{Path, PathBuf};

/// Where the build started from: captured once, never mutated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    working_dir: PathBuf,
    commit: String,
    branch: String,
}

impl BuildContext {
    pub fn new(
        working_dir: impl Into<PathBuf>,
        commit: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        BuildContext {
            working_dir: working_dir.into(),
            commit: commit.into(),
            branch: branch.into(),
        }
    }

    /// The site directory every relative path is resolved against
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn commit(&self) -> &str {
        &self.commit
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Whether the build started from a detached HEAD
    pub fn is_detached(&self) -> bool {
        self.branch == "HEAD"
    }

    /// The ref to check out to get back to where the build started
    pub fn restore_target(&self) -> &str {
        if self.is_detached() {
            &self.commit
        } else {
            &self.branch
        }
    }

    /// Resolve a path relative to the working directory
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.working_dir.join(relative)
    }
}
