//! Git operations abstraction layer
//!
//! The builder only needs a handful of version-control operations: reading
//! where HEAD is, listing tags and checking out a ref. They are expressed
//! by the [Repository] trait so the orchestration can be tested without a
//! real repository.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Version-control operations used by the docs builder
pub trait Repository {
    /// Full hash of the commit HEAD points at (`git rev-parse HEAD`)
    fn head_commit(&self) -> Result<String>;

    /// Short name of the checked-out branch (`git rev-parse --abbrev-ref HEAD`)
    ///
    /// Returns `"HEAD"` when HEAD is detached.
    fn current_branch(&self) -> Result<String>;

    /// All tag names, sorted alphabetically
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Check out a branch, tag or commit (`git checkout <target>`)
    ///
    /// Branches are checked out by name; anything else leaves HEAD detached.
    fn checkout(&self, target: &str) -> Result<()>;
}

impl<T: Repository + ?Sized> Repository for &T {
    fn head_commit(&self) -> Result<String> {
        (**self).head_commit()
    }

    fn current_branch(&self) -> Result<String> {
        (**self).current_branch()
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        (**self).list_tags()
    }

    fn checkout(&self, target: &str) -> Result<()> {
        (**self).checkout(target)
    }
}
