use crate::error::{DocsBuildError, Result};
use git2::build::CheckoutBuilder;
use git2::Repository as Git2Repo;
use std::path::Path;
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn checkout_inner(&self, target: &str) -> std::result::Result<(), git2::Error> {
        let (object, reference) = self.repo.revparse_ext(target)?;

        let mut options = CheckoutBuilder::new();
        options.safe();
        self.repo.checkout_tree(&object, Some(&mut options))?;

        match reference {
            Some(reference) if reference.is_branch() => match reference.name() {
                Some(name) => self.repo.set_head(name),
                None => Err(git2::Error::from_str("branch name is not valid UTF-8")),
            },
            _ => {
                let commit = object.peel_to_commit()?;
                self.repo.set_head_detached(commit.id())
            }
        }
    }
}

impl super::Repository for Git2Repository {
    fn head_commit(&self) -> Result<String> {
        let head = self.repo.head()?;
        let commit = head.peel_to_commit()?;

        Ok(commit.id().to_string())
    }

    fn current_branch(&self) -> Result<String> {
        if self.repo.head_detached()? {
            return Ok("HEAD".to_string());
        }

        let head = self.repo.head()?;
        head.shorthand()
            .map(|name| name.to_string())
            .ok_or_else(|| DocsBuildError::missing_output("git rev-parse --abbrev-ref HEAD"))
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        let mut names: Vec<String> = tags.iter().flatten().map(|s| s.to_string()).collect();
        names.sort();
        Ok(names)
    }

    fn checkout(&self, target: &str) -> Result<()> {
        debug!(reference = target, "checking out");

        self.checkout_inner(target)
            .map_err(|source| DocsBuildError::Checkout {
                target: target.to_string(),
                source,
            })
    }
}
