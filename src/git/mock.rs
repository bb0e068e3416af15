use crate::error::{DocsBuildError, Result};
use crate::git::Repository;
use std::cell::RefCell;
use std::collections::HashMap;

/// Mock repository for testing without actual git operations
///
/// Tracks HEAD as a branch name plus commit. Checking out a known branch
/// moves HEAD to that branch; checking out a tag or commit detaches it.
pub struct MockRepository {
    branches: HashMap<String, String>,
    tags: HashMap<String, String>,
    head: RefCell<(String, String)>,
    checkouts: RefCell<Vec<String>>,
}

impl MockRepository {
    /// Create a repository with HEAD on `branch` at `commit`
    pub fn new(branch: impl Into<String>, commit: impl Into<String>) -> Self {
        let branch = branch.into();
        let commit = commit.into();
        let mut branches = HashMap::new();
        branches.insert(branch.clone(), commit.clone());

        MockRepository {
            branches,
            tags: HashMap::new(),
            head: RefCell::new((branch, commit)),
            checkouts: RefCell::new(Vec::new()),
        }
    }

    /// Add a tag pointing to a commit
    pub fn add_tag(&mut self, name: impl Into<String>, commit: impl Into<String>) {
        self.tags.insert(name.into(), commit.into());
    }

    /// Add a branch pointing to a commit
    pub fn add_branch(&mut self, name: impl Into<String>, commit: impl Into<String>) {
        self.branches.insert(name.into(), commit.into());
    }

    /// Every checkout target requested so far, in order
    pub fn checkouts(&self) -> Vec<String> {
        self.checkouts.borrow().clone()
    }
}

impl Repository for MockRepository {
    fn head_commit(&self) -> Result<String> {
        Ok(self.head.borrow().1.clone())
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self.head.borrow().0.clone())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let mut tags: Vec<String> = self.tags.keys().cloned().collect();
        tags.sort();
        Ok(tags)
    }

    fn checkout(&self, target: &str) -> Result<()> {
        self.checkouts.borrow_mut().push(target.to_string());

        let new_head = if let Some(commit) = self.branches.get(target) {
            (target.to_string(), commit.clone())
        } else if let Some(commit) = self.tags.get(target) {
            ("HEAD".to_string(), commit.clone())
        } else if self
            .branches
            .values()
            .chain(self.tags.values())
            .any(|c| c == target)
        {
            ("HEAD".to_string(), target.to_string())
        } else {
            return Err(DocsBuildError::Checkout {
                target: target.to_string(),
                source: git2::Error::from_str("reference not found"),
            });
        };

        *self.head.borrow_mut() = new_head;
        Ok(())
    }
}
