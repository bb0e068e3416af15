use crate::error::{DocsBuildError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A released version of the documented project (e.g. `0.15.2`)
///
/// Only plain `MAJOR.MINOR.PATCH` is accepted: no `v` prefix, no pre-release
/// or build metadata. Formatting a parsed version yields the original string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version(semver::Version);

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version(semver::Version::new(major, minor, patch))
    }

    /// Parse version from a tag string (e.g., "1.2.3" -> Version(1,2,3))
    pub fn parse(tag: &str) -> Result<Self> {
        let parsed = semver::Version::parse(tag).map_err(|e| {
            DocsBuildError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z ({})",
                tag, e
            ))
        })?;

        if !parsed.pre.is_empty() || !parsed.build.is_empty() {
            return Err(DocsBuildError::version(format!(
                "Invalid version format: '{}' - pre-release and build metadata are not allowed",
                tag
            )));
        }

        Ok(Version(parsed))
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    /// Directory name used under `versioned_code` for this version
    pub fn code_dir_name(&self) -> String {
        format!("version-{}", self)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Version {
    type Err = DocsBuildError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = DocsBuildError;

    fn try_from(value: String) -> Result<Self> {
        Version::parse(&value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}
