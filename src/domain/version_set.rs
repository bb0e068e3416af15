use crate::domain::Version;
use crate::error::Result;

/// The versions listed in an archived `versions.json`, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionSet {
    versions: Vec<Version>,
}

impl VersionSet {
    pub fn new(versions: Vec<Version>) -> Self {
        VersionSet { versions }
    }

    /// Parse the JSON array of version strings found in `versions.json`
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let versions: Vec<Version> = serde_json::from_slice(bytes)?;
        Ok(VersionSet { versions })
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.versions.contains(version)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Version> {
        self.versions.iter()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Highest version in the set
    pub fn latest(&self) -> Option<&Version> {
        self.versions.iter().max()
    }

    pub fn as_slice(&self) -> &[Version] {
        &self.versions
    }
}

impl<'a> IntoIterator for &'a VersionSet {
    type Item = &'a Version;
    type IntoIter = std::slice::Iter<'a, Version>;

    fn into_iter(self) -> Self::IntoIter {
        self.versions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_keeps_file_order() {
        let set = VersionSet::from_json(br#"["0.15.50", "0.14.12", "0.16.1"]"#).unwrap();
        let listed: Vec<String> = set.iter().map(|v| v.to_string()).collect();
        assert_eq!(listed, vec!["0.15.50", "0.14.12", "0.16.1"]);
        assert_eq!(set.latest(), Some(&Version::new(0, 16, 1)));
    }

    #[test]
    fn test_contains() {
        let set = VersionSet::from_json(br#"["0.15.50"]"#).unwrap();
        assert!(set.contains(&Version::new(0, 15, 50)));
        assert!(!set.contains(&Version::new(0, 15, 5)));
    }

    #[test]
    fn test_from_json_rejects_bad_entries() {
        assert!(VersionSet::from_json(br#"["0.15"]"#).is_err());
        assert!(VersionSet::from_json(br#"{"versions": []}"#).is_err());
    }

    #[test]
    fn test_empty() {
        let set = VersionSet::from_json(b"[]").unwrap();
        assert!(set.is_empty());
        assert_eq!(set.latest(), None);
    }
}
