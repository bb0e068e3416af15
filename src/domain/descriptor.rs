use crate::domain::Version;

/// Release metadata written into the site's generated data module
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseDescriptor {
    pub project: String,
    pub version: Version,
    pub min_python: String,
    pub max_python: String,
}

impl ReleaseDescriptor {
    /// Render the module text consumed by the site generator
    pub fn render(&self) -> String {
        [
            "// this file is autogenerated".to_string(),
            "export default {".to_string(),
            format!(
                "  release_version: '{}, version {}',",
                self.project, self.version
            ),
            format!("   min_python: '{}',", self.min_python),
            format!("   max_python: '{}',", self.max_python),
            "}".to_string(),
        ]
        .join("\n")
    }
}
