use crate::domain::Version;
use crate::error::{DocsBuildError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the project-local configuration file
pub const CONFIG_FILE_NAME: &str = "docsbuild.toml";

/// Represents the complete configuration for docs-builder.
///
/// Contains where archives are downloaded from, the collaborator command
/// lines, and the release descriptor settings. Every field has a default, so
/// an empty file (or no file at all) is a valid configuration.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub api_docs: ApiDocsConfig,

    #[serde(default)]
    pub prepare: PrepareConfig,

    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub package: PackageConfig,
}

fn default_versions_url() -> String {
    "https://superconductive-public.s3.us-east-2.amazonaws.com/oss_docs_versions.zip".to_string()
}

/// Where the archive of previously versioned docs lives.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StorageConfig {
    /// Zip containing `versions.json`, `versioned_docs/` and `versioned_sidebars/`
    #[serde(default = "default_versions_url")]
    pub versions_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            versions_url: default_versions_url(),
        }
    }
}

fn default_host() -> String {
    "github.com".to_string()
}

fn default_org() -> String {
    "great-expectations".to_string()
}

fn default_repository_name() -> String {
    "great_expectations".to_string()
}

/// The code host serving tagged source archives.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RepositoryConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_org")]
    pub org: String,

    #[serde(default = "default_repository_name")]
    pub name: String,
}

impl RepositoryConfig {
    /// URL of the source archive for a tag
    ///
    /// e.g. `https://github.com/great-expectations/great_expectations/archive/refs/tags/0.15.2.zip`
    pub fn archive_url(&self, version: &Version) -> String {
        format!(
            "https://{}/{}/{}/archive/refs/tags/{}.zip",
            self.host, self.org, self.name, version
        )
    }

    /// Top-level directory inside the source archive for a tag
    pub fn archive_root(&self, version: &Version) -> String {
        format!("{}-{}", self.name, version)
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            host: default_host(),
            org: default_org(),
            name: default_repository_name(),
        }
    }
}

fn default_build_command() -> String {
    "yarn build".to_string()
}

fn default_start_command() -> String {
    "yarn start".to_string()
}

fn default_version_command() -> String {
    "yarn docusaurus docs:version {version}".to_string()
}

/// Static-site generator commands, run in the site directory.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SiteConfig {
    #[serde(default = "default_build_command")]
    pub build: String,

    #[serde(default = "default_start_command")]
    pub start: String,

    /// Snapshot the current docs as a new version; `{version}` is substituted
    #[serde(default = "default_version_command")]
    pub create_version: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            build: default_build_command(),
            start: default_start_command(),
            create_version: default_version_command(),
        }
    }
}

fn default_api_docs_command() -> String {
    "invoke api-docs".to_string()
}

fn default_api_docs_dir() -> String {
    "../..".to_string()
}

/// API reference generator.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ApiDocsConfig {
    #[serde(default = "default_api_docs_command")]
    pub command: String,

    /// Relative to the site directory
    #[serde(default = "default_api_docs_dir")]
    pub working_dir: String,
}

impl Default for ApiDocsConfig {
    fn default() -> Self {
        ApiDocsConfig {
            command: default_api_docs_command(),
            working_dir: default_api_docs_dir(),
        }
    }
}

fn default_prepare_command() -> String {
    "python prepare_prior_versions.py {versions}".to_string()
}

fn default_prepare_dir() -> String {
    "..".to_string()
}

/// Normalization of previously versioned docs and code.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PrepareConfig {
    /// `{versions}` is replaced with the space-separated versions to process
    #[serde(default = "default_prepare_command")]
    pub command: String,

    /// Relative to the site directory
    #[serde(default = "default_prepare_dir")]
    pub working_dir: String,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        PrepareConfig {
            command: default_prepare_command(),
            working_dir: default_prepare_dir(),
        }
    }
}

fn default_descriptor_path() -> String {
    "docs/components/_data.jsx".to_string()
}

fn default_project_name() -> String {
    "great_expectations".to_string()
}

fn default_python_version() -> String {
    "3.8".to_string()
}

/// Generated release descriptor written while cutting a version.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    /// Relative to the site directory
    #[serde(default = "default_descriptor_path")]
    pub descriptor_path: String,

    #[serde(default = "default_project_name")]
    pub project_name: String,

    #[serde(default = "default_python_version")]
    pub min_python: String,

    #[serde(default = "default_python_version")]
    pub max_python: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            descriptor_path: default_descriptor_path(),
            project_name: default_project_name(),
            min_python: default_python_version(),
            max_python: default_python_version(),
        }
    }
}

fn default_package_output() -> String {
    "oss_docs_versions.zip".to_string()
}

fn default_package_command() -> String {
    "zip -r {output} versioned_code versioned_docs versioned_sidebars versions.json".to_string()
}

/// Packaging of the versioned artifacts for upload.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PackageConfig {
    #[serde(default = "default_package_output")]
    pub output: String,

    /// `{output}` is replaced with the artifact name
    #[serde(default = "default_package_command")]
    pub command: String,
}

impl Default for PackageConfig {
    fn default() -> Self {
        PackageConfig {
            output: default_package_output(),
            command: default_package_command(),
        }
    }
}

/// Substitutes `{name}` placeholders in a command template.
///
/// Unknown placeholders are left untouched.
///
/// # Example
/// ```
/// use docs_builder::config::expand;
/// assert_eq!(
///     expand("yarn docusaurus docs:version {version}", &[("version", "0.15.2")]),
///     "yarn docusaurus docs:version 0.15.2"
/// );
/// ```
pub fn expand(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{}}}", name), value)
    })
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `docsbuild.toml` in the site directory
/// 3. `.docsbuild.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `site_dir` - Directory searched for a project-local `docsbuild.toml`
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>, site_dir: &Path) -> Result<Config> {
    let local = site_dir.join(CONFIG_FILE_NAME);

    let (source, config_str) = if let Some(path) = config_path {
        (path.to_string(), read(Path::new(path))?)
    } else if local.exists() {
        (local.display().to_string(), read(&local)?)
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            (config_path.display().to_string(), read(&config_path)?)
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str)
        .map_err(|e| DocsBuildError::config(format!("Cannot parse {}: {}", source, e)))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| DocsBuildError::config(format!("Cannot read {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_url() {
        let repo = RepositoryConfig::default();
        let version = Version::new(0, 15, 2);
        assert_eq!(
            repo.archive_url(&version),
            "https://github.com/great-expectations/great_expectations/archive/refs/tags/0.15.2.zip"
        );
        assert_eq!(repo.archive_root(&version), "great_expectations-0.15.2");
    }

    #[test]
    fn test_expand() {
        assert_eq!(
            expand(
                "zip -r {output} versioned_code",
                &[("output", "out.zip")]
            ),
            "zip -r out.zip versioned_code"
        );
        assert_eq!(expand("echo {unknown}", &[("x", "y")]), "echo {unknown}");
    }

    #[test]
    fn test_partial_section_keeps_field_defaults() {
        let config: Config = toml::from_str(
            r#"
[release]
max_python = "3.11"
"#,
        )
        .unwrap();
        assert_eq!(config.release.max_python, "3.11");
        assert_eq!(config.release.min_python, "3.8");
        assert_eq!(config.release.descriptor_path, "docs/components/_data.jsx");
        assert_eq!(config.site, SiteConfig::default());
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }
}
