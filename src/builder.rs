//! Docs build orchestration
//!
//! [DocsBuilder] sequences the steps that assemble a multi-version docs
//! site: pulling the archived versions from storage, pulling each version's
//! tagged source, normalizing them, generating API docs and running the site
//! generator. It also cuts new versioned snapshots.
//!
//! Everything runs sequentially. Commands run in explicit working
//! directories derived from the [BuildContext]; the process working
//! directory is never changed.

use crate::archive::{self, Archive, ArchiveSource};
use crate::command::{CommandRunner, ShellCommand};
use crate::config::{expand, Config};
use crate::domain::{latest_release_tag, BuildContext, ReleaseDescriptor, Version, VersionSet};
use crate::error::{DocsBuildError, Result};
use crate::git::Repository;
use crate::ui;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Directory holding one extracted source tree per version
pub const VERSIONED_CODE_DIR: &str = "versioned_code";

/// Version list inside the versioned docs archive
pub const VERSIONS_FILE: &str = "versions.json";

/// How the build was invoked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Building on a developer machine: return to the branch, not the commit
    pub is_local: bool,

    /// Building a pull request preview
    pub is_pull_request: bool,
}

/// The versioned docs archive, downloaded and opened but not yet extracted
struct VersionedDocs {
    archive: Archive,
    versions: VersionSet,
}

/// Orchestrates docs builds over a repository, a command runner and an
/// archive source
pub struct DocsBuilder<R, C, A> {
    config: Config,
    options: BuildOptions,
    context: BuildContext,
    repo: R,
    runner: C,
    archives: A,
}

impl<R, C, A> DocsBuilder<R, C, A>
where
    R: Repository,
    C: CommandRunner,
    A: ArchiveSource,
{
    /// Create a builder for the site in `site_dir`
    ///
    /// Records the current commit and branch so they can be restored later.
    ///
    /// # Returns
    /// * `Ok(DocsBuilder)` - Builder with captured context
    /// * `Err(MissingOutput)` - If HEAD has no commit or branch name
    pub fn new(
        site_dir: impl Into<PathBuf>,
        config: Config,
        options: BuildOptions,
        repo: R,
        runner: C,
        archives: A,
    ) -> Result<Self> {
        let commit = repo.head_commit()?;
        if commit.is_empty() {
            return Err(DocsBuildError::missing_output("git rev-parse HEAD"));
        }

        let branch = repo.current_branch()?;
        if branch.is_empty() {
            return Err(DocsBuildError::missing_output(
                "git rev-parse --abbrev-ref HEAD",
            ));
        }

        let context = BuildContext::new(site_dir, commit, branch);
        debug!(?context, ?options, "captured build context");

        Ok(DocsBuilder {
            config,
            options,
            context,
            repo,
            runner,
            archives,
        })
    }

    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    /// Build API docs and the production site
    ///
    /// Loads the archived versioned docs, generates API docs, then runs the
    /// site's production build.
    pub fn build_docs(&self) -> Result<()> {
        ui::display_header("Preparing to build docs...");
        self.load_all_versioned_docs()?;

        self.invoke_api_docs()?;

        ui::display_header("Building docusaurus docs...");
        self.run_site(&self.config.site.build)
    }

    /// Prepare every version and serve the site locally
    ///
    /// Returns only once the site generator's dev server exits.
    pub fn build_docs_locally(&self) -> Result<()> {
        self.prepare()?;

        ui::display_header("Running yarn start to serve docs locally...");
        self.run_site(&self.config.site.start)
    }

    /// Cut a versioned docs snapshot for an existing tag
    ///
    /// Fails with [DocsBuildError::VersionExists] before touching the working
    /// tree if the version is already archived. On success the descriptor file
    /// and the original checkout are restored, and the site is rebuilt as a
    /// final check.
    ///
    /// Failures after the tag is checked out are not rolled back: the working
    /// tree stays on the tag with a generated descriptor.
    ///
    /// # Returns
    /// * `Ok(PathBuf)` - Path of the packaged artifact to upload
    pub fn create_version(&self, version: &Version) -> Result<PathBuf> {
        ui::display_header(&format!("Creating version {}", version));

        let docs = self.fetch_versioned_docs()?;
        if docs.versions.contains(version) {
            return Err(DocsBuildError::VersionExists(version.clone()));
        }
        self.install_versioned_docs(docs)?;

        self.repo.checkout(&version.to_string())?;

        let output = match self.snapshot_checked_out_version(version) {
            Ok(output) => output,
            Err(e) => {
                ui::display_recovery_hint(
                    self.context.restore_target(),
                    &PathBuf::from(&self.config.release.descriptor_path),
                );
                return Err(e);
            }
        };

        ui::display_header("Testing that we can build the docs...");
        self.invoke_api_docs()?;
        self.run_site(&self.config.site.build)?;

        ui::display_header(&format!(
            "Successfully created version {}. Upload {} to S3.",
            version, self.config.package.output
        ));
        Ok(output)
    }

    /// Highest release tag in the repository (e.g. `0.18.12`)
    pub fn latest_tag(&self) -> Result<String> {
        let tags = self.repo.list_tags()?;
        latest_release_tag(tags).ok_or_else(|| DocsBuildError::missing_output("git tag"))
    }

    /// Steps 2-9 of version creation, run with the tag checked out
    fn snapshot_checked_out_version(&self, version: &Version) -> Result<PathBuf> {
        let descriptor_path = self.context.resolve(&self.config.release.descriptor_path);
        let previous_descriptor = fs::read(&descriptor_path)?;

        let descriptor = ReleaseDescriptor {
            project: self.config.release.project_name.clone(),
            version: version.clone(),
            min_python: self.config.release.min_python.clone(),
            max_python: self.config.release.max_python.clone(),
        };
        fs::write(&descriptor_path, descriptor.render())?;

        let version_string = version.to_string();
        self.run_site(&expand(
            &self.config.site.create_version,
            &[("version", version_string.as_str())],
        ))?;
        self.load_versioned_code(version)?;

        self.prepare_prior_versions(std::slice::from_ref(version))?;

        let output = self.package()?;

        fs::write(&descriptor_path, previous_descriptor)?;
        self.repo.checkout(self.context.restore_target())?;

        Ok(output)
    }

    /// Common preparation before serving: load, normalize, API docs, checkout
    fn prepare(&self) -> Result<VersionSet> {
        ui::display_header("Preparing to build docs...");
        let versions = self.load_files()?;

        ui::display_header("Updating versioned code and docs via prepare_prior_versions...");
        self.prepare_prior_versions(versions.as_slice())?;
        ui::display_status("Updated versioned code and docs");

        self.invoke_api_docs()?;
        self.checkout_correct_branch()?;

        Ok(versions)
    }

    /// Load the versioned docs archive and every listed version's source
    fn load_files(&self) -> Result<VersionSet> {
        let versions = self.load_all_versioned_docs()?;
        for version in &versions {
            self.load_versioned_code(version)?;
        }
        Ok(versions)
    }

    /// Rebuild `versioned_code` and extract the versioned docs archive
    pub fn load_all_versioned_docs(&self) -> Result<VersionSet> {
        let docs = self.fetch_versioned_docs()?;
        self.install_versioned_docs(docs)
    }

    /// Download the versioned docs archive and read its version list
    fn fetch_versioned_docs(&self) -> Result<VersionedDocs> {
        let url = &self.config.storage.versions_url;
        ui::display_status(&format!("Copying previous versioned docs from {}", url));

        let mut archive = archive::open(self.archives.fetch(url)?)?;
        let versions = VersionSet::from_json(&archive::read_entry(&mut archive, VERSIONS_FILE)?)?;
        debug!(count = versions.len(), "read archived versions");

        Ok(VersionedDocs { archive, versions })
    }

    /// Recreate `versioned_code` empty and extract the archive into the site
    fn install_versioned_docs(&self, docs: VersionedDocs) -> Result<VersionSet> {
        let VersionedDocs {
            mut archive,
            versions,
        } = docs;

        let code_dir = self.versioned_code_dir();
        if code_dir.exists() {
            fs::remove_dir_all(&code_dir)?;
        }
        fs::create_dir_all(&code_dir)?;

        archive::extract_all(&mut archive, self.context.working_dir())?;
        Ok(versions)
    }

    /// Extract a tag's source archive into `versioned_code/version-<version>`
    pub fn load_versioned_code(&self, version: &Version) -> Result<()> {
        let code_dir = self.versioned_code_dir();
        ui::display_status(&format!(
            "Copying code referenced in docs from {} and writing to {}/{}",
            version,
            VERSIONED_CODE_DIR,
            version.code_dir_name()
        ));

        let url = self.config.repository.archive_url(version);
        archive::with_archive(&self.archives, &url, |archive| {
            archive::extract_all(archive, &code_dir)?;

            let extracted = code_dir.join(self.config.repository.archive_root(version));
            if !extracted.is_dir() {
                return Err(DocsBuildError::MissingDirectory(extracted));
            }

            let normalized = code_dir.join(version.code_dir_name());
            if normalized.exists() {
                fs::remove_dir_all(&normalized)?;
            }
            fs::rename(&extracted, &normalized)?;
            Ok(())
        })
    }

    /// Run the external normalization step over the given versions
    fn prepare_prior_versions(&self, versions: &[Version]) -> Result<()> {
        if versions.is_empty() {
            ui::display_status("No prior versions to prepare");
            return Ok(());
        }

        let list = versions
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let line = expand(&self.config.prepare.command, &[("versions", list.as_str())]);

        self.runner.run(&ShellCommand::stream(
            line,
            self.context.resolve(&self.config.prepare.working_dir),
        ))?;
        Ok(())
    }

    fn invoke_api_docs(&self) -> Result<()> {
        ui::display_status("Invoking api-docs...");

        self.runner.run(&ShellCommand::stream(
            self.config.api_docs.command.clone(),
            self.context.resolve(&self.config.api_docs.working_dir),
        ))?;
        Ok(())
    }

    /// Return to the branch (local builds) or the exact commit (CI builds)
    fn checkout_correct_branch(&self) -> Result<()> {
        let target = if self.options.is_local {
            ui::display_header(&format!(
                "Building locally - Checking back out current branch ({}) before building the rest of the docs.",
                self.context.branch()
            ));
            self.context.restore_target()
        } else {
            ui::display_header(&format!(
                "In a pull request or deploying (PULL_REQUEST = {}) Checking out {}.",
                self.options.is_pull_request,
                self.context.commit()
            ));
            self.context.commit()
        };

        self.repo.checkout(target)
    }

    /// Zip the versioned artifacts for upload
    fn package(&self) -> Result<PathBuf> {
        let output = &self.config.package.output;
        let line = expand(&self.config.package.command, &[("output", output.as_str())]);

        let listing = self
            .runner
            .run(&ShellCommand::capture(line, self.context.working_dir()))?;
        debug!(
            entries = listing.as_deref().map_or(0, |out| out.lines().count()),
            "packaged versioned artifacts"
        );
        ui::display_success(&format!("Created {}", output));

        Ok(self.context.resolve(output))
    }

    fn run_site(&self, line: &str) -> Result<()> {
        self.runner
            .run(&ShellCommand::stream(line, self.context.working_dir()))?;
        Ok(())
    }

    fn versioned_code_dir(&self) -> PathBuf {
        self.context.resolve(VERSIONED_CODE_DIR)
    }
}
