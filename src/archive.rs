//! Remote zip archives: download, scoped access and extraction
//!
//! Archives are downloaded fully into memory and opened with the `zip`
//! crate. Access goes through [with_archive], which hands the open archive
//! to a closure and drops it on every exit path.

use crate::error::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Cursor, Read};
use std::path::Path;
use tracing::{debug, trace};
use zip::ZipArchive;

/// An opened in-memory zip archive
pub type Archive = ZipArchive<Cursor<Vec<u8>>>;

/// Somewhere zip archives can be downloaded from
pub trait ArchiveSource {
    /// Download the complete archive at `url`
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

impl<T: ArchiveSource + ?Sized> ArchiveSource for &T {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        (**self).fetch(url)
    }
}

/// Downloads archives over HTTP(S) with a blocking client
pub struct HttpArchiveSource {
    client: reqwest::blocking::Client,
}

impl HttpArchiveSource {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("docs-builder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HttpArchiveSource { client })
    }
}

impl ArchiveSource for HttpArchiveSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url, "downloading archive");

        let response = self.client.get(url).send()?.error_for_status()?;
        let bytes = response.bytes()?;

        debug!(url, size = bytes.len(), "downloaded archive");
        Ok(bytes.to_vec())
    }
}

/// Serves archives from memory, keyed by URL; used in tests
#[derive(Debug, Default)]
pub struct StaticArchiveSource {
    archives: HashMap<String, Vec<u8>>,
    fetched: RefCell<Vec<String>>,
}

impl StaticArchiveSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the archive bytes served for a URL
    pub fn insert(&mut self, url: impl Into<String>, bytes: Vec<u8>) {
        self.archives.insert(url.into(), bytes);
    }

    /// URLs fetched so far, in order
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }
}

impl ArchiveSource for StaticArchiveSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.fetched.borrow_mut().push(url.to_string());

        self.archives.get(url).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no archive for {}", url)).into()
        })
    }
}

/// Download the archive at `url` and run `f` with it open
///
/// The archive is closed when `f` returns, whether it succeeded or not.
pub fn with_archive<S, T, F>(source: &S, url: &str, f: F) -> Result<T>
where
    S: ArchiveSource + ?Sized,
    F: FnOnce(&mut Archive) -> Result<T>,
{
    let bytes = source.fetch(url)?;
    let mut archive = open(bytes)?;
    f(&mut archive)
}

/// Open archive bytes already in memory
pub fn open(bytes: Vec<u8>) -> Result<Archive> {
    Ok(ZipArchive::new(Cursor::new(bytes))?)
}

/// Read a single entry's contents
pub fn read_entry(archive: &mut Archive, name: &str) -> Result<Vec<u8>> {
    let mut file = archive.by_name(name)?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)?;
    Ok(contents)
}

/// Extract every entry into `output_dir`, creating it if needed
///
/// Entries whose names would escape `output_dir` are skipped.
pub fn extract_all(archive: &mut Archive, output_dir: &Path) -> Result<()> {
    debug!(output = %output_dir.display(), entries = archive.len(), "extracting archive");

    if !output_dir.exists() {
        fs::create_dir_all(output_dir)?;
    }

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;

        let path = match file.enclosed_name() {
            Some(path) => path.to_path_buf(),
            None => continue,
        };
        let output_path = output_dir.join(&path);

        if file.is_dir() {
            fs::create_dir_all(&output_path)?;
            continue;
        }

        if let Some(parent_dir) = output_path.parent() {
            if !parent_dir.exists() {
                fs::create_dir_all(parent_dir)?;
            }
        }

        let mut out = File::create(&output_path)?;
        io::copy(&mut file, &mut out)?;
        trace!(path = %output_path.display(), "extracted file");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            if let Some(mode) = file.unix_mode() {
                fs::set_permissions(&output_path, fs::Permissions::from_mode(mode))?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocsBuildError;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, contents) in entries {
            if name.ends_with('/') {
                writer
                    .add_directory(*name, SimpleFileOptions::default())
                    .unwrap();
            } else {
                writer.start_file(*name, SimpleFileOptions::default()).unwrap();
                writer.write_all(contents.as_bytes()).unwrap();
            }
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extract_all_creates_nested_paths() {
        let dir = TempDir::new().unwrap();
        let mut archive = open(zip_bytes(&[
            ("repo-1.0.0/", ""),
            ("repo-1.0.0/src/lib.py", "print('hi')"),
            ("versions.json", "[]"),
        ]))
        .unwrap();

        extract_all(&mut archive, &dir.path().join("out")).unwrap();

        let out = dir.path().join("out");
        assert!(out.join("repo-1.0.0").is_dir());
        assert_eq!(
            fs::read_to_string(out.join("repo-1.0.0/src/lib.py")).unwrap(),
            "print('hi')"
        );
        assert_eq!(fs::read_to_string(out.join("versions.json")).unwrap(), "[]");
    }

    #[test]
    fn test_extract_skips_escaping_entries() {
        let dir = TempDir::new().unwrap();
        let mut archive = open(zip_bytes(&[("../escape.txt", "x"), ("ok.txt", "y")])).unwrap();

        extract_all(&mut archive, dir.path()).unwrap();

        assert!(dir.path().join("ok.txt").exists());
        assert!(!dir.path().parent().unwrap().join("escape.txt").exists());
    }

    #[test]
    fn test_read_entry() {
        let mut archive = open(zip_bytes(&[("versions.json", "[\"0.1.0\"]")])).unwrap();
        assert_eq!(read_entry(&mut archive, "versions.json").unwrap(), b"[\"0.1.0\"]");
        assert!(matches!(
            read_entry(&mut archive, "missing.json"),
            Err(DocsBuildError::Archive(_))
        ));
    }

    #[test]
    fn test_with_archive_uses_source() {
        let mut source = StaticArchiveSource::new();
        source.insert("https://example.com/a.zip", zip_bytes(&[("a.txt", "a")]));

        let len = with_archive(&source, "https://example.com/a.zip", |archive| {
            Ok(archive.len())
        })
        .unwrap();

        assert_eq!(len, 1);
        assert_eq!(source.fetched(), vec!["https://example.com/a.zip"]);
    }

    #[test]
    fn test_with_archive_rejects_malformed_zip() {
        let mut source = StaticArchiveSource::new();
        source.insert("https://example.com/bad.zip", b"not a zip".to_vec());

        let result = with_archive(&source, "https://example.com/bad.zip", |_| Ok(()));
        assert!(matches!(result, Err(DocsBuildError::Archive(_))));
    }

    #[test]
    fn test_static_source_unknown_url() {
        let source = StaticArchiveSource::new();
        assert!(matches!(
            source.fetch("https://example.com/none.zip"),
            Err(DocsBuildError::Io(_))
        ));
    }
}
