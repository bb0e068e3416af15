// Shared fixtures for builder integration tests
#![allow(dead_code)]

use docs_builder::archive::StaticArchiveSource;
use docs_builder::config::Config;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const ORIGINAL_DESCRIPTOR: &str = "// this file is autogenerated\nexport default {\n  release_version: 'great_expectations, version 0.18.0',\n}\n";

/// Build an in-memory zip; names ending in `/` become directories
pub fn zip_bytes(entries: &[(String, String)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(name.as_str(), SimpleFileOptions::default())
                .unwrap();
        } else {
            writer
                .start_file(name.as_str(), SimpleFileOptions::default())
                .unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// The archive of previously versioned docs listing `versions`
pub fn versions_archive(versions: &[&str]) -> Vec<u8> {
    let list = serde_json::to_string(versions).unwrap();
    let mut entries = vec![("versions.json".to_string(), list)];
    for v in versions {
        entries.push((
            format!("versioned_docs/version-{}/intro.md", v),
            format!("# Docs for {}", v),
        ));
        entries.push((
            format!("versioned_sidebars/version-{}-sidebars.json", v),
            "{}".to_string(),
        ));
    }
    zip_bytes(&entries)
}

/// A code-host source archive with `<repo>-<version>/` at the top level
pub fn source_archive(repo: &str, version: &str) -> Vec<u8> {
    let root = format!("{}-{}", repo, version);
    zip_bytes(&[
        (format!("{}/", root), String::new()),
        (
            format!("{}/great_expectations/__init__.py", root),
            format!("__version__ = '{}'", version),
        ),
        (format!("{}/README.md", root), "readme".to_string()),
    ])
}

/// Archive source serving the versions archive plus a source archive for
/// each of `sources`
pub fn archives(config: &Config, versions: &[&str], sources: &[&str]) -> StaticArchiveSource {
    let mut source = StaticArchiveSource::new();
    source.insert(config.storage.versions_url.clone(), versions_archive(versions));
    for v in sources {
        let version = v.parse().unwrap();
        source.insert(
            config.repository.archive_url(&version),
            source_archive(&config.repository.name, v),
        );
    }
    source
}

/// A temporary site directory containing the release descriptor
pub fn site(config: &Config) -> TempDir {
    let dir = TempDir::new().unwrap();
    let descriptor = dir.path().join(&config.release.descriptor_path);
    fs::create_dir_all(descriptor.parent().unwrap()).unwrap();
    fs::write(&descriptor, ORIGINAL_DESCRIPTOR).unwrap();
    dir
}

/// Relative paths of everything under `root`, sorted
pub fn listing(root: &Path) -> Vec<PathBuf> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            out.push(path.strip_prefix(root).unwrap().to_path_buf());
            if path.is_dir() {
                walk(root, &path, out);
            }
        }
    }

    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}
