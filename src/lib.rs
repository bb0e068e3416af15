pub mod archive;
pub mod builder;
pub mod command;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod logging;
pub mod ui;

pub use builder::{BuildOptions, DocsBuilder};
pub use error::{DocsBuildError, Result};
